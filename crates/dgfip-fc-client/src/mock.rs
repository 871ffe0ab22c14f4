//! In-process stand-in for FranceConnect.
//!
//! Answers checktoken calls from a fixed table of integration tokens, with
//! the same status codes and bodies the integration platform returns. The
//! success payloads go through the same deserialization as live answers.

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::error::FcError;
use crate::types::{AccessToken, CheckedToken};
use crate::TokenChecker;

/// Valid token granting every DGFiP scope.
pub const VALID_TOKEN: &str = "9af033eb295d0fe113988d29a26527f920114973b3a1ca7bdb44768fd0c73937";
/// Valid token granting no DGFiP scope.
pub const VALID_TOKEN_WITHOUT_DGFIP_SCOPES: &str =
    "9af033eb295d0fe113988d29a26527f920114973b3a1ca7bdb44768fd0c73938";
/// Valid token granting `dgfip_rfr` only.
pub const VALID_TOKEN_RFR_SCOPE: &str =
    "9af033eb295d0fe113988d29a26527f920114973b3a1ca7bdb44768fd0c73939";
/// Valid token granting `dgfip_aft` only.
pub const VALID_TOKEN_AFT_SCOPE: &str =
    "9af033eb295d0fe113988d29a26527f920114973b3a1ca7bdb44768fd0c73940";
/// Token FranceConnect cannot parse.
pub const MALFORMED_TOKEN: &str = "malformed-token";
/// Token FranceConnect no longer knows.
pub const EXPIRED_TOKEN: &str = "9af033eb295d0fe113988d29a26527f920114973b3a1ca7bdb44768fd0c73936";

const ENDPOINT: &str = "POST /api/v1/checktoken (mock)";

/// Mock FranceConnect answering from the integration token table.
#[derive(Debug, Clone, Default)]
pub struct MockFranceConnect;

impl MockFranceConnect {
    pub fn new() -> Self {
        Self
    }

    /// Status and JSON body FranceConnect would send for `token`.
    pub fn respond(&self, token: &str) -> (u16, Value) {
        let scope: &[&str] = match token {
            VALID_TOKEN => &[
                "openid",
                "profile",
                "birth",
                "dgfip_rfr",
                "dgfip_pac",
                "dgfip_pacf",
                "dgfip_aft",
            ],
            VALID_TOKEN_WITHOUT_DGFIP_SCOPES => &["openid", "profile", "birth"],
            VALID_TOKEN_RFR_SCOPE => &["dgfip_rfr"],
            VALID_TOKEN_AFT_SCOPE => &["dgfip_aft"],
            MALFORMED_TOKEN => return (401, rejection("Malformed access token.")),
            _ => return (401, rejection("token_not_found_or_expired")),
        };
        (200, checked_token_body(scope))
    }
}

fn rejection(message: &str) -> Value {
    json!({ "status": "fail", "message": message })
}

fn checked_token_body(scope: &[&str]) -> Value {
    json!({
        "scope": scope,
        "identity": {
            "name": "Seize François",
            "family_name": "Seize",
            "given_name": "François",
            "nickname": "",
            "gender": "male",
            "preferred_username": "François",
            "birthdate": "1950-01-06",
            "birthplace": "",
            "birthcountry": "99100",
            "address": {
                "country": "France",
                "formatted": "26 rue Desaix, 75015 Paris",
                "locality": "Paris",
                "postal_code": "75015",
                "region": "Ile-de-France",
                "street_address": "26 rue Desaix"
            },
            "_claim_names": {},
            "_claim_sources": {}
        },
        "client": {
            "client_id": "a0cd64372db6ecf39c317c0c74ce90f02d8ad7d510ce054883b759d666a996bc",
            "client_name": "FSP1"
        },
        "identity_provider_id": "dgfip",
        "identity_provider_host": "fip1.dev.dev-franceconnect.fr",
        "acr": "eidas2"
    })
}

#[async_trait]
impl TokenChecker for MockFranceConnect {
    async fn check_token(&self, token: &AccessToken) -> Result<CheckedToken, FcError> {
        let (status, body) = self.respond(token.expose());
        if status != 200 {
            return Err(FcError::Rejected {
                endpoint: ENDPOINT.into(),
                status,
                body: body.to_string(),
            });
        }
        serde_json::from_value(body).map_err(|e| FcError::Deserialization {
            endpoint: ENDPOINT.into(),
            reason: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn check(token: &str) -> Result<CheckedToken, FcError> {
        MockFranceConnect::new()
            .check_token(&AccessToken::new(token))
            .await
    }

    #[tokio::test]
    async fn valid_token_grants_all_dgfip_scopes() {
        let checked = check(VALID_TOKEN).await.unwrap();
        for scope in ["dgfip_rfr", "dgfip_pac", "dgfip_pacf", "dgfip_aft"] {
            assert!(checked.scope.contains(scope), "missing {scope}");
        }
        assert_eq!(checked.identity.given_name.as_deref(), Some("François"));
        assert_eq!(checked.identity.birthcountry.as_deref(), Some("99100"));
        assert_eq!(
            checked.client.map(|c| c.client_name),
            Some(Some("FSP1".to_string()))
        );
    }

    #[tokio::test]
    async fn single_scope_tokens() {
        let rfr = check(VALID_TOKEN_RFR_SCOPE).await.unwrap();
        assert_eq!(rfr.scope.iter().collect::<Vec<_>>(), vec!["dgfip_rfr"]);
        let aft = check(VALID_TOKEN_AFT_SCOPE).await.unwrap();
        assert_eq!(aft.scope.iter().collect::<Vec<_>>(), vec!["dgfip_aft"]);
        let none = check(VALID_TOKEN_WITHOUT_DGFIP_SCOPES).await.unwrap();
        assert!(!none.scope.contains("dgfip_rfr"));
        assert_eq!(none.scope.len(), 3);
    }

    #[tokio::test]
    async fn malformed_token_is_rejected_with_401() {
        match check(MALFORMED_TOKEN).await {
            Err(FcError::Rejected { status, body, .. }) => {
                assert_eq!(status, 401);
                let body: Value = serde_json::from_str(&body).unwrap();
                assert_eq!(body["message"], "Malformed access token.");
                assert_eq!(body["status"], "fail");
            }
            other => panic!("expected rejection, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn expired_and_unknown_tokens_are_not_found() {
        for token in [EXPIRED_TOKEN, "never-issued"] {
            match check(token).await {
                Err(FcError::Rejected { status, body, .. }) => {
                    assert_eq!(status, 401);
                    assert!(body.contains("token_not_found_or_expired"));
                }
                other => panic!("expected rejection, got {other:?}"),
            }
        }
    }
}
