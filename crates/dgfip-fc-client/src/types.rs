//! Wire types for the checktoken exchange.

use dgfip_core::{FederatedIdentity, ScopeSet};
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

/// FranceConnect access token presented by the relying service.
///
/// Zeroed on drop; `Debug` never prints the value.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(Zeroizing<String>);

impl AccessToken {
    /// Wrap a raw token.
    pub fn new(token: impl Into<String>) -> Self {
        Self(Zeroizing::new(token.into()))
    }

    /// Raw token value, for the outbound request only.
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }
}

impl std::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("AccessToken").field(&"[REDACTED]").finish()
    }
}

/// Body of `POST /api/v1/checktoken`.
#[derive(Serialize)]
pub(crate) struct CheckTokenRequest<'a> {
    pub token: &'a str,
}

/// Relying service the token was issued to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FcClientInfo {
    pub client_id: String,
    #[serde(default)]
    pub client_name: Option<String>,
}

/// Successful checktoken answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckedToken {
    /// Scopes granted to the relying service.
    pub scope: ScopeSet,
    /// Citizen the token was issued for.
    #[serde(default)]
    pub identity: FederatedIdentity,
    #[serde(default)]
    pub client: Option<FcClientInfo>,
    #[serde(default)]
    pub identity_provider_id: Option<String>,
    #[serde(default)]
    pub identity_provider_host: Option<String>,
    /// eIDAS level of the authentication.
    #[serde(default)]
    pub acr: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn access_token_debug_is_redacted() {
        let token = AccessToken::new("9af033eb295d0fe1");
        let debug = format!("{token:?}");
        assert!(!debug.contains("9af033eb"));
        assert!(debug.contains("REDACTED"));
        assert_eq!(token.expose(), "9af033eb295d0fe1");
    }

    #[test]
    fn checked_token_parses_franceconnect_payload() {
        let payload = serde_json::json!({
            "scope": ["openid", "dgfip_rfr"],
            "identity": {
                "given_name": "François",
                "family_name": "Seize",
                "gender": "male",
                "birthdate": "1950-01-06",
                "birthcountry": "99100",
                "_claim_names": {}
            },
            "client": { "client_id": "a0cd6437", "client_name": "FSP1" },
            "identity_provider_id": "dgfip",
            "identity_provider_host": "fip1.dev.dev-franceconnect.fr",
            "acr": "eidas2"
        });
        let checked: CheckedToken = serde_json::from_value(payload).unwrap();
        assert!(checked.scope.contains("dgfip_rfr"));
        assert_eq!(checked.identity.family_name.as_deref(), Some("Seize"));
        assert_eq!(checked.acr.as_deref(), Some("eidas2"));
    }

    #[test]
    fn checked_token_requires_scope() {
        let payload = serde_json::json!({ "identity": {} });
        assert!(serde_json::from_value::<CheckedToken>(payload).is_err());
    }
}
