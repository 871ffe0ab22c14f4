//! HTTP client for the FranceConnect checktoken endpoint.
//!
//! | Method | Path                 | Operation                       |
//! |--------|----------------------|---------------------------------|
//! | POST   | `/api/v1/checktoken` | Introspect an access token      |

use std::time::Duration;

use async_trait::async_trait;

use crate::config::FranceConnectConfig;
use crate::error::FcError;
use crate::types::{AccessToken, CheckTokenRequest, CheckedToken};
use crate::TokenChecker;

/// Client for a live FranceConnect instance.
#[derive(Debug, Clone)]
pub struct FranceConnectClient {
    http: reqwest::Client,
    check_token_url: url::Url,
}

impl FranceConnectClient {
    /// Create a client from configuration.
    pub fn new(config: FranceConnectConfig) -> Result<Self, FcError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| FcError::Transport {
                endpoint: "client_init".into(),
                source: e,
            })?;

        Ok(Self {
            http,
            check_token_url: config.check_token_url()?,
        })
    }

    /// Introspect `token`.
    ///
    /// A non-2xx answer becomes [`FcError::Rejected`] carrying the status and
    /// raw body unchanged.
    pub async fn check_token(&self, token: &AccessToken) -> Result<CheckedToken, FcError> {
        let endpoint = "POST /api/v1/checktoken";
        let body = CheckTokenRequest {
            token: token.expose(),
        };

        // One attempt: a hung FranceConnect costs the caller one timeout.
        let resp = self
            .http
            .post(self.check_token_url.clone())
            .json(&body)
            .send()
            .await
            .map_err(|e| FcError::Transport {
                endpoint: endpoint.into(),
                source: e,
            })?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp
                .text()
                .await
                .unwrap_or_else(|e| format!("<failed to read response body: {e}>"));
            tracing::debug!(status, "FranceConnect rejected the access token");
            return Err(FcError::Rejected {
                endpoint: endpoint.into(),
                status,
                body,
            });
        }

        let bytes = resp.bytes().await.map_err(|e| FcError::Transport {
            endpoint: endpoint.into(),
            source: e,
        })?;
        serde_json::from_slice(&bytes).map_err(|e| FcError::Deserialization {
            endpoint: endpoint.into(),
            reason: e.to_string(),
        })
    }
}

#[async_trait]
impl TokenChecker for FranceConnectClient {
    async fn check_token(&self, token: &AccessToken) -> Result<CheckedToken, FcError> {
        FranceConnectClient::check_token(self, token).await
    }
}
