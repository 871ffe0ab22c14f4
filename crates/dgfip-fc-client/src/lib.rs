//! # dgfip-fc-client -- FranceConnect token validation
//!
//! The relying service calls the data provider with a FranceConnect access
//! token. Before anything is disclosed, the token is sent back to
//! FranceConnect, which answers with the granted scopes and the identity of
//! the citizen it was issued for.
//!
//! ## Endpoint
//!
//! | Method | Path                  | Body                  |
//! |--------|-----------------------|-----------------------|
//! | POST   | `/api/v1/checktoken`  | `{"token": "<token>"}` |
//!
//! ## Implementations
//!
//! - [`FranceConnectClient`] calls the real (or integration) FranceConnect.
//! - [`MockFranceConnect`] answers from a fixed token table, in process,
//!   for local development and tests.
//!
//! Both sit behind [`TokenChecker`] so the HTTP layer does not know which
//! one it talks to.

pub mod client;
pub mod config;
pub mod error;
pub mod mock;
pub mod types;

pub use client::FranceConnectClient;
pub use config::FranceConnectConfig;
pub use error::FcError;
pub use mock::MockFranceConnect;
pub use types::{AccessToken, CheckedToken, FcClientInfo};

use async_trait::async_trait;

/// Validate an access token and return what it grants.
#[async_trait]
pub trait TokenChecker: Send + Sync {
    /// Check `token` against the identity provider.
    ///
    /// Rejections by the provider come back as [`FcError::Rejected`] with
    /// the provider's status and body, so callers can relay them.
    async fn check_token(&self, token: &AccessToken) -> Result<CheckedToken, FcError>;
}
