//! # Access Token Extraction
//!
//! Relying services forward the FranceConnect access token they hold:
//!
//! ```text
//! Authorization: Bearer {token}
//! Authorization: Bearer: {token}   (production DGFiP API form)
//! ```
//!
//! The header must split on single spaces into exactly two parts. Anything
//! else is a 400; validating the token itself is FranceConnect's job.

use axum::extract::FromRequestParts;
use axum::http::header;
use axum::http::request::Parts;
use dgfip_fc_client::AccessToken;

use crate::error::AppError;

const ACCEPTED_SCHEMES: [&str; 2] = ["Bearer", "Bearer:"];

/// Extract the access token from an `Authorization` header value.
pub fn access_token_from_authorization_header(value: Option<&str>) -> Option<&str> {
    let mut parts = value?.split(' ');
    let scheme = parts.next()?;
    let token = parts.next()?;
    if parts.next().is_some() || !ACCEPTED_SCHEMES.contains(&scheme) || token.is_empty() {
        return None;
    }
    Some(token)
}

/// Access token carried by the request.
///
/// Rejects with [`AppError::BadRequest`] when the header is absent or does
/// not follow the bearer format.
#[derive(Debug, Clone)]
pub struct BearerToken(pub AccessToken);

impl<S: Send + Sync> FromRequestParts<S> for BearerToken {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let value = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok());
        access_token_from_authorization_header(value)
            .map(|token| BearerToken(AccessToken::new(token)))
            .ok_or_else(|| AppError::BadRequest("missing or malformed bearer token".into()))
    }
}
