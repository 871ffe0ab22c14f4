//! FranceConnect client error types.

/// Errors from the checktoken call.
#[derive(Debug, thiserror::Error)]
pub enum FcError {
    /// FranceConnect could not be reached (connection refused, timeout).
    #[error("HTTP error calling {endpoint}: {source}")]
    Transport {
        endpoint: String,
        source: reqwest::Error,
    },
    /// FranceConnect answered with a non-2xx status.
    #[error("FranceConnect {endpoint} returned {status}: {body}")]
    Rejected {
        endpoint: String,
        status: u16,
        body: String,
    },
    /// The 2xx answer was not a valid checktoken payload.
    #[error("failed to deserialize response from {endpoint}: {reason}")]
    Deserialization { endpoint: String, reason: String },
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(#[from] super::config::ConfigError),
}

impl FcError {
    /// Whether FranceConnect itself refused the token.
    pub fn is_rejection(&self) -> bool {
        matches!(self, Self::Rejected { .. })
    }
}
