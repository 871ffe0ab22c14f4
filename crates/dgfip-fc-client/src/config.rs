//! FranceConnect client configuration.
//!
//! Points at the FranceConnect integration platform by default. Override via
//! environment variables or explicit construction for other platforms and
//! tests.

use url::Url;

/// Default FranceConnect host (integration platform).
pub const DEFAULT_FC_URL: &str = "https://fcp.dev.dev-franceconnect.fr";

/// Path of the token introspection endpoint, relative to the host.
pub const CHECK_TOKEN_PATH: &str = "api/v1/checktoken";

/// Configuration for reaching FranceConnect.
#[derive(Debug, Clone)]
pub struct FranceConnectConfig {
    /// FranceConnect host.
    /// Default: <https://fcp.dev.dev-franceconnect.fr>
    pub base_url: Url,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl FranceConnectConfig {
    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `FC_URL` (default: `https://fcp.dev.dev-franceconnect.fr`)
    /// - `FC_TIMEOUT_SECS` (default: 10)
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: env_url("FC_URL", DEFAULT_FC_URL)?,
            timeout_secs: std::env::var("FC_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(10),
        })
    }

    /// Create a configuration pointing to a local mock server (for testing).
    pub fn local_mock(port: u16) -> Result<Self, ConfigError> {
        let base_url = Url::parse(&format!("http://127.0.0.1:{port}"))
            .map_err(|e| ConfigError::InvalidUrl("localhost".to_string(), e.to_string()))?;
        Ok(Self {
            base_url,
            timeout_secs: 5,
        })
    }

    /// Full URL of the checktoken endpoint.
    pub fn check_token_url(&self) -> Result<Url, ConfigError> {
        // Keep any path prefix on the host (reverse-proxied deployments).
        let mut base = self.base_url.clone();
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        base.join(CHECK_TOKEN_PATH)
            .map_err(|e| ConfigError::InvalidUrl(self.base_url.to_string(), e.to_string()))
    }

    /// Host name for log lines.
    pub fn host(&self) -> &str {
        self.base_url.host_str().unwrap_or("<no host>")
    }
}

fn env_url(var: &str, default: &str) -> Result<Url, ConfigError> {
    let raw = std::env::var(var).unwrap_or_else(|_| default.to_string());
    Url::parse(&raw).map_err(|e| ConfigError::InvalidUrl(var.to_string(), e.to_string()))
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid URL for {0}: {1}")]
    InvalidUrl(String, String),
}
