//! # Application State
//!
//! Shared state for the Axum application, passed to all route handlers
//! via the `State` extractor. Everything inside is immutable after startup;
//! clones share the same token checker and broker.

use std::path::PathBuf;
use std::sync::Arc;

use dgfip_core::{DataBroker, RecordStore};
use dgfip_fc_client::{MockFranceConnect, TokenChecker};

use crate::store::FixtureStore;

/// Record store shared by every request.
pub type SharedStore = Arc<dyn RecordStore>;

/// Server configuration read from the environment.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Listen port.
    pub port: u16,
    /// Answer token checks in process instead of calling FranceConnect.
    pub use_fc_mock: bool,
    /// Data set replacing the embedded fixture.
    pub database_path: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: 4000,
            use_fc_mock: true,
            database_path: None,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// - `PORT` (default: 4000)
    /// - `USE_FC_MOCK` (default: true; only the literal `false` turns it off)
    /// - `DATABASE_PATH` (default: embedded fixture)
    ///
    /// FranceConnect connection settings are read separately by
    /// [`dgfip_fc_client::FranceConnectConfig::from_env`].
    pub fn from_env() -> Result<Self, ConfigError> {
        let port = match std::env::var("PORT") {
            Ok(raw) => raw
                .parse()
                .map_err(|_| ConfigError::InvalidPort(raw.clone()))?,
            Err(_) => 4000,
        };
        Ok(Self {
            port,
            use_fc_mock: parse_use_fc_mock(std::env::var("USE_FC_MOCK").ok().as_deref()),
            database_path: std::env::var_os("DATABASE_PATH").map(PathBuf::from),
        })
    }
}

fn parse_use_fc_mock(value: Option<&str>) -> bool {
    value != Some("false")
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid PORT: {0:?}")]
    InvalidPort(String),
}

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub token_checker: Arc<dyn TokenChecker>,
    pub broker: Arc<DataBroker<SharedStore>>,
}

impl AppState {
    /// Assemble state from its collaborators.
    pub fn new(
        config: AppConfig,
        token_checker: Arc<dyn TokenChecker>,
        store: SharedStore,
    ) -> Self {
        Self {
            config,
            token_checker,
            broker: Arc::new(DataBroker::new(store)),
        }
    }

    /// Mock FranceConnect over the embedded fixture, as in local development.
    pub fn local() -> Result<Self, dgfip_core::StoreError> {
        Ok(Self::new(
            AppConfig::default(),
            Arc::new(MockFranceConnect::new()),
            Arc::new(FixtureStore::embedded()?),
        ))
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
