//! # dgfip-api: Binary Entry Point
//!
//! Starts the Axum HTTP server for the DGFiP data provider.
//! Binds to configurable port (default 4000).

use std::sync::Arc;

use dgfip_api::state::{AppConfig, AppState, SharedStore};
use dgfip_api::FixtureStore;
use dgfip_fc_client::{FranceConnectClient, FranceConnectConfig, MockFranceConnect, TokenChecker};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured tracing.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::from_env().map_err(|e| {
        tracing::error!("Invalid configuration: {e}");
        e
    })?;

    let token_checker: Arc<dyn TokenChecker> = if config.use_fc_mock {
        tracing::info!("FranceConnect mock enabled: access tokens are checked in process");
        Arc::new(MockFranceConnect::new())
    } else {
        let fc_config = FranceConnectConfig::from_env().map_err(|e| {
            tracing::error!("Invalid FranceConnect configuration: {e}");
            e
        })?;
        tracing::warn!(
            host = fc_config.host(),
            "Remote loop mode activated: this server will hit {}",
            fc_config.base_url
        );
        Arc::new(FranceConnectClient::new(fc_config).map_err(|e| {
            tracing::error!("Failed to create FranceConnect client: {e}");
            e
        })?)
    };

    let store = match &config.database_path {
        Some(path) => FixtureStore::from_path(path),
        None => FixtureStore::embedded(),
    }
    .map_err(|e| {
        tracing::error!("Failed to load tax records: {e}");
        e
    })?;
    tracing::info!(records = store.len(), "tax records loaded");
    let store: SharedStore = Arc::new(store);

    let port = config.port;
    let app = dgfip_api::app(AppState::new(config, token_checker, store));

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("DGFiP data provider listening on http://localhost:{port}");
    tracing::info!(
        "Try it: curl -H 'authorization: Bearer {}' http://localhost:{port}/api/dgfip",
        dgfip_fc_client::mock::VALID_TOKEN
    );
    axum::serve(listener, app).await?;

    Ok(())
}
