//! # dgfip-api -- DGFiP Data Provider HTTP Service
//!
//! A FranceConnect data provider: relying services present the access token
//! a citizen granted them, and receive the DGFiP tax data that token's
//! scopes allow, for that citizen only.
//!
//! ## Routes
//!
//! | Method | Path                                      | Purpose                |
//! |--------|-------------------------------------------|------------------------|
//! | GET    | `/`                                       | Health check           |
//! | GET    | `/api/dgfip`                              | Tax data               |
//! | GET    | `/situations/ir/assiettes/annrev/{annee}` | Tax data (prod path)   |
//!
//! Any other path answers 404.
//!
//! ## Middleware Stack (Tower)
//!
//! TraceLayer → CorsLayer
//!
//! ## Crate Policy
//!
//! - Handlers hold no business logic: authorization, reconciliation and
//!   formatting live in `dgfip-core`, token validation in `dgfip-fc-client`.
//! - All errors map to HTTP responses via [`AppError`].

pub mod auth;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;
pub mod store;

use axum::http::Uri;
use axum::Router;

pub use error::AppError;
pub use state::{AppConfig, AppState};
pub use store::FixtureStore;

/// Assemble the application router with all routes and middleware.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(routes::health::router())
        .merge(routes::dgfip::router())
        .fallback(not_found)
        .layer(middleware::cors::layer())
        .layer(middleware::tracing_layer::layer())
        .with_state(state)
}

async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("no route for {}", uri.path()))
}
