//! Health check.

use axum::http::StatusCode;
use axum::routing::get;
use axum::Router;

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(health_check))
}

/// GET /: 200 with an empty body while the process is up.
async fn health_check() -> StatusCode {
    StatusCode::OK
}
