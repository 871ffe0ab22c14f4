//! # Tax Data Disclosure
//!
//! | Method | Path                                      | Operation            |
//! |--------|-------------------------------------------|----------------------|
//! | GET    | `/api/dgfip`                              | Disclose tax data    |
//! | GET    | `/situations/ir/assiettes/annrev/{annee}` | Same, production path|
//!
//! The production path carries a tax year; the fixture holds a single year
//! so the segment is accepted and ignored.
//!
//! Each request runs: bearer extraction (400) → FranceConnect checktoken
//! (relayed 4xx/5xx, 502) → scope check (403) → reconciliation (404, 503)
//! → projection and formatting (200).

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use dgfip_core::Disclosure;
use serde_json::Value;

use crate::auth::BearerToken;
use crate::error::AppError;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/dgfip", get(get_dgfip_data))
        .route("/situations/ir/assiettes/annrev/{annee}", get(get_dgfip_data))
}

/// GET /api/dgfip: tax data for the citizen behind the access token.
async fn get_dgfip_data(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
) -> Result<Json<Value>, AppError> {
    let checked = state.token_checker.check_token(&token).await?;
    tracing::debug!(
        scopes = checked.scope.len(),
        client = checked
            .client
            .as_ref()
            .and_then(|c| c.client_name.as_deref())
            .unwrap_or("<unknown>"),
        "access token accepted by FranceConnect"
    );

    match state.broker.disclose(&checked.scope, &checked.identity).await? {
        Disclosure::Granted(body) => Ok(Json(body)),
        Disclosure::Forbidden => Err(AppError::Forbidden(
            "access token grants no DGFiP scope".into(),
        )),
        Disclosure::NotFound => Err(AppError::NotFound(
            "no single tax record matches this identity".into(),
        )),
    }
}
