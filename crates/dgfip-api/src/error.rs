//! # API Error Types
//!
//! Structured error type implementing `axum::response::IntoResponse`.
//! Locally produced errors render as `{ "error": { "code", "message" } }`.
//! Rejections from FranceConnect are relayed with the upstream status and
//! body untouched, so relying services see what FranceConnect said.
//! Internal details never reach the client.

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use dgfip_core::StoreError;
use dgfip_fc_client::FcError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Structured JSON error response body.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

/// Inner error detail.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetail {
    /// Machine-readable error code (e.g., "NOT_FOUND", "FORBIDDEN").
    pub code: String,
    /// Human-readable error message.
    pub message: String,
}

/// Application-level error type that implements [`IntoResponse`] for Axum.
#[derive(Error, Debug)]
pub enum AppError {
    /// Missing or malformed `Authorization` header (400).
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Token grants no scope this provider serves (403).
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// No single record for the citizen, or unknown route (404).
    #[error("not found: {0}")]
    NotFound(String),

    /// FranceConnect unreachable or answered garbage (502).
    #[error("bad gateway: {0}")]
    BadGateway(String),

    /// Record store unavailable (503).
    #[error("service unavailable: {0}")]
    ServiceUnavailable(String),

    /// FranceConnect refused the token; relayed verbatim.
    #[error("upstream rejected the request with {status}")]
    Upstream { status: u16, body: String },

    /// Internal server error (500). Message is logged but not returned to client.
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Return the HTTP status code and machine-readable error code for this error.
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            Self::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            Self::Forbidden(_) => (StatusCode::FORBIDDEN, "FORBIDDEN"),
            Self::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            Self::BadGateway(_) => (StatusCode::BAD_GATEWAY, "BAD_GATEWAY"),
            Self::ServiceUnavailable(_) => (StatusCode::SERVICE_UNAVAILABLE, "SERVICE_UNAVAILABLE"),
            Self::Upstream { status, .. } => (
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY),
                "UPSTREAM_REJECTED",
            ),
            Self::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        let message = match self {
            Self::Upstream { body, .. } => {
                let content_type = if serde_json::from_str::<serde_json::Value>(&body).is_ok() {
                    "application/json"
                } else {
                    "text/plain; charset=utf-8"
                };
                return (status, [(header::CONTENT_TYPE, content_type)], body).into_response();
            }
            Self::Internal(ref detail) => {
                tracing::error!(error = %detail, "internal server error");
                "An internal error occurred".to_string()
            }
            Self::BadGateway(ref detail) => {
                tracing::warn!(error = %detail, "FranceConnect unavailable");
                "FranceConnect is unavailable".to_string()
            }
            Self::ServiceUnavailable(ref detail) => {
                tracing::error!(error = %detail, "record store unavailable");
                "The tax record store is unavailable".to_string()
            }
            ref other => other.to_string(),
        };

        let body = ErrorBody {
            error: ErrorDetail {
                code: code.to_string(),
                message,
            },
        };

        (status, Json(body)).into_response()
    }
}

/// Map token check failures: rejections relay, everything else is a gateway error.
impl From<FcError> for AppError {
    fn from(err: FcError) -> Self {
        match err {
            FcError::Rejected { status, body, .. } => Self::Upstream { status, body },
            FcError::Transport { .. } | FcError::Deserialization { .. } => {
                Self::BadGateway(err.to_string())
            }
            FcError::Config(_) => Self::Internal(err.to_string()),
        }
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        Self::ServiceUnavailable(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bad_request_status_code() {
        let (status, code) = AppError::BadRequest("no bearer".into()).status_and_code();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(code, "BAD_REQUEST");
    }

    #[test]
    fn forbidden_status_code() {
        let (status, code) = AppError::Forbidden("no dgfip scope".into()).status_and_code();
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(code, "FORBIDDEN");
    }

    #[test]
    fn gateway_and_store_status_codes() {
        let (status, _) = AppError::BadGateway("refused".into()).status_and_code();
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        let (status, _) = AppError::ServiceUnavailable("down".into()).status_and_code();
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn upstream_keeps_its_status() {
        let err = AppError::Upstream {
            status: 401,
            body: String::new(),
        };
        assert_eq!(err.status_and_code().0, StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn upstream_with_invalid_status_falls_back_to_bad_gateway() {
        let err = AppError::Upstream {
            status: 1000,
            body: String::new(),
        };
        assert_eq!(err.status_and_code().0, StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn fc_rejection_converts_to_upstream() {
        let err = AppError::from(FcError::Rejected {
            endpoint: "POST /api/v1/checktoken".into(),
            status: 401,
            body: "{}".into(),
        });
        assert!(matches!(err, AppError::Upstream { status: 401, .. }));
    }

    #[test]
    fn fc_bad_payload_converts_to_bad_gateway() {
        let err = AppError::from(FcError::Deserialization {
            endpoint: "POST /api/v1/checktoken".into(),
            reason: "expected value".into(),
        });
        assert!(matches!(err, AppError::BadGateway(_)));
    }

    #[test]
    fn store_error_converts_to_service_unavailable() {
        let err = AppError::from(StoreError::Unavailable("disk".into()));
        assert!(matches!(err, AppError::ServiceUnavailable(_)));
    }

    // ── into_response tests ──────────────────────────────────────

    use http_body_util::BodyExt;

    async fn response_parts(err: AppError) -> (StatusCode, ErrorBody) {
        let response = err.into_response();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: ErrorBody = serde_json::from_slice(&bytes).unwrap();
        (status, body)
    }

    #[tokio::test]
    async fn into_response_forbidden() {
        let (status, body) = response_parts(AppError::Forbidden("nope".into())).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body.error.code, "FORBIDDEN");
        assert!(body.error.message.contains("nope"));
    }

    #[test]
    fn error_body_has_only_code_and_message() {
        let body = ErrorBody {
            error: ErrorDetail {
                code: "FORBIDDEN".to_string(),
                message: "nope".to_string(),
            },
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            serde_json::json!({ "error": { "code": "FORBIDDEN", "message": "nope" } })
        );
    }

    #[tokio::test]
    async fn into_response_internal_hides_details() {
        let (status, body) =
            response_parts(AppError::Internal("invalid URL for FC_URL".into())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.error.message, "An internal error occurred");
    }

    #[tokio::test]
    async fn into_response_store_failure_hides_details() {
        let (status, body) =
            response_parts(AppError::ServiceUnavailable("/var/lib/db.json: EIO".into())).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert!(!body.error.message.contains("/var/lib"));
    }

    #[tokio::test]
    async fn into_response_upstream_relays_json_body() {
        let upstream = r#"{"status":"fail","message":"token_not_found_or_expired"}"#;
        let response = AppError::Upstream {
            status: 401,
            body: upstream.into(),
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "application/json"
        );
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&bytes[..], upstream.as_bytes());
    }

    #[tokio::test]
    async fn into_response_upstream_relays_text_body() {
        let response = AppError::Upstream {
            status: 500,
            body: "oops".into(),
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(response.headers()[header::CONTENT_TYPE]
            .to_str()
            .unwrap()
            .starts_with("text/plain"));
    }
}
