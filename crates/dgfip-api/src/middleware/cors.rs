//! # Cross-Origin Requests
//!
//! The disclosed data is gated by the access token, not by origin, and API
//! catalogues call the service straight from the browser. Every origin is
//! allowed.

use tower_http::cors::CorsLayer;

/// Build the CORS layer.
pub fn layer() -> CorsLayer {
    CorsLayer::permissive()
}
