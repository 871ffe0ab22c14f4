//! # Middleware Modules
//!
//! Tower layers wrapped around every route.

pub mod cors;
pub mod tracing_layer;
