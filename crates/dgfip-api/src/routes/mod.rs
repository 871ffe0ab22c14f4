//! # API Route Modules
//!
//! - `health`: liveness check on `/`.
//! - `dgfip`: tax data disclosure, under its own path and under the
//!   production DGFiP API path.

pub mod dgfip;
pub mod health;
