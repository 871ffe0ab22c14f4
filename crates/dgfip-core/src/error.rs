//! # Error Types
//!
//! The engine itself is infallible: unauthorized scopes and unmatched
//! identities are ordinary outcomes, not errors. The only failure that
//! crosses the crate boundary comes from the record store.

use thiserror::Error;

/// Failure reported by a [`RecordStore`](crate::RecordStore) lookup.
///
/// Distinct from an empty result: callers must not turn this into
/// "not found", otherwise an outage reads as missing data.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The store could not be reached or did not answer in time.
    #[error("record store unavailable: {0}")]
    Unavailable(String),

    /// The store answered with data that is not a valid record set.
    #[error("record store returned corrupt data: {0}")]
    Corrupt(String),
}
