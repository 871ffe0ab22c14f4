//! # Disclosure Broker
//!
//! Runs the per-request pipeline once: authorize the scopes, reconcile the
//! identity, project the record, format the result. Holds no state besides
//! the store handle, so one broker serves all requests concurrently.

use serde_json::Value;

use crate::error::StoreError;
use crate::format::format;
use crate::identity::FederatedIdentity;
use crate::reconcile::reconcile;
use crate::scope::{filter, is_authorized, ScopeSet};
use crate::store::RecordStore;

/// Outcome of a disclosure request.
#[derive(Debug, Clone, PartialEq)]
pub enum Disclosure {
    /// No scope this provider serves was granted.
    Forbidden,
    /// The identity did not resolve to exactly one record.
    NotFound,
    /// Formatted record restricted to the granted scopes.
    Granted(Value),
}

/// Authorize → Reconcile → Filter → Format over a record store.
#[derive(Debug, Clone)]
pub struct DataBroker<S> {
    store: S,
}

impl<S: RecordStore> DataBroker<S> {
    /// Wrap a record store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Access the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Decide what `identity` may disclose under `scopes`.
    ///
    /// Unauthorized scopes short-circuit before any store lookup.
    pub async fn disclose(
        &self,
        scopes: &ScopeSet,
        identity: &FederatedIdentity,
    ) -> Result<Disclosure, StoreError> {
        if !is_authorized(scopes) {
            tracing::info!(scopes = scopes.len(), "disclosure refused: no served scope granted");
            return Ok(Disclosure::Forbidden);
        }

        let Some(record) = reconcile(&self.store, identity).await? else {
            return Ok(Disclosure::NotFound);
        };

        let allowed = filter(scopes, &record);
        tracing::debug!(fields = allowed.len(), "disclosing filtered record");
        Ok(Disclosure::Granted(format(&allowed)))
    }
}
