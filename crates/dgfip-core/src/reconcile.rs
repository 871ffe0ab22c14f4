//! # Identity Reconciliation
//!
//! Links a FranceConnect identity to exactly one tax record, or to none.
//!
//! Stored names are accent-free, so "Carlós Nuñez" and "Cårløs Nunez" land
//! on the same key. Folding accents raises the odds that two different
//! people share a key; birth date, title and birth country narrow it down,
//! and the uniqueness check below is what keeps one citizen from ever
//! receiving another's record. Genuine namesakes get no record at all and
//! are handled out of band.

use crate::error::StoreError;
use crate::identity::{FederatedIdentity, ReconciliationCriteria};
use crate::record::InternalRecord;
use crate::store::RecordStore;

/// Resolve `identity` to a single record.
///
/// - Incomplete identity, unparseable birth date or unknown gender:
///   `Ok(None)` without touching the store.
/// - Zero or several matches: `Ok(None)`. The two cases are not
///   distinguishable by the caller.
/// - Store failure: `Err`, never `Ok(None)`.
pub async fn reconcile<S>(
    store: &S,
    identity: &FederatedIdentity,
) -> Result<Option<InternalRecord>, StoreError>
where
    S: RecordStore + ?Sized,
{
    let Some(criteria) = ReconciliationCriteria::from_identity(identity) else {
        tracing::debug!("reconciliation skipped: identity cannot form a lookup key");
        return Ok(None);
    };

    let mut matches = store.find(&criteria).await?;

    if matches.len() != 1 {
        tracing::info!(
            candidates = matches.len(),
            "reconciliation miss: expected exactly one record"
        );
        return Ok(None);
    }

    Ok(matches.pop())
}
