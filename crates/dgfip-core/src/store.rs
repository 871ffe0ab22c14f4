//! # Record Store Seam
//!
//! The engine never sees how records are persisted. It hands an
//! exact-match key to a [`RecordStore`] and inspects only the number of
//! records that come back.

use async_trait::async_trait;

use crate::error::StoreError;
use crate::identity::ReconciliationCriteria;
use crate::record::InternalRecord;

/// Exact-match lookup over tax records.
///
/// Implementations return every record whose seven criteria fields equal
/// the key. Result order is irrelevant. Timeouts and cancellation are the
/// implementation's concern; they surface as [`StoreError`].
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Find all records matching `criteria`.
    async fn find(
        &self,
        criteria: &ReconciliationCriteria,
    ) -> Result<Vec<InternalRecord>, StoreError>;
}

#[async_trait]
impl<T: RecordStore + ?Sized> RecordStore for std::sync::Arc<T> {
    async fn find(
        &self,
        criteria: &ReconciliationCriteria,
    ) -> Result<Vec<InternalRecord>, StoreError> {
        (**self).find(criteria).await
    }
}
