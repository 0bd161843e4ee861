use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use thiserror::Error;

use crate::models::qr_code::{QrCode, QrCodePatch};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("short id already exists")]
    DuplicateShortId,
    #[error(transparent)]
    Backend(#[from] anyhow::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence for QR code records.
///
/// Every method is a single logical store operation. Methods taking an
/// `owner_id` only ever match records owned by that identity, so a foreign
/// record looks exactly like a missing one.
#[async_trait]
pub trait QrCodeStore: Send + Sync {
    /// Check that the backend is reachable.
    async fn ping(&self) -> StoreResult<()>;

    /// Insert a new record and return it with its assigned id.
    /// Fails with [`StoreError::DuplicateShortId`] when the short id is taken.
    async fn insert(&self, record: QrCode) -> StoreResult<QrCode>;

    async fn find_by_short_id(&self, short_id: &str) -> StoreResult<Option<QrCode>>;

    /// All records of one owner, in insertion order.
    async fn find_by_owner(&self, owner_id: &str) -> StoreResult<Vec<QrCode>>;

    async fn find_owned(&self, id: ObjectId, owner_id: &str) -> StoreResult<Option<QrCode>>;

    /// Merge `patch` into an owned record and return the updated record.
    async fn update_owned(
        &self,
        id: ObjectId,
        owner_id: &str,
        patch: &QrCodePatch,
    ) -> StoreResult<Option<QrCode>>;

    /// Remove an owned record. Returns `false` if nothing matched.
    async fn delete_owned(&self, id: ObjectId, owner_id: &str) -> StoreResult<bool>;

    /// Atomically add one to the scan counter of the record with `short_id`
    /// and return the record as it is after the increment.
    async fn record_scan(&self, short_id: &str) -> StoreResult<Option<QrCode>>;
}
