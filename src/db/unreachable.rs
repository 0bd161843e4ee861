use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;

use crate::db::store::{QrCodeStore, StoreError, StoreResult};
use crate::models::qr_code::{QrCode, QrCodePatch};

/// A store whose backend never answers.
pub(crate) struct UnreachableStore;

fn refused() -> StoreError {
    StoreError::Backend(anyhow::anyhow!("connection refused"))
}

#[async_trait]
impl QrCodeStore for UnreachableStore {
    async fn ping(&self) -> StoreResult<()> {
        Err(refused())
    }
    async fn insert(&self, _record: QrCode) -> StoreResult<QrCode> {
        Err(refused())
    }
    async fn find_by_short_id(&self, _short_id: &str) -> StoreResult<Option<QrCode>> {
        Err(refused())
    }
    async fn find_by_owner(&self, _owner_id: &str) -> StoreResult<Vec<QrCode>> {
        Err(refused())
    }
    async fn find_owned(&self, _id: ObjectId, _owner_id: &str) -> StoreResult<Option<QrCode>> {
        Err(refused())
    }
    async fn update_owned(
        &self,
        _id: ObjectId,
        _owner_id: &str,
        _patch: &QrCodePatch,
    ) -> StoreResult<Option<QrCode>> {
        Err(refused())
    }
    async fn delete_owned(&self, _id: ObjectId, _owner_id: &str) -> StoreResult<bool> {
        Err(refused())
    }
    async fn record_scan(&self, _short_id: &str) -> StoreResult<Option<QrCode>> {
        Err(refused())
    }
}
