use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use tokio::sync::Mutex;

use crate::db::store::{QrCodeStore, StoreError, StoreResult};
use crate::models::qr_code::{QrCode, QrCodePatch};

/// In-process store with the same contract as [`super::mongodb::MongoStore`].
///
/// Records live in a vector behind one async mutex, so every trait method is
/// atomic with respect to the others, including `record_scan`.
#[derive(Default)]
pub struct MemoryStore {
    records: Mutex<Vec<QrCode>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.records.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.lock().await.is_empty()
    }

    /// Snapshot of every record, regardless of owner.
    pub async fn all(&self) -> Vec<QrCode> {
        self.records.lock().await.clone()
    }
}

fn is_owned(record: &QrCode, id: ObjectId, owner_id: &str) -> bool {
    record.id == Some(id) && record.owner_id == owner_id
}

#[async_trait]
impl QrCodeStore for MemoryStore {
    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }

    async fn insert(&self, mut record: QrCode) -> StoreResult<QrCode> {
        let mut records = self.records.lock().await;
        if records.iter().any(|r| r.short_id == record.short_id) {
            return Err(StoreError::DuplicateShortId);
        }

        record.id = Some(ObjectId::new());
        records.push(record.clone());
        Ok(record)
    }

    async fn find_by_short_id(&self, short_id: &str) -> StoreResult<Option<QrCode>> {
        let records = self.records.lock().await;
        Ok(records.iter().find(|r| r.short_id == short_id).cloned())
    }

    async fn find_by_owner(&self, owner_id: &str) -> StoreResult<Vec<QrCode>> {
        let records = self.records.lock().await;
        Ok(records
            .iter()
            .filter(|r| r.owner_id == owner_id)
            .cloned()
            .collect())
    }

    async fn find_owned(&self, id: ObjectId, owner_id: &str) -> StoreResult<Option<QrCode>> {
        let records = self.records.lock().await;
        Ok(records.iter().find(|r| is_owned(r, id, owner_id)).cloned())
    }

    async fn update_owned(
        &self,
        id: ObjectId,
        owner_id: &str,
        patch: &QrCodePatch,
    ) -> StoreResult<Option<QrCode>> {
        let mut records = self.records.lock().await;
        Ok(records
            .iter_mut()
            .find(|r| is_owned(r, id, owner_id))
            .map(|record| {
                patch.apply(record);
                record.clone()
            }))
    }

    async fn delete_owned(&self, id: ObjectId, owner_id: &str) -> StoreResult<bool> {
        let mut records = self.records.lock().await;
        let before = records.len();
        records.retain(|r| !is_owned(r, id, owner_id));
        Ok(records.len() < before)
    }

    async fn record_scan(&self, short_id: &str) -> StoreResult<Option<QrCode>> {
        let mut records = self.records.lock().await;
        Ok(records
            .iter_mut()
            .find(|r| r.short_id == short_id)
            .map(|record| {
                record.scans += 1;
                record.clone()
            }))
    }
}
