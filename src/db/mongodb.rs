use anyhow::Context;
use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::bson::{Document, doc, oid::ObjectId, to_bson};
use mongodb::error::{Error as MongoError, ErrorKind, WriteFailure};
use mongodb::options::{IndexOptions, ReturnDocument};
use mongodb::{Client, Collection, Database, IndexModel};

use crate::db::store::{QrCodeStore, StoreError, StoreResult};
use crate::models::qr_code::{QrCode, QrCodePatch};

const COLLECTION: &str = "qrcodes";
const DUPLICATE_KEY: i32 = 11000;

/// Connect to MongoDB and make sure the server answers before returning.
pub async fn get_database(uri: &str, name: &str) -> anyhow::Result<Database> {
    let client = Client::with_uri_str(uri)
        .await
        .context("Failed to parse MongoDB connection string")?;
    let db = client.database(name);

    db.run_command(doc! { "ping": 1 })
        .await
        .context("MongoDB did not answer ping")?;

    log::info!("Connected to MongoDB database {}", name);
    Ok(db)
}

pub struct MongoStore {
    db: Database,
    collection: Collection<QrCode>,
}

impl MongoStore {
    pub fn new(db: &Database) -> Self {
        Self {
            db: db.clone(),
            collection: db.collection::<QrCode>(COLLECTION),
        }
    }

    /// Create the indexes the store relies on. The unique `shortId` index is
    /// what turns a colliding insert into [`StoreError::DuplicateShortId`].
    pub async fn ensure_indexes(&self) -> anyhow::Result<()> {
        let short_id_index = IndexModel::builder()
            .keys(doc! { "shortId": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();
        let owner_index = IndexModel::builder().keys(doc! { "ownerId": 1 }).build();

        self.collection
            .create_indexes([short_id_index, owner_index])
            .await
            .context("Failed to create qrcodes indexes")?;
        Ok(())
    }
}

fn is_duplicate_key(err: &MongoError) -> bool {
    match err.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(write_error)) => {
            write_error.code == DUPLICATE_KEY
        }
        ErrorKind::Command(command_error) => command_error.code == DUPLICATE_KEY,
        _ => false,
    }
}

fn backend(err: MongoError, what: &'static str) -> StoreError {
    StoreError::Backend(anyhow::Error::new(err).context(what))
}

fn patch_to_set(patch: &QrCodePatch) -> StoreResult<Document> {
    let mut set = Document::new();

    if let Some(name) = &patch.name {
        set.insert("name", name.as_str());
    }
    if let Some(target_url) = &patch.target_url {
        set.insert("targetUrl", target_url.as_str());
    }
    if let Some(original_url) = &patch.original_url {
        set.insert("originalUrl", original_url.as_str());
    }
    if let Some(links) = &patch.links {
        let links = to_bson(links).context("Failed to encode links")?;
        set.insert("links", links);
    }
    if let Some(encoded_image) = &patch.encoded_image {
        set.insert("encodedImage", encoded_image.as_str());
    }

    Ok(set)
}

#[async_trait]
impl QrCodeStore for MongoStore {
    async fn ping(&self) -> StoreResult<()> {
        self.db
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|e| backend(e, "ping failed"))?;
        Ok(())
    }

    async fn insert(&self, mut record: QrCode) -> StoreResult<QrCode> {
        let result = self.collection.insert_one(&record).await.map_err(|e| {
            if is_duplicate_key(&e) {
                StoreError::DuplicateShortId
            } else {
                backend(e, "insert failed")
            }
        })?;

        record.id = result.inserted_id.as_object_id();
        Ok(record)
    }

    async fn find_by_short_id(&self, short_id: &str) -> StoreResult<Option<QrCode>> {
        self.collection
            .find_one(doc! { "shortId": short_id })
            .await
            .map_err(|e| backend(e, "find by short id failed"))
    }

    async fn find_by_owner(&self, owner_id: &str) -> StoreResult<Vec<QrCode>> {
        self.collection
            .find(doc! { "ownerId": owner_id })
            .sort(doc! { "_id": 1 })
            .await
            .map_err(|e| backend(e, "find by owner failed"))?
            .try_collect::<Vec<QrCode>>()
            .await
            .map_err(|e| backend(e, "reading owner cursor failed"))
    }

    async fn find_owned(&self, id: ObjectId, owner_id: &str) -> StoreResult<Option<QrCode>> {
        self.collection
            .find_one(doc! { "_id": id, "ownerId": owner_id })
            .await
            .map_err(|e| backend(e, "find owned failed"))
    }

    async fn update_owned(
        &self,
        id: ObjectId,
        owner_id: &str,
        patch: &QrCodePatch,
    ) -> StoreResult<Option<QrCode>> {
        let set = patch_to_set(patch)?;
        if set.is_empty() {
            return self.find_owned(id, owner_id).await;
        }

        self.collection
            .find_one_and_update(doc! { "_id": id, "ownerId": owner_id }, doc! { "$set": set })
            .return_document(ReturnDocument::After)
            .await
            .map_err(|e| backend(e, "update failed"))
    }

    async fn delete_owned(&self, id: ObjectId, owner_id: &str) -> StoreResult<bool> {
        let result = self
            .collection
            .delete_one(doc! { "_id": id, "ownerId": owner_id })
            .await
            .map_err(|e| backend(e, "delete failed"))?;
        Ok(result.deleted_count > 0)
    }

    async fn record_scan(&self, short_id: &str) -> StoreResult<Option<QrCode>> {
        self.collection
            .find_one_and_update(doc! { "shortId": short_id }, doc! { "$inc": { "scans": 1 } })
            .return_document(ReturnDocument::After)
            .await
            .map_err(|e| backend(e, "scan increment failed"))
    }
}
