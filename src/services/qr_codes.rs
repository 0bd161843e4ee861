use std::sync::Arc;

use mongodb::bson::oid::ObjectId;
use validator::Validate;

use crate::db::{QrCodeStore, StoreError};
use crate::error::{AppError, AppResult};
use crate::models::qr_code::{QrCode, QrCodePatch, Variant};
use crate::structs::qr_request::{CreateQrRequest, UpdateQrRequest};

/// Create, list, update and delete, always scoped to one owner.
///
/// A record owned by someone else is reported as [`AppError::NotFound`], never
/// as a permission error, so callers cannot probe for other owners' ids.
#[derive(Clone)]
pub struct QrCodeService {
    store: Arc<dyn QrCodeStore>,
}

impl QrCodeService {
    pub fn new(store: Arc<dyn QrCodeStore>) -> Self {
        Self { store }
    }

    pub async fn list_for_owner(&self, owner_id: &str) -> AppResult<Vec<QrCode>> {
        Ok(self.store.find_by_owner(owner_id).await?)
    }

    pub async fn create(&self, owner_id: &str, req: CreateQrRequest) -> AppResult<QrCode> {
        req.validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        let (Some(name), Some(short_id), Some(encoded_image), Some(variant)) =
            (req.name, req.short_id, req.encoded_image, req.variant)
        else {
            return Err(AppError::Validation("Missing required fields".into()));
        };

        match variant {
            Variant::Static if req.target_url.is_none() => {
                return Err(AppError::Validation(
                    "targetUrl is required for static QR codes".into(),
                ));
            }
            Variant::Dynamic if req.links.is_none() => {
                return Err(AppError::Validation(
                    "links are required for dynamic QR codes".into(),
                ));
            }
            _ => {}
        }

        let mut record = QrCode::new(owner_id.to_string(), short_id, name, variant, encoded_image);
        record.target_url = req.target_url;
        record.original_url = req.original_url;
        record.links = req.links.unwrap_or_default();

        match self.store.insert(record).await {
            Ok(saved) => {
                log::info!("QR code {} created for {}", saved.short_id, owner_id);
                Ok(saved)
            }
            Err(StoreError::DuplicateShortId) => {
                Err(AppError::Validation("shortId is already in use".into()))
            }
            Err(e) => Err(e.into()),
        }
    }

    pub async fn update(&self, owner_id: &str, id: &str, req: UpdateQrRequest) -> AppResult<QrCode> {
        let id = parse_id(id)?;
        req.validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        let patch = QrCodePatch::from(req);
        self.store
            .update_owned(id, owner_id, &patch)
            .await?
            .ok_or(AppError::NotFound)
    }

    pub async fn delete(&self, owner_id: &str, id: &str) -> AppResult<()> {
        let id = parse_id(id)?;
        if self.store.delete_owned(id, owner_id).await? {
            log::info!("QR code {} deleted by {}", id, owner_id);
            Ok(())
        } else {
            Err(AppError::NotFound)
        }
    }
}

fn parse_id(id: &str) -> AppResult<ObjectId> {
    ObjectId::parse_str(id).map_err(|_| AppError::InvalidId)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryStore;
    use crate::db::unreachable::UnreachableStore;
    use crate::models::qr_code::Link;

    fn service() -> (Arc<MemoryStore>, QrCodeService) {
        let store = Arc::new(MemoryStore::new());
        (store.clone(), QrCodeService::new(store))
    }

    fn dynamic_request(short_id: &str) -> CreateQrRequest {
        CreateQrRequest {
            name: Some("Promo".into()),
            short_id: Some(short_id.into()),
            links: Some(vec![Link {
                title: "Order".into(),
                url: "https://x.example".into(),
            }]),
            encoded_image: Some("data:image/png;base64,AAAA".into()),
            variant: Some(Variant::Dynamic),
            ..Default::default()
        }
    }

    #[actix_web::test]
    async fn create_forces_owner_and_fresh_counter() {
        let (_, service) = service();
        let saved = service.create("u1", dynamic_request("abc")).await.unwrap();

        assert_eq!(saved.owner_id, "u1");
        assert_eq!(saved.scans, 0);
        assert!(saved.id.is_some());
    }

    #[actix_web::test]
    async fn create_rejects_missing_fields_and_variant_data() {
        let (store, service) = service();

        let mut no_name = dynamic_request("a");
        no_name.name = None;
        assert!(matches!(
            service.create("u1", no_name).await,
            Err(AppError::Validation(_))
        ));

        let mut static_without_target = dynamic_request("b");
        static_without_target.variant = Some(Variant::Static);
        assert!(matches!(
            service.create("u1", static_without_target).await,
            Err(AppError::Validation(_))
        ));

        let mut dynamic_without_links = dynamic_request("c");
        dynamic_without_links.links = None;
        assert!(matches!(
            service.create("u1", dynamic_without_links).await,
            Err(AppError::Validation(_))
        ));

        let mut bad_link = dynamic_request("d");
        bad_link.links = Some(vec![Link {
            title: "Order".into(),
            url: "not a url".into(),
        }]);
        assert!(matches!(
            service.create("u1", bad_link).await,
            Err(AppError::Validation(_))
        ));

        assert!(store.is_empty().await);
    }

    #[actix_web::test]
    async fn dynamic_code_may_have_empty_link_list() {
        let (_, service) = service();
        let mut req = dynamic_request("abc");
        req.links = Some(Vec::new());
        let saved = service.create("u1", req).await.unwrap();
        assert!(saved.links.is_empty());
    }

    #[actix_web::test]
    async fn duplicate_short_id_is_a_validation_error() {
        let (store, service) = service();
        service.create("u1", dynamic_request("abc")).await.unwrap();

        let err = service
            .create("u2", dynamic_request("abc"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(store.len().await, 1);
    }

    #[actix_web::test]
    async fn update_merges_fields_and_keeps_counter() {
        let (store, service) = service();
        let saved = service.create("u1", dynamic_request("abc")).await.unwrap();
        store.record_scan("abc").await.unwrap();
        let id = saved.id.unwrap().to_hex();

        let updated = service
            .update(
                "u1",
                &id,
                UpdateQrRequest {
                    name: Some("Lunch".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.name, "Lunch");
        assert_eq!(updated.links, saved.links);
        assert_eq!(updated.short_id, "abc");
        assert_eq!(updated.scans, 1);
    }

    #[actix_web::test]
    async fn foreign_records_look_missing() {
        let (store, service) = service();
        let saved = service.create("u2", dynamic_request("abc")).await.unwrap();
        let id = saved.id.unwrap().to_hex();

        let update = UpdateQrRequest {
            name: Some("Mine now".into()),
            ..Default::default()
        };
        assert!(matches!(
            service.update("u1", &id, update).await,
            Err(AppError::NotFound)
        ));
        assert!(matches!(
            service.delete("u1", &id).await,
            Err(AppError::NotFound)
        ));

        let untouched = store.find_by_short_id("abc").await.unwrap().unwrap();
        assert_eq!(untouched.name, "Promo");
    }

    #[actix_web::test]
    async fn malformed_ids_are_rejected_before_store_access() {
        // Any store call would fail with AppError::Store.
        let service = QrCodeService::new(Arc::new(UnreachableStore));
        assert!(matches!(
            service.delete("u1", "not-an-id").await,
            Err(AppError::InvalidId)
        ));
        assert!(matches!(
            service
                .update("u1", "12345", UpdateQrRequest::default())
                .await,
            Err(AppError::InvalidId)
        ));
    }

    #[actix_web::test]
    async fn delete_removes_owned_record() {
        let (store, service) = service();
        let saved = service.create("u1", dynamic_request("abc")).await.unwrap();
        service
            .delete("u1", &saved.id.unwrap().to_hex())
            .await
            .unwrap();
        assert!(store.is_empty().await);
    }

    #[actix_web::test]
    async fn list_only_returns_callers_records() {
        let (_, service) = service();
        service.create("u1", dynamic_request("a")).await.unwrap();
        service.create("u2", dynamic_request("b")).await.unwrap();
        service.create("u1", dynamic_request("c")).await.unwrap();

        let mine = service.list_for_owner("u1").await.unwrap();
        assert_eq!(mine.len(), 2);
        assert!(mine.iter().all(|r| r.owner_id == "u1"));
    }
}
