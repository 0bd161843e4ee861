use std::sync::Arc;

use crate::db::QrCodeStore;
use crate::error::{AppError, AppResult};
use crate::models::qr_code::is_url_safe_short_id;
use crate::structs::qr_request::LandingPayload;

/// Turns public short ids into landing data, counting one scan per call.
#[derive(Clone)]
pub struct Resolver {
    store: Arc<dyn QrCodeStore>,
    frontend_url: String,
}

impl Resolver {
    pub fn new(store: Arc<dyn QrCodeStore>, frontend_url: impl Into<String>) -> Self {
        Self {
            store,
            frontend_url: frontend_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Count a scan of `short_id` and return what the landing page shows.
    ///
    /// The increment and the read are one store operation, so the returned
    /// payload always reflects a persisted scan. Repeated calls are counted
    /// separately.
    pub async fn resolve(&self, short_id: &str) -> AppResult<LandingPayload> {
        if !is_url_safe_short_id(short_id) {
            log::info!("Rejected short id {:?}", short_id);
            return Err(AppError::NotFound);
        }

        match self.store.record_scan(short_id).await {
            Ok(Some(record)) => {
                log::debug!("Scan recorded for {} (total {})", short_id, record.scans);
                Ok(LandingPayload::from(record))
            }
            Ok(None) => {
                log::info!("QR code not found: {}", short_id);
                Err(AppError::NotFound)
            }
            Err(e) => {
                log::error!("Failed to record scan for {}: {:#}", short_id, e);
                Err(AppError::Store(e))
            }
        }
    }

    /// Frontend route that renders the landing page for `short_id`. Only
    /// short ids accepted by [`Resolver::resolve`] are safe to pass here.
    pub fn redirect_target(&self, short_id: &str) -> String {
        format!("{}/landing/{}", self.frontend_url, short_id)
    }
}
