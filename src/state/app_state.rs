use std::sync::Arc;

use crate::config::AppConfig;
use crate::db::QrCodeStore;
use crate::services::{QrCodeService, QrMinter, Resolver};

/// Shared by every worker; all services hold the same store handle.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn QrCodeStore>,
    pub resolver: Resolver,
    pub qr_codes: QrCodeService,
    pub minter: QrMinter,
}

impl AppState {
    pub fn new(
        store: Arc<dyn QrCodeStore>,
        frontend_url: &str,
        public_url: &str,
        short_id_length: usize,
    ) -> Self {
        Self {
            resolver: Resolver::new(store.clone(), frontend_url),
            qr_codes: QrCodeService::new(store.clone()),
            minter: QrMinter::new(store.clone(), public_url, short_id_length),
            store,
        }
    }

    pub fn from_config(store: Arc<dyn QrCodeStore>, config: &AppConfig) -> Self {
        Self::new(
            store,
            &config.frontend_url,
            &config.public_url,
            config.short_id_length,
        )
    }
}
