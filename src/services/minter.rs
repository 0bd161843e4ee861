use std::sync::Arc;

use nanoid::nanoid;

use crate::db::QrCodeStore;
use crate::error::{AppError, AppResult};
use crate::structs::qr_request::MintedQr;
use crate::utils::qr_render::{QrImageFormat, render_data_url};

const MAX_ATTEMPTS: usize = 5;

/// Hands out unused short ids together with a rendered QR image that points
/// at this service's scan route. Nothing is persisted until the client
/// creates a record with the minted values.
#[derive(Clone)]
pub struct QrMinter {
    store: Arc<dyn QrCodeStore>,
    public_url: String,
    short_id_length: usize,
}

impl QrMinter {
    pub fn new(
        store: Arc<dyn QrCodeStore>,
        public_url: impl Into<String>,
        short_id_length: usize,
    ) -> Self {
        Self {
            store,
            public_url: public_url.into().trim_end_matches('/').to_string(),
            short_id_length,
        }
    }

    pub fn scan_url(&self, short_id: &str) -> String {
        format!("{}/qr/{}", self.public_url, short_id)
    }

    pub async fn mint(&self, format: QrImageFormat) -> AppResult<MintedQr> {
        let len = self.short_id_length;
        for _ in 0..MAX_ATTEMPTS {
            let short_id = nanoid!(len);
            if self.store.find_by_short_id(&short_id).await?.is_some() {
                log::warn!("Minted short id {} already taken, retrying", short_id);
                continue;
            }

            let scan_url = self.scan_url(&short_id);
            let encoded_image = render_data_url(&scan_url, format)?;
            return Ok(MintedQr {
                short_id,
                scan_url,
                encoded_image,
            });
        }

        Err(AppError::Internal(anyhow::anyhow!(
            "no free short id after {} attempts",
            MAX_ATTEMPTS
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryStore;

    #[actix_web::test]
    async fn minted_code_points_at_scan_route() {
        let minter = QrMinter::new(Arc::new(MemoryStore::new()), "https://api.example/", 12);
        let minted = minter.mint(QrImageFormat::Png).await.unwrap();

        assert_eq!(minted.short_id.len(), 12);
        assert_eq!(
            minted.scan_url,
            format!("https://api.example/qr/{}", minted.short_id)
        );
        assert!(minted.encoded_image.starts_with("data:image/png;base64,"));
    }

    #[actix_web::test]
    async fn svg_format_is_honoured() {
        let minter = QrMinter::new(Arc::new(MemoryStore::new()), "https://api.example", 8);
        let minted = minter.mint(QrImageFormat::Svg).await.unwrap();
        assert!(minted.encoded_image.starts_with("data:image/svg+xml;base64,"));
    }
}
