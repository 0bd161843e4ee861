use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use thiserror::Error;

use crate::db::StoreError;

/// Outcome of a failed core operation.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("QR code not found")]
    NotFound,
    #[error("{0}")]
    Validation(String),
    #[error("Invalid QR code ID")]
    InvalidId,
    #[error("store error: {0}")]
    Store(#[from] StoreError),
    #[error("internal error: {0:#}")]
    Internal(#[from] anyhow::Error),
}

pub type AppResult<T> = Result<T, AppError>;

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Validation(_) | AppError::InvalidId => StatusCode::BAD_REQUEST,
            AppError::Store(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = match self {
            AppError::Store(e) => {
                log::error!("Store error: {:#}", e);
                "Server error".to_string()
            }
            AppError::Internal(e) => {
                log::error!("Internal error: {:#}", e);
                "Server error".to_string()
            }
            other => other.to_string(),
        };

        HttpResponse::build(self.status_code()).json(serde_json::json!({ "message": message }))
    }
}
