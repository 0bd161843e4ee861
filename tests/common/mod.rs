#![allow(dead_code)]

use std::sync::Arc;

use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::test;
use async_trait::async_trait;
use jsonwebtoken::{EncodingKey, Header, encode};
use mongodb::bson::oid::ObjectId;

use qrdeck::db::{QrCodeStore, StoreError, StoreResult};
use qrdeck::models::qr_code::{Link, QrCode, QrCodePatch, Variant};
use qrdeck::state::app_state::AppState;
use qrdeck::utils::jwt::{Claims, JwtVerifier};

pub const SECRET: &str = "integration-secret";
pub const FRONTEND_URL: &str = "https://front.example";
pub const PUBLIC_URL: &str = "https://api.example";

/// Build the full application around `$store` (an `Arc<dyn QrCodeStore>`)
/// and initialise it as a test service.
macro_rules! test_app {
    ($store:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .wrap(qrdeck::middlewares::cors::build_cors(&[
                    $crate::common::FRONTEND_URL.to_string(),
                ]))
                .app_data($crate::common::app_state($store))
                .app_data($crate::common::verifier())
                .app_data(qrdeck::routes::json_config())
                .configure(qrdeck::routes::init_routes),
        )
        .await
    };
}

/// Status of a request, whether the app answered with a response or a
/// middleware short-circuited with an error.
pub async fn status_of<S, R, B>(app: &S, req: R) -> StatusCode
where
    S: Service<R, Response = ServiceResponse<B>, Error = actix_web::Error>,
{
    match test::try_call_service(app, req).await {
        Ok(resp) => resp.status(),
        Err(err) => err.as_response_error().status_code(),
    }
}

pub fn app_state(store: Arc<dyn QrCodeStore>) -> actix_web::web::Data<AppState> {
    actix_web::web::Data::new(AppState::new(store, FRONTEND_URL, PUBLIC_URL, 10))
}

pub fn verifier() -> actix_web::web::Data<JwtVerifier> {
    actix_web::web::Data::new(JwtVerifier::from_secret(SECRET))
}

pub fn bearer(owner: &str) -> (&'static str, String) {
    let now = chrono::Utc::now().timestamp();
    let claims = Claims {
        sub: owner.to_string(),
        exp: (now + 600) as usize,
        iat: Some(now as usize),
        iss: None,
    };
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(SECRET.as_bytes()),
    )
    .unwrap();
    ("Authorization", format!("Bearer {}", token))
}

pub fn menu_record(owner: &str, short_id: &str, scans: i64) -> QrCode {
    let mut qr = QrCode::new(
        owner.into(),
        short_id.into(),
        "Menu".into(),
        Variant::Dynamic,
        "data:image/png;base64,AAAA".into(),
    );
    qr.links = vec![Link {
        title: "Order".into(),
        url: "https://x".into(),
    }];
    qr.scans = scans;
    qr
}

/// A store whose backend is never reachable.
pub struct UnreachableStore;

fn unreachable_err() -> StoreError {
    StoreError::Backend(anyhow::anyhow!("connection refused"))
}

#[async_trait]
impl QrCodeStore for UnreachableStore {
    async fn ping(&self) -> StoreResult<()> {
        Err(unreachable_err())
    }
    async fn insert(&self, _record: QrCode) -> StoreResult<QrCode> {
        Err(unreachable_err())
    }
    async fn find_by_short_id(&self, _short_id: &str) -> StoreResult<Option<QrCode>> {
        Err(unreachable_err())
    }
    async fn find_by_owner(&self, _owner_id: &str) -> StoreResult<Vec<QrCode>> {
        Err(unreachable_err())
    }
    async fn find_owned(&self, _id: ObjectId, _owner_id: &str) -> StoreResult<Option<QrCode>> {
        Err(unreachable_err())
    }
    async fn update_owned(
        &self,
        _id: ObjectId,
        _owner_id: &str,
        _patch: &QrCodePatch,
    ) -> StoreResult<Option<QrCode>> {
        Err(unreachable_err())
    }
    async fn delete_owned(&self, _id: ObjectId, _owner_id: &str) -> StoreResult<bool> {
        Err(unreachable_err())
    }
    async fn record_scan(&self, _short_id: &str) -> StoreResult<Option<QrCode>> {
        Err(unreachable_err())
    }
}
