use actix_web::{HttpRequest, HttpResponse, Result, web};

use crate::middlewares::authmw::owner_id;
use crate::state::app_state::AppState;
use crate::structs::qr_request::{
    CreateQrRequest, MintParams, QrCodeResponse, UpdateQrRequest,
};

/// `GET /api/qrcodes/user`
pub async fn get_user_qr_codes(
    app_state: web::Data<AppState>,
    req: HttpRequest,
) -> Result<HttpResponse> {
    let owner = owner_id(&req)?;
    let qr_codes = app_state.qr_codes.list_for_owner(&owner).await?;

    let response: Vec<QrCodeResponse> = qr_codes.into_iter().map(QrCodeResponse::from).collect();
    Ok(HttpResponse::Ok().json(response))
}

/// `POST /api/qrcodes`
pub async fn create_qr_code(
    app_state: web::Data<AppState>,
    req: HttpRequest,
    web::Json(body): web::Json<CreateQrRequest>,
) -> Result<HttpResponse> {
    let owner = owner_id(&req)?;
    let saved = app_state.qr_codes.create(&owner, body).await?;

    Ok(HttpResponse::Created().json(QrCodeResponse::from(saved)))
}

/// `PUT /api/qrcodes/{id}`
pub async fn update_qr_code(
    app_state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<String>,
    web::Json(body): web::Json<UpdateQrRequest>,
) -> Result<HttpResponse> {
    let owner = owner_id(&req)?;
    let updated = app_state
        .qr_codes
        .update(&owner, &path.into_inner(), body)
        .await?;

    Ok(HttpResponse::Ok().json(QrCodeResponse::from(updated)))
}

/// `DELETE /api/qrcodes/{id}`
pub async fn delete_qr_code(
    app_state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let owner = owner_id(&req)?;
    app_state.qr_codes.delete(&owner, &path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({ "message": "QR code deleted" })))
}

/// `GET /api/qrcodes/mint`: a fresh short id plus its rendered image, to be
/// passed back on create.
pub async fn mint_qr_code(
    app_state: web::Data<AppState>,
    query: web::Query<MintParams>,
) -> Result<HttpResponse> {
    let minted = app_state
        .minter
        .mint(query.format.unwrap_or_default())
        .await?;

    Ok(HttpResponse::Ok().json(minted))
}
