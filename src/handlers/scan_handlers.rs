use actix_web::{HttpResponse, Responder, http, web};

use crate::error::AppError;
use crate::state::app_state::AppState;

/// `GET /qr/{short_id}`: the URL encoded in printed QR codes.
pub async fn redirect_to_landing(
    app_state: web::Data<AppState>,
    path: web::Path<String>,
) -> impl Responder {
    let short_id = path.into_inner();

    match app_state.resolver.resolve(&short_id).await {
        Ok(_) => HttpResponse::Found()
            .append_header((
                http::header::LOCATION,
                app_state.resolver.redirect_target(&short_id),
            ))
            .finish(),
        Err(AppError::NotFound) => HttpResponse::NotFound()
            .content_type("text/plain; charset=utf-8")
            .body("QR code not found"),
        Err(_) => HttpResponse::InternalServerError()
            .content_type("text/plain; charset=utf-8")
            .body("Server error"),
    }
}

/// `GET /api/qrcodes/landing/{short_id}`: landing data for the frontend.
pub async fn get_landing(
    app_state: web::Data<AppState>,
    path: web::Path<String>,
) -> impl Responder {
    let short_id = path.into_inner();

    match app_state.resolver.resolve(&short_id).await {
        Ok(payload) => HttpResponse::Ok().json(payload),
        Err(AppError::NotFound) => HttpResponse::NotFound().json(serde_json::json!({
            "error": "QR code not found"
        })),
        Err(_) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": "Server error"
        })),
    }
}
