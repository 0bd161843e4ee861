use actix_web::{HttpResponse, error, web};

use crate::handlers::health_handlers::health_check;
use crate::handlers::qr_handlers::{
    create_qr_code, delete_qr_code, get_user_qr_codes, mint_qr_code, update_qr_code,
};
use crate::handlers::scan_handlers::{get_landing, redirect_to_landing};
use crate::middlewares::authmw::JwtAuth;

/// Configure the routes
pub fn init_routes(cfg: &mut web::ServiceConfig) {
    // Public scan routes, registered ahead of the protected scope
    cfg.route("/qr/{short_id}", web::get().to(redirect_to_landing));
    cfg.route(
        "/api/qrcodes/landing/{short_id}",
        web::get().to(get_landing),
    );
    cfg.route("/api/health/check", web::get().to(health_check));

    // Owner-scoped API, requires a bearer token
    cfg.service(
        web::scope("/api/qrcodes")
            .wrap(JwtAuth)
            .route("", web::post().to(create_qr_code))
            .route("/", web::post().to(create_qr_code))
            .route("/user", web::get().to(get_user_qr_codes))
            .route("/mint", web::get().to(mint_qr_code))
            .route("/{id}", web::put().to(update_qr_code))
            .route("/{id}", web::delete().to(delete_qr_code)),
    );
}

/// Malformed JSON bodies get the same `{ message }` shape as other 400s.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let message = err.to_string();
        error::InternalError::from_response(
            err,
            HttpResponse::BadRequest().json(serde_json::json!({ "message": message })),
        )
        .into()
    })
}
