use actix_cors::Cors;
use actix_web::http::{self, header::HeaderValue};

/// CORS policy for the browser frontends listed in `allowed_origins`.
///
/// Requests without an `Origin` header (curl, mobile apps, QR scanners
/// following the redirect) are not affected; unknown origins are refused.
pub fn build_cors(allowed_origins: &[String]) -> Cors {
    let allowed = allowed_origins.to_vec();

    Cors::default()
        .allowed_origin_fn(move |origin: &HeaderValue, _req_head| {
            let ok = origin
                .to_str()
                .map(|o| allowed.iter().any(|a| a == o))
                .unwrap_or(false);
            if !ok {
                log::warn!("Blocked origin: {:?}", origin);
            }
            ok
        })
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
        .allowed_headers(vec![
            http::header::CONTENT_TYPE,
            http::header::AUTHORIZATION,
            http::header::ACCEPT,
            http::header::ORIGIN,
        ])
        .expose_headers(vec![http::header::CONTENT_LENGTH, http::header::CONTENT_TYPE])
        .supports_credentials()
        .max_age(3600)
}
