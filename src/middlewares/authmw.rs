use std::future::{Ready, ready};

use actix_web::{
    Error, HttpMessage, HttpRequest,
    dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
    error::{ErrorInternalServerError, ErrorUnauthorized},
    http::header,
    web,
};
use futures_util::future::LocalBoxFuture;

use crate::utils::jwt::JwtVerifier;

/// Identity of the authenticated caller, inserted into request extensions by
/// [`JwtAuth`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnerId(pub String);

/// Read the owner identity placed on the request by [`JwtAuth`].
pub fn owner_id(req: &HttpRequest) -> Result<String, Error> {
    req.extensions()
        .get::<OwnerId>()
        .map(|owner| owner.0.clone())
        .ok_or_else(|| ErrorUnauthorized("Authentication required"))
}

/// Requires a valid `Authorization: Bearer <jwt>` header. The verifier is
/// read from app data as `web::Data<JwtVerifier>`.
pub struct JwtAuth;

impl<S, B> Transform<S, ServiceRequest> for JwtAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = JwtAuthMiddleware<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtAuthMiddleware { service }))
    }
}

pub struct JwtAuthMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for JwtAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let verifier = match req.app_data::<web::Data<JwtVerifier>>() {
            Some(verifier) => verifier.clone(),
            None => {
                log::error!("JwtVerifier missing from app data");
                return Box::pin(async move { Err(ErrorInternalServerError("Server error")) });
            }
        };

        let auth_header = match req.headers().get(header::AUTHORIZATION) {
            Some(header) => header,
            None => {
                return Box::pin(async move { Err(ErrorUnauthorized("No authorization header")) });
            }
        };

        let auth_header_str = match auth_header.to_str() {
            Ok(header_str) => header_str,
            Err(_) => {
                return Box::pin(
                    async move { Err(ErrorUnauthorized("Invalid authorization header")) },
                );
            }
        };

        let token = match auth_header_str.strip_prefix("Bearer ") {
            Some(token) => token.trim(),
            None => {
                return Box::pin(
                    async move { Err(ErrorUnauthorized("Invalid authorization format")) },
                );
            }
        };

        let claims = match verifier.validate_token(token) {
            Ok(claims) => claims,
            Err(e) => {
                log::debug!("Rejected bearer token: {:#}", e);
                return Box::pin(async move { Err(ErrorUnauthorized("Invalid token")) });
            }
        };

        req.extensions_mut().insert(OwnerId(claims.sub));

        Box::pin(self.service.call(req))
    }
}
