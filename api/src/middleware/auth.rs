//! JWT authentication middleware.
//!
//! Accepts the access token from the `accessToken` cookie (browser
//! clients) or an `Authorization: Bearer` header (everything else),
//! verifies it, and stores an [`AuthContext`] in the request extensions
//! for the handler. Requests without a valid token get a 401 with the
//! standard envelope.

use std::future::{ready, Ready};
use std::rc::Rc;
use std::sync::Arc;

use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header;
use actix_web::{Error, HttpMessage, HttpResponse};
use futures_util::future::LocalBoxFuture;
use uuid::Uuid;

use sesame_core::services::token::TokenService;
use sesame_shared::types::ApiResponse;

/// Cookie carrying the access token
pub const ACCESS_COOKIE: &str = "accessToken";

/// Verified identity of the caller, set by [`JwtAuth`]
#[derive(Debug, Clone)]
pub struct AuthContext {
    /// Account id from the token subject
    pub account_id: Uuid,
    /// The raw access token the request presented
    pub access_token: String,
}

/// Middleware factory guarding routes that require a valid access token
pub struct JwtAuth {
    token_service: Arc<TokenService>,
}

impl JwtAuth {
    pub fn new(token_service: Arc<TokenService>) -> Self {
        Self { token_service }
    }
}

impl<S, B> Transform<S, ServiceRequest> for JwtAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = JwtAuthMiddleware<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtAuthMiddleware {
            service: Rc::new(service),
            token_service: self.token_service.clone(),
        }))
    }
}

pub struct JwtAuthMiddleware<S> {
    service: Rc<S>,
    token_service: Arc<TokenService>,
}

/// Access token from the auth cookie, falling back to a Bearer header
fn extract_token(req: &ServiceRequest) -> Option<String> {
    if let Some(cookie) = req.cookie(ACCESS_COOKIE) {
        return Some(cookie.value().to_string());
    }

    req.headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(|token| token.to_string())
}

fn unauthorized<B>(req: ServiceRequest) -> ServiceResponse<EitherBody<B>> {
    let (request, _) = req.into_parts();
    let response = HttpResponse::Unauthorized()
        .json(ApiResponse::<()>::error("Unauthorized"))
        .map_into_right_body();
    ServiceResponse::new(request, response)
}

impl<S, B> Service<ServiceRequest> for JwtAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();
        let token_service = self.token_service.clone();

        Box::pin(async move {
            let token = extract_token(&req);
            let account_id = token
                .as_deref()
                .and_then(|t| token_service.verify_access_token(t))
                .and_then(|claims| claims.account_id().ok());

            match (token, account_id) {
                (Some(access_token), Some(account_id)) => {
                    req.extensions_mut().insert(AuthContext {
                        account_id,
                        access_token,
                    });
                    service
                        .call(req)
                        .await
                        .map(ServiceResponse::map_into_left_body)
                }
                _ => Ok(unauthorized(req)),
            }
        })
    }
}
