//! Fixed-window rate limiting for the auth routes.
//!
//! One Redis counter per client IP per route group (`auth`, `login`),
//! incremented on every POST. The first hit in a window sets the expiry;
//! once the counter passes the limit the request gets a 429 until the
//! key expires. GETs (check-auth, magic-login) are not counted.
//!
//! Redis being unreachable fails open: the request proceeds and the
//! error is logged.

use std::future::{ready, Ready};
use std::rc::Rc;
use std::sync::Arc;

use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::Method;
use actix_web::{Error, HttpResponse};
use futures_util::future::LocalBoxFuture;
use log::warn;
use redis::AsyncCommands;
use serde_json::json;

use sesame_shared::config::RateLimitConfig;

/// Middleware factory for the fixed-window limiter
#[derive(Clone)]
pub struct RateLimiter {
    client: Option<Arc<redis::Client>>,
    config: RateLimitConfig,
}

impl RateLimiter {
    /// Build a limiter from configuration.
    ///
    /// Opening the client validates the URL but does not connect;
    /// connections are established lazily per request.
    pub fn new(config: RateLimitConfig) -> Result<Self, redis::RedisError> {
        let client = if config.enabled {
            Some(Arc::new(redis::Client::open(config.redis_url.as_str())?))
        } else {
            None
        };
        Ok(Self { client, config })
    }

    /// A limiter that passes everything through (tests, local development)
    pub fn disabled() -> Self {
        Self {
            client: None,
            config: RateLimitConfig::development(),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for RateLimiter
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = RateLimiterMiddleware<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RateLimiterMiddleware {
            service: Rc::new(service),
            client: self.client.clone(),
            config: self.config.clone(),
        }))
    }
}

pub struct RateLimiterMiddleware<S> {
    service: Rc<S>,
    client: Option<Arc<redis::Client>>,
    config: RateLimitConfig,
}

/// Route group for the counter key, e.g. `/api/auth/login` -> `auth`
fn route_group(path: &str) -> &str {
    path.trim_start_matches("/api/")
        .trim_start_matches('/')
        .split('/')
        .next()
        .filter(|segment| !segment.is_empty())
        .unwrap_or("root")
}

fn too_many_requests<B>(
    req: ServiceRequest,
    retry_after_secs: u64,
) -> ServiceResponse<EitherBody<B>> {
    let (request, _) = req.into_parts();
    let response = HttpResponse::TooManyRequests()
        .json(json!({
            "success": false,
            "message": "Too many requests, please try again later",
            "retryAfter": retry_after_secs,
        }))
        .map_into_right_body();
    ServiceResponse::new(request, response)
}

impl<S, B> Service<ServiceRequest> for RateLimiterMiddleware<S>
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
        let client = self.client.clone();
        let config = self.config.clone();

        let key = {
            let connection_info = req.connection_info();
            let ip = connection_info.realip_remote_addr().unwrap_or("unknown");
            format!("rate_limit:{}:{}", route_group(req.path()), ip)
        };

        Box::pin(async move {
            let counted = config.enabled && req.method() == Method::POST;
            let Some(client) = client.filter(|_| counted) else {
                return service
                    .call(req)
                    .await
                    .map(ServiceResponse::map_into_left_body);
            };

            match current_count(&client, &key, config.window_secs).await {
                Ok(count) if count > config.max_requests => {
                    warn!("rate limit exceeded for {}", key);
                    Ok(too_many_requests(req, config.window_secs))
                }
                Ok(_) => service
                    .call(req)
                    .await
                    .map(ServiceResponse::map_into_left_body),
                Err(e) => {
                    warn!("rate limiter unavailable, letting request through: {}", e);
                    service
                        .call(req)
                        .await
                        .map(ServiceResponse::map_into_left_body)
                }
            }
        })
    }
}

/// Increment the window counter and return its new value
async fn current_count(
    client: &redis::Client,
    key: &str,
    window_secs: u64,
) -> Result<u32, redis::RedisError> {
    let mut conn = client.get_async_connection().await?;

    let count: u32 = conn.incr(key, 1u32).await?;
    if count == 1 {
        let _: bool = conn.expire(key, window_secs as i64).await?;
    }

    Ok(count)
}
