//! Routes under `/api/auth`.
//!
//! Shared state and the cookie policy live here; each operation has its
//! own handler module.

pub mod check_auth;
pub mod forgot_password;
pub mod login;
pub mod logout;
pub mod refresh;
pub mod reset_password;
pub mod signup;
pub mod verify_email;

use std::sync::Arc;

use actix_web::cookie::time::Duration;
use actix_web::cookie::{Cookie, SameSite};

use sesame_core::domain::entities::token::{
    ACCESS_TOKEN_EXPIRY_MINUTES, REFRESH_TOKEN_EXPIRY_DAYS,
};
use sesame_core::repositories::AccountRepository;
use sesame_core::services::email::EmailServiceTrait;
use sesame_core::services::{AccountService, TokenService};

pub use crate::middleware::auth::ACCESS_COOKIE;

/// Cookie carrying the refresh token
pub const REFRESH_COOKIE: &str = "refreshToken";

/// Shared application state injected into every handler
pub struct AppState<R: AccountRepository, M: EmailServiceTrait> {
    pub account_service: Arc<AccountService<R, M>>,
    pub token_service: Arc<TokenService>,
    /// Set the `Secure` attribute on auth cookies
    pub secure_cookies: bool,
}

fn auth_cookie(
    name: &'static str,
    value: &str,
    max_age: Duration,
    secure: bool,
) -> Cookie<'static> {
    Cookie::build(name, value.to_string())
        .path("/")
        .http_only(true)
        .same_site(SameSite::Strict)
        .secure(secure)
        .max_age(max_age)
        .finish()
}

/// Access token cookie, aligned with the token's own expiry
pub fn access_cookie(token: &str, secure: bool) -> Cookie<'static> {
    auth_cookie(
        ACCESS_COOKIE,
        token,
        Duration::minutes(ACCESS_TOKEN_EXPIRY_MINUTES),
        secure,
    )
}

/// Refresh token cookie, aligned with the token's own expiry
pub fn refresh_cookie(token: &str, secure: bool) -> Cookie<'static> {
    auth_cookie(
        REFRESH_COOKIE,
        token,
        Duration::days(REFRESH_TOKEN_EXPIRY_DAYS),
        secure,
    )
}

/// An immediately expiring cookie that clears the named auth cookie
pub fn expired_cookie(name: &'static str, secure: bool) -> Cookie<'static> {
    auth_cookie(name, "", Duration::ZERO, secure)
}
