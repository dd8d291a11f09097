//! GET /api/login/magic-login

use actix_web::{web, HttpResponse};

use sesame_core::repositories::AccountRepository;
use sesame_core::services::email::EmailServiceTrait;

use crate::dto::auth::{MagicLoginQuery, MagicLoginResponse};
use crate::handlers::handle_domain_error;

use crate::routes::auth::{access_cookie, refresh_cookie, AppState};

/// Complete a magic link login with the token from the emailed URL.
///
/// Only logs in accounts that already exist; the account is created by
/// `magic_request`, never here.
pub async fn magic_login<R, M>(
    state: web::Data<AppState<R, M>>,
    query: web::Query<MagicLoginQuery>,
) -> HttpResponse
where
    R: AccountRepository + 'static,
    M: EmailServiceTrait + 'static,
{
    match state.account_service.magic_login(&query.token).await {
        Ok(result) => HttpResponse::Ok()
            .cookie(access_cookie(
                &result.tokens.access_token,
                state.secure_cookies,
            ))
            .cookie(refresh_cookie(
                &result.tokens.refresh_token,
                state.secure_cookies,
            ))
            .json(MagicLoginResponse {
                success: true,
                access_token: result.tokens.access_token,
            }),
        Err(e) => handle_domain_error(e),
    }
}
