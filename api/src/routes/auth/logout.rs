//! POST /api/auth/logout

use actix_web::{web, HttpResponse};

use sesame_core::repositories::AccountRepository;
use sesame_core::services::email::EmailServiceTrait;
use sesame_shared::types::ApiResponse;

use super::{expired_cookie, AppState, ACCESS_COOKIE, REFRESH_COOKIE};

/// Clear both session cookies.
///
/// Purely client-side state: tokens are not tracked server-side, so
/// logout always succeeds, even without a session.
pub async fn logout<R, M>(state: web::Data<AppState<R, M>>) -> HttpResponse
where
    R: AccountRepository + 'static,
    M: EmailServiceTrait + 'static,
{
    HttpResponse::Ok()
        .cookie(expired_cookie(ACCESS_COOKIE, state.secure_cookies))
        .cookie(expired_cookie(REFRESH_COOKIE, state.secure_cookies))
        .json(ApiResponse::<()>::message_only("Logged out successfully"))
}
