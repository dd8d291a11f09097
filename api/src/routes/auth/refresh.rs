//! POST /api/auth/refresh

use actix_web::{web, HttpRequest, HttpResponse};

use sesame_core::repositories::AccountRepository;
use sesame_core::services::email::EmailServiceTrait;
use sesame_shared::types::ApiResponse;

use crate::dto::auth::RefreshResponse;
use crate::handlers::handle_domain_error;

use super::{access_cookie, AppState, REFRESH_COOKIE};

/// Mint a fresh access token from the refresh cookie.
///
/// The refresh token stays valid; only the access token is replaced.
pub async fn refresh<R, M>(state: web::Data<AppState<R, M>>, req: HttpRequest) -> HttpResponse
where
    R: AccountRepository + 'static,
    M: EmailServiceTrait + 'static,
{
    let Some(cookie) = req.cookie(REFRESH_COOKIE) else {
        return HttpResponse::Unauthorized().json(ApiResponse::<()>::error("Unauthorized"));
    };

    match state
        .account_service
        .refresh_access_token(cookie.value())
        .await
    {
        Ok(token) => HttpResponse::Ok()
            .cookie(access_cookie(&token, state.secure_cookies))
            .json(RefreshResponse {
                success: true,
                message: "Token refreshed".to_string(),
                token,
            }),
        Err(e) => handle_domain_error(e),
    }
}
