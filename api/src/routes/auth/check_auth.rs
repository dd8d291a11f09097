//! GET /api/auth/check-auth

use actix_web::{web, HttpMessage, HttpRequest, HttpResponse};

use sesame_core::repositories::AccountRepository;
use sesame_core::services::email::EmailServiceTrait;
use sesame_shared::types::ApiResponse;

use crate::dto::auth::AuthData;
use crate::handlers::handle_domain_error;
use crate::middleware::AuthContext;

use super::AppState;

/// Resolve the presented access token to its account.
///
/// Sits behind the JWT middleware, which rejects requests without a
/// valid token before this handler runs.
pub async fn check_auth<R, M>(
    state: web::Data<AppState<R, M>>,
    req: HttpRequest,
) -> HttpResponse
where
    R: AccountRepository + 'static,
    M: EmailServiceTrait + 'static,
{
    let access_token = match req.extensions().get::<AuthContext>() {
        Some(context) => context.access_token.clone(),
        None => {
            return HttpResponse::Unauthorized().json(ApiResponse::<()>::error("Unauthorized"))
        }
    };

    match state.account_service.check_auth(&access_token).await {
        Ok(account) => HttpResponse::Ok().json(ApiResponse::success(
            "Authenticated",
            AuthData { user: account },
        )),
        Err(e) => handle_domain_error(e),
    }
}
