//! POST /api/auth/login

use actix_web::{web, HttpResponse};
use validator::Validate;

use sesame_core::repositories::AccountRepository;
use sesame_core::services::email::EmailServiceTrait;
use sesame_shared::types::ApiResponse;

use crate::dto::auth::{AuthData, LoginRequest, LoginResponse};
use crate::dto::first_validation_message;
use crate::handlers::handle_domain_error;

use super::{access_cookie, refresh_cookie, AppState};

/// Password login, issuing both session cookies.
///
/// Every failure path (unknown email, passwordless account, wrong
/// password) produces the same 400 body.
pub async fn login<R, M>(
    state: web::Data<AppState<R, M>>,
    request: web::Json<LoginRequest>,
) -> HttpResponse
where
    R: AccountRepository + 'static,
    M: EmailServiceTrait + 'static,
{
    if let Err(errors) = request.validate() {
        return HttpResponse::BadRequest()
            .json(ApiResponse::<()>::error(first_validation_message(&errors)));
    }

    match state
        .account_service
        .login(&request.email, &request.password)
        .await
    {
        Ok(result) => HttpResponse::Ok()
            .cookie(access_cookie(
                &result.tokens.access_token,
                state.secure_cookies,
            ))
            .cookie(refresh_cookie(
                &result.tokens.refresh_token,
                state.secure_cookies,
            ))
            .json(LoginResponse {
                success: true,
                message: "Logged in successfully".to_string(),
                data: AuthData {
                    user: result.account,
                },
                access_token: result.tokens.access_token,
                refresh_token: result.tokens.refresh_token,
            }),
        Err(e) => handle_domain_error(e),
    }
}
