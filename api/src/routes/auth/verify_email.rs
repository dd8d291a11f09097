//! POST /api/auth/verify-email

use actix_web::{web, HttpResponse};
use validator::Validate;

use sesame_core::repositories::AccountRepository;
use sesame_core::services::email::EmailServiceTrait;
use sesame_shared::types::ApiResponse;

use crate::dto::auth::{AuthData, VerifyEmailRequest};
use crate::dto::first_validation_message;
use crate::handlers::handle_domain_error;

use super::AppState;

/// Consume a verification code and mark the account verified
pub async fn verify_email<R, M>(
    state: web::Data<AppState<R, M>>,
    request: web::Json<VerifyEmailRequest>,
) -> HttpResponse
where
    R: AccountRepository + 'static,
    M: EmailServiceTrait + 'static,
{
    if let Err(errors) = request.validate() {
        return HttpResponse::BadRequest()
            .json(ApiResponse::<()>::error(first_validation_message(&errors)));
    }

    match state.account_service.verify_email(&request.code).await {
        Ok(account) => HttpResponse::Created().json(ApiResponse::success(
            "Email verified successfully",
            AuthData { user: account },
        )),
        Err(e) => handle_domain_error(e),
    }
}
