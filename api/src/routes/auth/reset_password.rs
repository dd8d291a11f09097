//! POST /api/auth/reset-password/{token}

use actix_web::{web, HttpResponse};
use validator::Validate;

use sesame_core::repositories::AccountRepository;
use sesame_core::services::email::EmailServiceTrait;
use sesame_shared::types::ApiResponse;

use crate::dto::auth::ResetPasswordRequest;
use crate::dto::first_validation_message;
use crate::handlers::handle_domain_error;

use super::AppState;

/// Complete a password reset with the token from the emailed link
pub async fn reset_password<R, M>(
    state: web::Data<AppState<R, M>>,
    token: web::Path<String>,
    request: web::Json<ResetPasswordRequest>,
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
        .reset_password(&token, &request.password)
        .await
    {
        Ok(()) => HttpResponse::Ok().json(ApiResponse::<()>::message_only(
            "Password reset successfully",
        )),
        Err(e) => handle_domain_error(e),
    }
}
