//! POST /api/auth/forgot-password

use actix_web::{web, HttpResponse};
use validator::Validate;

use sesame_core::repositories::AccountRepository;
use sesame_core::services::email::EmailServiceTrait;
use sesame_shared::types::ApiResponse;

use crate::dto::auth::ForgotPasswordRequest;
use crate::dto::first_validation_message;
use crate::handlers::handle_domain_error;

use super::AppState;

/// Email a password reset link to a registered address
pub async fn forgot_password<R, M>(
    state: web::Data<AppState<R, M>>,
    request: web::Json<ForgotPasswordRequest>,
) -> HttpResponse
where
    R: AccountRepository + 'static,
    M: EmailServiceTrait + 'static,
{
    if let Err(errors) = request.validate() {
        return HttpResponse::BadRequest()
            .json(ApiResponse::<()>::error(first_validation_message(&errors)));
    }

    match state.account_service.forgot_password(&request.email).await {
        Ok(()) => {
            HttpResponse::Ok().json(ApiResponse::<()>::message_only("Password reset email sent"))
        }
        Err(e) => handle_domain_error(e),
    }
}
