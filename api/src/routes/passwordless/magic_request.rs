//! POST /api/login/magic-request

use actix_web::{web, HttpResponse};
use validator::Validate;

use sesame_core::repositories::AccountRepository;
use sesame_core::services::email::EmailServiceTrait;
use sesame_shared::types::ApiResponse;

use crate::dto::auth::MagicRequestRequest;
use crate::dto::first_validation_message;
use crate::handlers::handle_domain_error;

use crate::routes::auth::AppState;

/// Email a one-time login link.
///
/// Unknown addresses get an account created on the spot, so the 200
/// response never reveals whether the email was already registered.
pub async fn magic_request<R, M>(
    state: web::Data<AppState<R, M>>,
    request: web::Json<MagicRequestRequest>,
) -> HttpResponse
where
    R: AccountRepository + 'static,
    M: EmailServiceTrait + 'static,
{
    if let Err(errors) = request.validate() {
        return HttpResponse::BadRequest()
            .json(ApiResponse::<()>::error(first_validation_message(&errors)));
    }

    match state.account_service.magic_request(&request.email).await {
        Ok(()) => HttpResponse::Ok().json(ApiResponse::<()>::message_only("Magic link sent!")),
        Err(e) => handle_domain_error(e),
    }
}
