//! POST /api/auth/signup

use actix_web::{web, HttpResponse};
use validator::Validate;

use sesame_core::repositories::AccountRepository;
use sesame_core::services::email::EmailServiceTrait;
use sesame_shared::types::ApiResponse;

use crate::dto::auth::{AuthData, SignupRequest, SignupResponse};
use crate::dto::first_validation_message;
use crate::handlers::handle_domain_error;

use super::{access_cookie, AppState};

/// Create an account and send its verification code.
///
/// Replies 201 with the new account, an access token in the body and the
/// matching cookie; the account stays unverified until the emailed code
/// is submitted.
pub async fn signup<R, M>(
    state: web::Data<AppState<R, M>>,
    request: web::Json<SignupRequest>,
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
        .signup(&request.name, &request.email, &request.password)
        .await
    {
        Ok(result) => HttpResponse::Created()
            .cookie(access_cookie(&result.access_token, state.secure_cookies))
            .json(SignupResponse {
                success: true,
                message: "Account created successfully".to_string(),
                data: AuthData {
                    user: result.account,
                },
                token: result.access_token,
            }),
        Err(e) => handle_domain_error(e),
    }
}
