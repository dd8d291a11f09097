//! Application factory.
//!
//! Builds the complete actix `App` so the binary and the integration
//! tests assemble exactly the same routing, middleware and state.

use actix_web::body::MessageBody;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::middleware::Logger;
use actix_web::{web, App, Error, HttpResponse};

use sesame_core::repositories::AccountRepository;
use sesame_core::services::email::EmailServiceTrait;
use sesame_shared::config::ServerConfig;
use sesame_shared::types::ApiResponse;

use crate::middleware::{create_cors, JwtAuth, RateLimiter};
use crate::routes;
use crate::routes::auth::{self, AppState};
use crate::routes::passwordless;

async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::<()>::error("Route not found"))
}

/// Build the application with all routes and middleware configured
pub fn create_app<R, M>(
    app_state: web::Data<AppState<R, M>>,
    rate_limiter: RateLimiter,
    server_config: &ServerConfig,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = Error,
        InitError = (),
    >,
>
where
    R: AccountRepository + 'static,
    M: EmailServiceTrait + 'static,
{
    let jwt_auth = JwtAuth::new(app_state.token_service.clone());

    App::new()
        .app_data(app_state)
        .wrap(Logger::default())
        .wrap(create_cors(server_config))
        .route("/health", web::get().to(routes::health))
        .service(
            web::scope("/api")
                .wrap(rate_limiter)
                .service(
                    web::scope("/auth")
                        .route("/signup", web::post().to(auth::signup::signup::<R, M>))
                        .route("/login", web::post().to(auth::login::login::<R, M>))
                        .route("/logout", web::post().to(auth::logout::logout::<R, M>))
                        .route(
                            "/verify-email",
                            web::post().to(auth::verify_email::verify_email::<R, M>),
                        )
                        .route(
                            "/forgot-password",
                            web::post().to(auth::forgot_password::forgot_password::<R, M>),
                        )
                        .route(
                            "/reset-password/{token}",
                            web::post().to(auth::reset_password::reset_password::<R, M>),
                        )
                        .route("/refresh", web::post().to(auth::refresh::refresh::<R, M>))
                        .service(
                            web::resource("/check-auth")
                                .wrap(jwt_auth)
                                .route(web::get().to(auth::check_auth::check_auth::<R, M>)),
                        ),
                )
                .service(
                    web::scope("/login")
                        .route(
                            "/magic-request",
                            web::post().to(passwordless::magic_request::magic_request::<R, M>),
                        )
                        .route(
                            "/magic-login",
                            web::get().to(passwordless::magic_login::magic_login::<R, M>),
                        ),
                ),
        )
        .default_service(web::route().to(not_found))
}
