//! Sesame API server binary.

use std::sync::Arc;

use actix_web::{web, HttpServer};
use log::info;

use sesame_api::app::create_app;
use sesame_api::middleware::RateLimiter;
use sesame_api::routes::auth::AppState;
use sesame_core::services::{
    AccountService, AccountServiceConfig, TokenService, TokenServiceConfig,
};
use sesame_infra::database::create_pool;
use sesame_infra::{MySqlAccountRepository, ResendEmailService};
use sesame_shared::config::AppConfig;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = AppConfig::from_env()?;

    let pool = create_pool(&config.database).await?;
    info!("database pool ready");

    let repository = Arc::new(MySqlAccountRepository::new(pool));
    let email_service = Arc::new(ResendEmailService::new(config.email.clone())?);
    let token_service = Arc::new(TokenService::new(TokenServiceConfig::from(&config.auth))?);

    let account_service = Arc::new(AccountService::new(
        repository,
        email_service,
        token_service.clone(),
        AccountServiceConfig::default(),
    ));

    let app_state = web::Data::new(AppState {
        account_service,
        token_service,
        secure_cookies: config.server.secure_cookies,
    });

    let rate_limiter = RateLimiter::new(config.rate_limit.clone())?;
    let server_config = config.server.clone();
    let bind_address = config.server.bind_address();

    info!("listening on {}", bind_address);

    HttpServer::new(move || {
        create_app(app_state.clone(), rate_limiter.clone(), &server_config)
    })
    .bind(&bind_address)?
    .run()
    .await?;

    Ok(())
}
