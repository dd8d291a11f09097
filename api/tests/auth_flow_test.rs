//! End-to-end HTTP tests over the full app with in-memory backends.
//!
//! Uses the same app factory as the binary, with the in-memory
//! repository and recording mailer standing in for MySQL and Resend.

use std::sync::Arc;

use actix_web::cookie::Cookie;
use actix_web::dev::ServiceResponse;
use actix_web::http::{header, StatusCode};
use actix_web::{test, web};
use serde_json::{json, Value};

use sesame_api::app::create_app;
use sesame_api::middleware::RateLimiter;
use sesame_api::routes::auth::AppState;
use sesame_core::repositories::InMemoryAccountRepository;
use sesame_core::services::{
    AccountService, AccountServiceConfig, TokenService, TokenServiceConfig,
};
use sesame_infra::MockEmailService;
use sesame_shared::config::ServerConfig;

type TestState = web::Data<AppState<InMemoryAccountRepository, MockEmailService>>;

struct TestContext {
    state: TestState,
    mailer: Arc<MockEmailService>,
}

fn token_config() -> TokenServiceConfig {
    TokenServiceConfig {
        access_secret: "integration-access-secret-0123456789".to_string(),
        refresh_secret: "integration-refresh-secret-0123456789".to_string(),
        magic_secret: "integration-magic-secret-0123456789ab".to_string(),
        issuer: "sesame".to_string(),
        audience: "sesame-app".to_string(),
    }
}

fn test_context() -> TestContext {
    let repository = Arc::new(InMemoryAccountRepository::new());
    let mailer = Arc::new(MockEmailService::new());
    let token_service = Arc::new(TokenService::new(token_config()).unwrap());

    let account_service = Arc::new(AccountService::new(
        repository,
        mailer.clone(),
        token_service.clone(),
        AccountServiceConfig {
            bcrypt_cost: 4,
            min_password_length: 8,
        },
    ));

    TestContext {
        state: web::Data::new(AppState {
            account_service,
            token_service,
            secure_cookies: false,
        }),
        mailer,
    }
}

macro_rules! init_app {
    ($ctx:expr) => {
        test::init_service(create_app(
            $ctx.state.clone(),
            RateLimiter::disabled(),
            &ServerConfig::new("127.0.0.1", 8080),
        ))
        .await
    };
}

fn cookie_value<B>(resp: &ServiceResponse<B>, name: &str) -> Option<String> {
    resp.headers()
        .get_all(header::SET_COOKIE)
        .filter_map(|value| value.to_str().ok())
        .filter_map(|value| Cookie::parse_encoded(value.to_owned()).ok())
        .find(|cookie| cookie.name() == name)
        .map(|cookie| cookie.value().to_string())
}

fn signup_request(name: &str, email: &str, password: &str) -> test::TestRequest {
    test::TestRequest::post().uri("/api/auth/signup").set_json(json!({
        "name": name,
        "email": email,
        "password": password,
    }))
}

fn login_request(email: &str, password: &str) -> test::TestRequest {
    test::TestRequest::post().uri("/api/auth/login").set_json(json!({
        "email": email,
        "password": password,
    }))
}

#[actix_web::test]
async fn test_signup_verify_login_flow() {
    let ctx = test_context();
    let app = init_app!(ctx);

    // Signup: 201 with access cookie, token in body, unverified account
    let resp = test::call_service(
        &app,
        signup_request("Ada", "ada@example.com", "correct horse").to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    assert!(cookie_value(&resp, "accessToken").is_some());

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], true);
    assert!(body["token"].is_string());
    assert_eq!(body["data"]["user"]["isVerified"], false);
    assert!(body["data"]["user"].get("password_hash").is_none());

    // Verify with the emailed code
    let code = ctx
        .mailer
        .last_secret_for("Verify your email")
        .await
        .unwrap();
    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/auth/verify-email")
            .set_json(json!({ "code": code }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["user"]["isVerified"], true);

    // Login: 200 with both cookies and both tokens in the body
    let resp = test::call_service(
        &app,
        login_request("ada@example.com", "correct horse").to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(cookie_value(&resp, "accessToken").is_some());
    assert!(cookie_value(&resp, "refreshToken").is_some());

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Logged in successfully");
    assert!(body["accessToken"].is_string());
    assert!(body["refreshToken"].is_string());
}

#[actix_web::test]
async fn test_signup_duplicate_email_rejected() {
    let ctx = test_context();
    let app = init_app!(ctx);

    let resp = test::call_service(
        &app,
        signup_request("Ada", "ada@example.com", "correct horse").to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let resp = test::call_service(
        &app,
        signup_request("Impostor", "ada@example.com", "other password").to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "User already exists");
}

#[actix_web::test]
async fn test_signup_short_password_rejected_at_the_edge() {
    let ctx = test_context();
    let app = init_app!(ctx);

    let resp = test::call_service(
        &app,
        signup_request("Ada", "ada@example.com", "short").to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_login_failures_are_indistinguishable() {
    let ctx = test_context();
    let app = init_app!(ctx);

    let resp = test::call_service(
        &app,
        signup_request("Ada", "ada@example.com", "correct horse").to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let unknown = test::call_service(
        &app,
        login_request("nobody@example.com", "correct horse").to_request(),
    )
    .await;
    assert_eq!(unknown.status(), StatusCode::BAD_REQUEST);
    let unknown_body = test::read_body(unknown).await;

    let wrong = test::call_service(
        &app,
        login_request("ada@example.com", "wrong password").to_request(),
    )
    .await;
    assert_eq!(wrong.status(), StatusCode::BAD_REQUEST);
    let wrong_body = test::read_body(wrong).await;

    // Byte-identical bodies: no way to probe for registered addresses
    assert_eq!(unknown_body, wrong_body);
}

#[actix_web::test]
async fn test_refresh_without_cookie_is_unauthorized() {
    let ctx = test_context();
    let app = init_app!(ctx);

    let resp = test::call_service(
        &app,
        test::TestRequest::post().uri("/api/auth/refresh").to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Unauthorized");
}

#[actix_web::test]
async fn test_refresh_issues_new_access_token() {
    let ctx = test_context();
    let app = init_app!(ctx);

    let resp = test::call_service(
        &app,
        signup_request("Ada", "ada@example.com", "correct horse").to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let resp = test::call_service(
        &app,
        login_request("ada@example.com", "correct horse").to_request(),
    )
    .await;
    let refresh_token = cookie_value(&resp, "refreshToken").unwrap();

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/auth/refresh")
            .cookie(Cookie::new("refreshToken", refresh_token))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(cookie_value(&resp, "accessToken").is_some());

    let body: Value = test::read_body_json(resp).await;
    assert!(body["token"].is_string());
}

#[actix_web::test]
async fn test_refresh_rejects_access_token_in_refresh_cookie() {
    let ctx = test_context();
    let app = init_app!(ctx);

    let resp = test::call_service(
        &app,
        signup_request("Ada", "ada@example.com", "correct horse").to_request(),
    )
    .await;
    let access_token = cookie_value(&resp, "accessToken").unwrap();

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/auth/refresh")
            .cookie(Cookie::new("refreshToken", access_token))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_check_auth_with_bearer_and_without_token() {
    let ctx = test_context();
    let app = init_app!(ctx);

    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri("/api/auth/check-auth").to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let resp = test::call_service(
        &app,
        signup_request("Ada", "ada@example.com", "correct horse").to_request(),
    )
    .await;
    let body: Value = test::read_body_json(resp).await;
    let token = body["token"].as_str().unwrap().to_string();

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/auth/check-auth")
            .insert_header((header::AUTHORIZATION, format!("Bearer {}", token)))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["user"]["email"], "ada@example.com");
}

#[actix_web::test]
async fn test_logout_clears_both_cookies() {
    let ctx = test_context();
    let app = init_app!(ctx);

    let resp = test::call_service(
        &app,
        test::TestRequest::post().uri("/api/auth/logout").to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(cookie_value(&resp, "accessToken").as_deref(), Some(""));
    assert_eq!(cookie_value(&resp, "refreshToken").as_deref(), Some(""));
}

#[actix_web::test]
async fn test_password_reset_flow() {
    let ctx = test_context();
    let app = init_app!(ctx);

    let resp = test::call_service(
        &app,
        signup_request("Ada", "ada@example.com", "original password").to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/auth/forgot-password")
            .set_json(json!({ "email": "ada@example.com" }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let token = ctx
        .mailer
        .last_secret_for("Reset your password")
        .await
        .unwrap();

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri(&format!("/api/auth/reset-password/{}", token))
            .set_json(json!({ "password": "replacement password" }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);

    // Old password is dead, new one works
    let resp = test::call_service(
        &app,
        login_request("ada@example.com", "original password").to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let resp = test::call_service(
        &app,
        login_request("ada@example.com", "replacement password").to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);

    // The token was consumed by the first reset
    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri(&format!("/api/auth/reset-password/{}", token))
            .set_json(json!({ "password": "third password!" }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Invalid or expired reset password token");
}

#[actix_web::test]
async fn test_forgot_password_unknown_email() {
    let ctx = test_context();
    let app = init_app!(ctx);

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/auth/forgot-password")
            .set_json(json!({ "email": "ghost@example.com" }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "User not found");
}

#[actix_web::test]
async fn test_magic_link_flow() {
    let ctx = test_context();
    let app = init_app!(ctx);

    // Unknown address: account is created and the link is sent
    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/login/magic-request")
            .set_json(json!({ "email": "ghost@example.com" }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Magic link sent!");

    let token = ctx.mailer.last_secret_for("Your login link").await.unwrap();

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&format!("/api/login/magic-login?token={}", token))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(cookie_value(&resp, "accessToken").is_some());
    assert!(cookie_value(&resp, "refreshToken").is_some());

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], true);
    assert!(body["accessToken"].is_string());
}

#[actix_web::test]
async fn test_magic_login_with_garbage_token() {
    let ctx = test_context();
    let app = init_app!(ctx);

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/login/magic-login?token=not-a-jwt")
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Invalid or expired link");
}

#[actix_web::test]
async fn test_health_and_unknown_route() {
    let ctx = test_context();
    let app = init_app!(ctx);

    let resp = test::call_service(&app, test::TestRequest::get().uri("/health").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri("/api/auth/nope").to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
