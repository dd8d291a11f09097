//! DTOs for the authentication routes.
//!
//! Validation messages mirror the domain layer's wording so a request
//! rejected at the edge reads the same as one rejected by the service.

use serde::{Deserialize, Serialize};
use validator::Validate;

use sesame_core::domain::value_objects::AccountView;

/// Request body for POST /api/auth/signup
#[derive(Debug, Deserialize, Validate)]
pub struct SignupRequest {
    #[validate(length(min = 1, message = "All fields are required"))]
    pub name: String,

    #[validate(email(message = "Invalid email"))]
    pub email: String,

    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
}

/// Request body for POST /api/auth/login
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "All fields are required"))]
    pub email: String,

    #[validate(length(min = 1, message = "All fields are required"))]
    pub password: String,
}

/// Request body for POST /api/auth/verify-email
#[derive(Debug, Deserialize, Validate)]
pub struct VerifyEmailRequest {
    #[validate(length(equal = 6, message = "Invalid or expired verification code"))]
    pub code: String,
}

/// Request body for POST /api/auth/forgot-password
#[derive(Debug, Deserialize, Validate)]
pub struct ForgotPasswordRequest {
    #[validate(email(message = "Invalid email"))]
    pub email: String,
}

/// Request body for POST /api/auth/reset-password/{token}
#[derive(Debug, Deserialize, Validate)]
pub struct ResetPasswordRequest {
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
}

/// Request body for POST /api/login/magic-request
#[derive(Debug, Deserialize, Validate)]
pub struct MagicRequestRequest {
    #[validate(email(message = "Invalid email"))]
    pub email: String,
}

/// Query string for GET /api/login/magic-login
#[derive(Debug, Deserialize)]
pub struct MagicLoginQuery {
    pub token: String,
}

/// `data` object shared by the auth responses
#[derive(Debug, Serialize)]
pub struct AuthData {
    pub user: AccountView,
}

/// Body of a successful signup (201)
#[derive(Debug, Serialize)]
pub struct SignupResponse {
    pub success: bool,
    pub message: String,
    pub data: AuthData,
    /// Access token, echoed for non-browser clients
    pub token: String,
}

/// Body of a successful login, password or magic link (200)
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub success: bool,
    pub message: String,
    pub data: AuthData,
    #[serde(rename = "accessToken")]
    pub access_token: String,
    #[serde(rename = "refreshToken")]
    pub refresh_token: String,
}

/// Body of a successful token refresh (200)
#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    pub success: bool,
    pub message: String,
    /// The freshly minted access token
    pub token: String,
}

/// Body of a completed magic link login (200)
#[derive(Debug, Serialize)]
pub struct MagicLoginResponse {
    pub success: bool,
    #[serde(rename = "accessToken")]
    pub access_token: String,
}
