//! Domain-specific error types for authentication and related operations
//!
//! Messages on client-facing variants are stable API: the HTTP layer
//! serializes them verbatim, and clients match on them.

use thiserror::Error;

/// Authentication-related errors
#[derive(Error, Debug)]
pub enum AuthError {
    /// Wrong password or unknown email. One variant for both so the two
    /// cases are indistinguishable on the wire.
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Invalid or expired verification code")]
    InvalidVerificationCode,

    #[error("Invalid or expired reset password token")]
    InvalidResetToken,

    #[error("Invalid or expired link")]
    InvalidMagicLink,

    #[error("User not found")]
    UserNotFound,

    #[error("User already exists")]
    UserAlreadyExists,

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Failed to send email")]
    EmailServiceFailure,

    #[error("Rate limit exceeded: retry in {minutes} minutes")]
    RateLimitExceeded { minutes: u32 },
}

/// Token-related errors
///
/// Verification failures never surface here; verifiers return `None`
/// instead. These variants cover issuance and configuration problems.
#[derive(Error, Debug)]
pub enum TokenError {
    #[error("Token generation failed")]
    TokenGenerationFailed,

    #[error("Invalid token service configuration: {reason}")]
    InvalidConfiguration { reason: String },
}

/// Input validation errors
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("All fields are required")]
    RequiredField { field: String },

    #[error("Invalid email")]
    InvalidEmail,

    #[error("Password must be at least {min} characters")]
    PasswordTooShort { min: usize },

    #[error("Invalid format: {field}")]
    InvalidFormat { field: String },
}
