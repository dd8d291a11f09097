//! Notification dispatcher contract.
//!
//! One method per template kind so implementations own the wording and
//! markup; the service layer only supplies the secret being delivered.

use async_trait::async_trait;
use thiserror::Error;

/// Errors raised by email delivery implementations
#[derive(Error, Debug)]
pub enum EmailError {
    /// The provider rejected the request or returned an error status
    #[error("Email provider error: {message}")]
    Provider { message: String },

    /// The service is misconfigured (bad API key, malformed sender)
    #[error("Email configuration error: {message}")]
    Configuration { message: String },

    /// The request could not reach the provider
    #[error("Email delivery failed: {message}")]
    Delivery { message: String },
}

/// Trait for sending account lifecycle emails.
///
/// Every method returns the provider's message id on success.
#[async_trait]
pub trait EmailServiceTrait: Send + Sync {
    /// Send the 6-digit email verification code
    async fn send_verification(&self, email: &str, code: &str) -> Result<String, EmailError>;

    /// Send the post-verification welcome email
    async fn send_welcome(&self, email: &str, name: &str) -> Result<String, EmailError>;

    /// Send the password reset link containing `reset_token`
    async fn send_reset_request(&self, email: &str, reset_token: &str)
        -> Result<String, EmailError>;

    /// Confirm that a password reset completed
    async fn send_reset_success(&self, email: &str) -> Result<String, EmailError>;

    /// Send the passwordless login link containing `magic_token`
    async fn send_magic_link(&self, email: &str, magic_token: &str) -> Result<String, EmailError>;
}
