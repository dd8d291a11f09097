//! Email delivery configuration

use serde::{Deserialize, Serialize};

use super::{require_var, var_or, ConfigError};

/// Resend email provider configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EmailConfig {
    /// Resend API key
    pub api_key: String,

    /// Sender address, e.g. `Sesame <onboarding@sesame.app>`
    pub sender: String,

    /// Base URL of the web client, used to build reset and magic links
    pub client_url: String,
}

impl EmailConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            api_key: require_var("RESEND_API_KEY")?,
            sender: require_var("EMAIL_SENDER")?,
            client_url: var_or("CLIENT_URL", "http://localhost:5173"),
        })
    }

    /// Build the password reset URL embedded in reset emails
    pub fn reset_password_url(&self, token: &str) -> String {
        format!("{}/reset-password/{}", self.client_url.trim_end_matches('/'), token)
    }

    /// Build the magic login URL embedded in passwordless emails
    pub fn magic_login_url(&self, token: &str) -> String {
        format!("{}/magic-login?token={}", self.client_url.trim_end_matches('/'), token)
    }
}
