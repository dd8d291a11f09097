//! Resend email service implementation.
//!
//! Sends account lifecycle emails through the Resend HTTP API
//! (`POST /emails`) and returns the provider message id.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error, info};

use sesame_core::services::email::{EmailError, EmailServiceTrait};
use sesame_shared::config::EmailConfig;

use super::templates;

const RESEND_API_URL: &str = "https://api.resend.com/emails";
const REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Serialize)]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: [&'a str; 1],
    subject: &'a str,
    html: &'a str,
}

#[derive(Deserialize)]
struct SendEmailResponse {
    id: String,
}

/// Email service backed by the Resend API
pub struct ResendEmailService {
    client: reqwest::Client,
    config: EmailConfig,
}

impl ResendEmailService {
    /// Create a new Resend email service
    pub fn new(config: EmailConfig) -> Result<Self, EmailError> {
        if config.api_key.trim().is_empty() {
            return Err(EmailError::Configuration {
                message: "Resend API key is empty".to_string(),
            });
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| EmailError::Configuration {
                message: format!("Failed to build HTTP client: {}", e),
            })?;

        info!(sender = %config.sender, "Resend email service initialized");
        Ok(Self { client, config })
    }

    async fn send(&self, to: &str, subject: &str, html: &str) -> Result<String, EmailError> {
        let request = SendEmailRequest {
            from: &self.config.sender,
            to: [to],
            subject,
            html,
        };

        debug!(subject = subject, "sending email via Resend");

        let response = self
            .client
            .post(RESEND_API_URL)
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| EmailError::Delivery {
                message: format!("Request to Resend failed: {}", e),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %body, "Resend rejected the request");
            return Err(EmailError::Provider {
                message: format!("Resend returned {}: {}", status, body),
            });
        }

        let parsed: SendEmailResponse =
            response.json().await.map_err(|e| EmailError::Provider {
                message: format!("Unexpected Resend response: {}", e),
            })?;

        Ok(parsed.id)
    }
}

#[async_trait]
impl EmailServiceTrait for ResendEmailService {
    async fn send_verification(&self, email: &str, code: &str) -> Result<String, EmailError> {
        self.send(email, "Verify your email", &templates::verification_email(code))
            .await
    }

    async fn send_welcome(&self, email: &str, name: &str) -> Result<String, EmailError> {
        let subject = format!("Welcome {}", name);
        self.send(email, &subject, &templates::welcome_email(name))
            .await
    }

    async fn send_reset_request(
        &self,
        email: &str,
        reset_token: &str,
    ) -> Result<String, EmailError> {
        let reset_url = self.config.reset_password_url(reset_token);
        self.send(
            email,
            "Reset your password",
            &templates::password_reset_request_email(&reset_url),
        )
        .await
    }

    async fn send_reset_success(&self, email: &str) -> Result<String, EmailError> {
        self.send(
            email,
            "Your password was reset",
            &templates::password_reset_success_email(),
        )
        .await
    }

    async fn send_magic_link(&self, email: &str, magic_token: &str) -> Result<String, EmailError> {
        let login_url = self.config.magic_login_url(magic_token);
        self.send(
            email,
            "Your login link",
            &templates::magic_link_email(&login_url),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> EmailConfig {
        EmailConfig {
            api_key: "re_test_key".to_string(),
            sender: "Sesame <hello@sesame.app>".to_string(),
            client_url: "https://app.sesame.dev".to_string(),
        }
    }

    #[test]
    fn test_new_rejects_empty_api_key() {
        let mut config = config();
        config.api_key = "  ".to_string();
        assert!(ResendEmailService::new(config).is_err());
    }

    #[test]
    fn test_request_payload_shape() {
        let request = SendEmailRequest {
            from: "Sesame <hello@sesame.app>",
            to: ["ada@example.com"],
            subject: "Verify your email",
            html: "<p>123456</p>",
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["from"], "Sesame <hello@sesame.app>");
        assert_eq!(json["to"][0], "ada@example.com");
        assert_eq!(json["subject"], "Verify your email");
    }
}
