//! Mock email service for integration tests and local development.
//!
//! Records every send instead of delivering it, so flows that need the
//! emailed code or token can fish it back out.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use sesame_core::services::email::{EmailError, EmailServiceTrait};

/// One recorded email
#[derive(Debug, Clone)]
pub struct RecordedEmail {
    pub to: String,
    pub subject: String,
    /// Code or token the email carried, when applicable
    pub secret: Option<String>,
}

/// In-process email service that records instead of sending
#[derive(Default)]
pub struct MockEmailService {
    sent: Arc<RwLock<Vec<RecordedEmail>>>,
}

impl MockEmailService {
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded emails, oldest first
    pub async fn sent(&self) -> Vec<RecordedEmail> {
        self.sent.read().await.clone()
    }

    /// The secret carried by the most recent email with this subject
    pub async fn last_secret_for(&self, subject: &str) -> Option<String> {
        self.sent
            .read()
            .await
            .iter()
            .rev()
            .find(|e| e.subject == subject)
            .and_then(|e| e.secret.clone())
    }

    async fn record(
        &self,
        to: &str,
        subject: String,
        secret: Option<String>,
    ) -> Result<String, EmailError> {
        self.sent.write().await.push(RecordedEmail {
            to: to.to_string(),
            subject,
            secret,
        });
        Ok(format!("mock-{}", Uuid::new_v4()))
    }
}

#[async_trait]
impl EmailServiceTrait for MockEmailService {
    async fn send_verification(&self, email: &str, code: &str) -> Result<String, EmailError> {
        self.record(email, "Verify your email".to_string(), Some(code.to_string()))
            .await
    }

    async fn send_welcome(&self, email: &str, name: &str) -> Result<String, EmailError> {
        self.record(email, format!("Welcome {}", name), None).await
    }

    async fn send_reset_request(
        &self,
        email: &str,
        reset_token: &str,
    ) -> Result<String, EmailError> {
        self.record(
            email,
            "Reset your password".to_string(),
            Some(reset_token.to_string()),
        )
        .await
    }

    async fn send_reset_success(&self, email: &str) -> Result<String, EmailError> {
        self.record(email, "Your password was reset".to_string(), None)
            .await
    }

    async fn send_magic_link(&self, email: &str, magic_token: &str) -> Result<String, EmailError> {
        self.record(
            email,
            "Your login link".to_string(),
            Some(magic_token.to_string()),
        )
        .await
    }
}
