//! Account entity representing a registered account in the Sesame system.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifetime of verification codes and reset tokens, in minutes
pub const CREDENTIAL_EXPIRY_MINUTES: i64 = 60;

/// Account entity holding credentials and verification state
///
/// `password_hash` is `None` for accounts created through the magic link
/// flow; they can only sign in passwordlessly until a password is set via
/// the reset flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Unique identifier for the account
    pub id: Uuid,

    /// Display name
    pub name: String,

    /// Email address, normalized to lowercase
    pub email: String,

    /// Bcrypt hash of the password; never the plaintext
    pub password_hash: Option<String>,

    /// Whether the email address has been verified
    pub is_verified: bool,

    /// Pending email verification code
    pub verification_code: Option<String>,

    /// Expiry of the pending verification code
    pub verification_code_expires_at: Option<DateTime<Utc>>,

    /// Pending password reset token
    pub reset_password_token: Option<String>,

    /// Expiry of the pending reset token
    pub reset_password_expires_at: Option<DateTime<Utc>>,

    /// Timestamp of the account's last login
    pub last_login_at: Option<DateTime<Utc>>,

    /// Timestamp when the account was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the account was last updated
    pub updated_at: DateTime<Utc>,
}

impl Account {
    /// Creates a new unverified account with a password credential
    pub fn new(name: String, email: String, password_hash: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name,
            email,
            password_hash: Some(password_hash),
            is_verified: false,
            verification_code: None,
            verification_code_expires_at: None,
            reset_password_token: None,
            reset_password_expires_at: None,
            last_login_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Creates an account for the passwordless flow.
    ///
    /// The account has no password hash and is considered verified:
    /// following the emailed link proves control of the mailbox.
    pub fn new_passwordless(email: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: email.clone(),
            email,
            password_hash: None,
            is_verified: true,
            verification_code: None,
            verification_code_expires_at: None,
            reset_password_token: None,
            reset_password_expires_at: None,
            last_login_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Stores a pending verification code with the default expiry
    pub fn set_verification_code(&mut self, code: String) {
        self.verification_code = Some(code);
        self.verification_code_expires_at =
            Some(Utc::now() + Duration::minutes(CREDENTIAL_EXPIRY_MINUTES));
        self.updated_at = Utc::now();
    }

    /// Marks the email as verified and clears the transient code fields
    pub fn mark_verified(&mut self) {
        self.is_verified = true;
        self.verification_code = None;
        self.verification_code_expires_at = None;
        self.updated_at = Utc::now();
    }

    /// Stores a pending reset token with the default expiry
    pub fn set_reset_token(&mut self, token: String) {
        self.reset_password_token = Some(token);
        self.reset_password_expires_at =
            Some(Utc::now() + Duration::minutes(CREDENTIAL_EXPIRY_MINUTES));
        self.updated_at = Utc::now();
    }

    /// Replaces the password hash and clears the transient reset fields
    pub fn apply_password_reset(&mut self, new_password_hash: String) {
        self.password_hash = Some(new_password_hash);
        self.reset_password_token = None;
        self.reset_password_expires_at = None;
        self.updated_at = Utc::now();
    }

    /// Updates the last login timestamp
    pub fn record_login(&mut self) {
        self.last_login_at = Some(Utc::now());
        self.updated_at = Utc::now();
    }

    /// Whether the pending verification code is still within its expiry
    pub fn verification_code_is_current(&self) -> bool {
        matches!(self.verification_code_expires_at, Some(expiry) if expiry > Utc::now())
    }

    /// Whether the pending reset token is still within its expiry
    pub fn reset_token_is_current(&self) -> bool {
        matches!(self.reset_password_expires_at, Some(expiry) if expiry > Utc::now())
    }
}
