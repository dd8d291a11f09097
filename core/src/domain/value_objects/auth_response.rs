//! Client-facing projections of domain entities.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::{Account, TokenPair};

/// Password-free projection of an account, safe to serialize to clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountView {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[serde(rename = "isVerified")]
    pub is_verified: bool,
    #[serde(rename = "lastLogin")]
    pub last_login_at: Option<DateTime<Utc>>,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

impl From<&Account> for AccountView {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id,
            name: account.name.clone(),
            email: account.email.clone(),
            is_verified: account.is_verified,
            last_login_at: account.last_login_at,
            created_at: account.created_at,
        }
    }
}

impl From<Account> for AccountView {
    fn from(account: Account) -> Self {
        Self::from(&account)
    }
}

/// Result of a successful signup
#[derive(Debug, Clone, Serialize)]
pub struct SignupResult {
    pub account: AccountView,
    pub access_token: String,
}

/// Result of a successful login (password or magic link)
#[derive(Debug, Clone, Serialize)]
pub struct LoginResult {
    pub account: AccountView,
    pub tokens: TokenPair,
}
