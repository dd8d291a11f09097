//! Authentication configuration: JWT secrets and token lifetimes

use serde::{Deserialize, Serialize};

use super::{require_var, ConfigError};

/// Minimum acceptable secret length in bytes for HS256 signing keys
pub const MIN_SECRET_LENGTH: usize = 32;

/// Access token lifetime in minutes
pub const ACCESS_TOKEN_EXPIRY_MINUTES: i64 = 15;

/// Refresh token lifetime in days
pub const REFRESH_TOKEN_EXPIRY_DAYS: i64 = 7;

/// Magic link token lifetime in minutes
pub const MAGIC_TOKEN_EXPIRY_MINUTES: i64 = 10;

/// JWT authentication configuration
///
/// Access, refresh and magic link tokens are each signed with their own
/// secret so a leaked token of one kind can never be replayed as another.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    /// Secret for signing access tokens
    pub access_secret: String,

    /// Secret for signing refresh tokens
    pub refresh_secret: String,

    /// Secret for signing magic link tokens
    pub magic_secret: String,

    /// JWT issuer claim
    pub issuer: String,

    /// JWT audience claim
    pub audience: String,
}

impl AuthConfig {
    /// Load from `JWT_SECRET`, `JWT_REFRESH_SECRET` and `MAGIC_LINK_SECRET`.
    ///
    /// All three are required and must be at least [`MIN_SECRET_LENGTH`]
    /// bytes. An under-sized secret is a startup failure, never a
    /// per-request condition.
    pub fn from_env() -> Result<Self, ConfigError> {
        let config = Self {
            access_secret: require_var("JWT_SECRET")?,
            refresh_secret: require_var("JWT_REFRESH_SECRET")?,
            magic_secret: require_var("MAGIC_LINK_SECRET")?,
            issuer: super::var_or("JWT_ISSUER", "sesame"),
            audience: super::var_or("JWT_AUDIENCE", "sesame-app"),
        };
        config.validate()?;
        Ok(config)
    }

    /// Check every secret meets the minimum length requirement
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, secret) in [
            ("JWT_SECRET", &self.access_secret),
            ("JWT_REFRESH_SECRET", &self.refresh_secret),
            ("MAGIC_LINK_SECRET", &self.magic_secret),
        ] {
            if secret.len() < MIN_SECRET_LENGTH {
                return Err(ConfigError::InvalidVar {
                    name: name.to_string(),
                    reason: format!("secret must be at least {} bytes", MIN_SECRET_LENGTH),
                });
            }
        }
        Ok(())
    }
}
