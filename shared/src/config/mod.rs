//! Configuration module with business-specific sub-modules
//!
//! Every value is read from the environment exactly once at startup and
//! carried in plain structs from then on. Handlers never touch `std::env`.
//!
//! - `auth` - JWT secrets and token lifetimes
//! - `database` - MySQL connection and pool settings
//! - `email` - Resend API credentials and link building
//! - `rate_limit` - Fixed-window limits for the auth routes
//! - `server` - HTTP bind address and cookie policy

pub mod auth;
pub mod database;
pub mod email;
pub mod rate_limit;
pub mod server;

use std::env;

use thiserror::Error;

// Re-export commonly used types
pub use auth::AuthConfig;
pub use database::DatabaseConfig;
pub use email::EmailConfig;
pub use rate_limit::RateLimitConfig;
pub use server::ServerConfig;

/// Error raised while assembling configuration at startup
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required environment variable is absent
    #[error("missing required environment variable: {0}")]
    MissingVar(String),

    /// A variable is present but unusable
    #[error("invalid value for {name}: {reason}")]
    InvalidVar { name: String, reason: String },
}

/// Read a required environment variable
pub(crate) fn require_var(name: &str) -> Result<String, ConfigError> {
    env::var(name).map_err(|_| ConfigError::MissingVar(name.to_string()))
}

/// Read an optional environment variable with a fallback
pub(crate) fn var_or(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Server configuration
    pub server: ServerConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// Authentication configuration
    pub auth: AuthConfig,

    /// Email delivery configuration
    pub email: EmailConfig,

    /// Rate limiting configuration
    pub rate_limit: RateLimitConfig,
}

impl AppConfig {
    /// Load the complete configuration from the environment.
    ///
    /// Fails fast: a missing or malformed variable aborts startup rather
    /// than surfacing later as a per-request error.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            server: ServerConfig::from_env()?,
            database: DatabaseConfig::from_env()?,
            auth: AuthConfig::from_env()?,
            email: EmailConfig::from_env()?,
            rate_limit: RateLimitConfig::from_env()?,
        })
    }
}
