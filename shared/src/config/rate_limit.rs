//! Rate limiting configuration for the auth routes

use serde::{Deserialize, Serialize};

use super::{var_or, ConfigError};

/// Fixed-window rate limit settings
///
/// One counter per client IP per route group, stored in Redis.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RateLimitConfig {
    /// Redis connection URL
    pub redis_url: String,

    /// Maximum requests allowed inside one window
    pub max_requests: u32,

    /// Window length in seconds
    pub window_secs: u64,

    /// Disable limiting entirely (tests, local development)
    pub enabled: bool,
}

impl RateLimitConfig {
    /// 5 requests per 15 minutes, matching the client-facing policy
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            redis_url: var_or("REDIS_URL", "redis://127.0.0.1:6379"),
            max_requests: 5,
            window_secs: 15 * 60,
            enabled: true,
        })
    }

    /// Permissive settings for local development
    pub fn development() -> Self {
        Self {
            redis_url: String::from("redis://127.0.0.1:6379"),
            max_requests: 100,
            window_secs: 60,
            enabled: false,
        }
    }
}
