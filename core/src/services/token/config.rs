//! Configuration for the token service

use sesame_shared::config::AuthConfig;

/// Minimum HS256 secret length in bytes
pub const MIN_SECRET_BYTES: usize = 32;

/// Configuration for the token service
#[derive(Debug, Clone)]
pub struct TokenServiceConfig {
    /// Secret for access token signing
    pub access_secret: String,
    /// Secret for refresh token signing
    pub refresh_secret: String,
    /// Secret for magic link token signing
    pub magic_secret: String,
    /// Issuer claim stamped into and required from every token
    pub issuer: String,
    /// Audience claim stamped into and required from every token
    pub audience: String,
}

impl From<&AuthConfig> for TokenServiceConfig {
    fn from(config: &AuthConfig) -> Self {
        Self {
            access_secret: config.access_secret.clone(),
            refresh_secret: config.refresh_secret.clone(),
            magic_secret: config.magic_secret.clone(),
            issuer: config.issuer.clone(),
            audience: config.audience.clone(),
        }
    }
}

#[cfg(test)]
impl TokenServiceConfig {
    /// Config with throwaway secrets for unit tests
    pub fn for_tests() -> Self {
        Self {
            access_secret: "test-access-secret-0123456789abcdef".to_string(),
            refresh_secret: "test-refresh-secret-0123456789abcdef".to_string(),
            magic_secret: "test-magic-secret-0123456789abcdefgh".to_string(),
            issuer: "sesame".to_string(),
            audience: "sesame-app".to_string(),
        }
    }
}
