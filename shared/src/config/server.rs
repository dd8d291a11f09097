//! HTTP server configuration

use serde::{Deserialize, Serialize};

use super::{var_or, ConfigError};

/// HTTP server and cookie policy configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Bind host
    pub host: String,

    /// Bind port
    pub port: u16,

    /// Set the `Secure` attribute on auth cookies (HTTPS deployments)
    pub secure_cookies: bool,

    /// Origins allowed by CORS; the client URL in practice
    pub allowed_origins: Vec<String>,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let port = var_or("SERVER_PORT", "8080")
            .parse()
            .map_err(|_| ConfigError::InvalidVar {
                name: String::from("SERVER_PORT"),
                reason: String::from("must be a valid port number"),
            })?;
        let secure_cookies = var_or("SECURE_COOKIES", "false") == "true";
        let allowed_origins = var_or("CLIENT_URL", "http://localhost:5173")
            .split(',')
            .map(|origin| origin.trim().to_string())
            .filter(|origin| !origin.is_empty())
            .collect();
        Ok(Self {
            host: var_or("SERVER_HOST", "127.0.0.1"),
            port,
            secure_cookies,
            allowed_origins,
        })
    }

    /// Create a configuration with explicit host and port
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            secure_cookies: false,
            allowed_origins: vec![String::from("http://localhost:5173")],
        }
    }

    /// The address to bind, `host:port`
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
