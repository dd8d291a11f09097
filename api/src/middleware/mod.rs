//! HTTP middleware components

pub mod auth;
pub mod cors;
pub mod rate_limit;

pub use auth::{AuthContext, JwtAuth};
pub use cors::create_cors;
pub use rate_limit::RateLimiter;
