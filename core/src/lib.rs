//! # Sesame Core
//!
//! Core business logic and domain layer for the Sesame backend.
//! This crate contains domain entities, the account lifecycle service,
//! repository interfaces, and error types that form the foundation of
//! the application architecture.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::entities::{Account, Claims, MagicClaims, TokenPair, TokenType};
pub use domain::value_objects::{AccountView, LoginResult, SignupResult};
pub use errors::{AuthError, DomainError, DomainResult, TokenError, ValidationError};
pub use repositories::{AccountRepository, InMemoryAccountRepository};
pub use services::{
    AccountService, AccountServiceConfig, EmailError, EmailServiceTrait, TokenService,
    TokenServiceConfig,
};
