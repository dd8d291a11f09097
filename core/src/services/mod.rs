//! Business services containing domain logic and use cases.

pub mod account;
pub mod email;
pub mod secrets;
pub mod token;

// Re-export commonly used types
pub use account::{AccountService, AccountServiceConfig};
pub use email::{EmailError, EmailServiceTrait};
pub use token::{TokenService, TokenServiceConfig};
