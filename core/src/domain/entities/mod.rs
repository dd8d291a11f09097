//! Domain entities.

pub mod account;
pub mod token;

pub use account::Account;
pub use token::{Claims, MagicClaims, TokenPair, TokenType};
