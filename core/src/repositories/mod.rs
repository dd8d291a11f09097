//! Repository interfaces for the domain layer.

pub mod account;

pub use account::{AccountRepository, InMemoryAccountRepository};
