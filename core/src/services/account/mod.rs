//! Account lifecycle service: signup, verification, login, password
//! reset and passwordless login.

pub mod config;
pub mod service;

#[cfg(test)]
mod tests;

pub use config::AccountServiceConfig;
pub use service::AccountService;
