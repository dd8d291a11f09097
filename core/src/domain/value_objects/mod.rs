//! Value objects returned by the account lifecycle service.

pub mod auth_response;

pub use auth_response::{AccountView, LoginResult, SignupResult};
