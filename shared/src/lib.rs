//! # Sesame Shared
//!
//! Cross-cutting types for the Sesame backend: configuration structs
//! loaded once at startup, the common API response envelope, and input
//! validation helpers.

pub mod config;
pub mod types;
pub mod utils;
