//! Shared utility functions

pub mod validation;

pub use validation::{is_valid_email, normalize_email};
