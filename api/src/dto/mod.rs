//! Request and response data transfer objects

pub mod auth;

use validator::ValidationErrors;

/// First human-readable message out of a failed validation, used as the
/// body of the 400 response.
pub fn first_validation_message(errors: &ValidationErrors) -> String {
    errors
        .field_errors()
        .values()
        .flat_map(|errs| errs.iter())
        .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
        .unwrap_or_else(|| "All fields are required".to_string())
}
