//! Common validation utilities

use once_cell::sync::Lazy;
use regex::Regex;

/// Email address pattern: local part, `@`, domain with at least one dot.
///
/// Deliberately permissive; deliverability is proven by the verification
/// code, not the regex.
static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$")
        .unwrap_or_else(|_| unreachable!("email regex is valid"))
});

/// Check if an email address is structurally valid
pub fn is_valid_email(email: &str) -> bool {
    !email.is_empty() && email.len() <= 254 && EMAIL_REGEX.is_match(email)
}

/// Lowercase and trim an email address for storage and lookup
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Check if a string is not empty after trimming
pub fn not_empty(value: &str) -> bool {
    !value.trim().is_empty()
}

/// Check if a string length is within bounds
pub fn length_between(value: &str, min: usize, max: usize) -> bool {
    let len = value.len();
    len >= min && len <= max
}
