//! Generation of short-lived secrets: verification codes, reset tokens
//! and their expiry timestamps.
//!
//! Everything here draws from `OsRng`, the OS-provided CSPRNG. These
//! functions are pure generators with no I/O and no persistence.

use chrono::{DateTime, Duration, Utc};
use rand::rngs::OsRng;
use rand::Rng;

/// Default lifetime for verification codes and reset tokens, in minutes
pub const DEFAULT_EXPIRY_MINUTES: i64 = 60;

/// Number of random bytes behind a reset token (48 hex chars)
pub const RESET_TOKEN_BYTES: usize = 24;

/// Generate a 6-digit verification code.
///
/// Drawn uniformly from [100000, 999999]; `gen_range` rejection-samples,
/// so there is no modulo bias and every code starts with a non-zero digit.
pub fn generate_verification_code() -> String {
    let code: u32 = OsRng.gen_range(100_000..=999_999);
    code.to_string()
}

/// Generate a high-entropy password reset token.
///
/// 24 random bytes, hex-encoded: 192 bits of entropy in 48 characters.
pub fn generate_reset_token() -> String {
    let mut bytes = [0u8; RESET_TOKEN_BYTES];
    OsRng.fill(&mut bytes);
    hex::encode(bytes)
}

/// Expiry timestamp `minutes` from now
pub fn generate_expiry(minutes: i64) -> DateTime<Utc> {
    Utc::now() + Duration::minutes(minutes)
}
