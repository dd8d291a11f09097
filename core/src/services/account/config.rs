//! Configuration for the account lifecycle service

/// Configuration for the account lifecycle service
#[derive(Debug, Clone)]
pub struct AccountServiceConfig {
    /// Bcrypt cost factor for password hashing
    pub bcrypt_cost: u32,

    /// Minimum accepted password length
    pub min_password_length: usize,
}

impl Default for AccountServiceConfig {
    fn default() -> Self {
        Self {
            bcrypt_cost: 12,
            min_password_length: 8,
        }
    }
}

#[cfg(test)]
impl AccountServiceConfig {
    /// Low bcrypt cost so test suites stay fast
    pub fn for_tests() -> Self {
        Self {
            bcrypt_cost: 4,
            min_password_length: 8,
        }
    }
}
