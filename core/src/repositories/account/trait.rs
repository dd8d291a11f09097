//! Account repository trait defining the interface for credential persistence.
//!
//! The trait is async-first and returns `Result` types for proper error
//! handling. The two `consume_*` methods are the concurrency-sensitive
//! part of the contract: implementations must make them atomic
//! conditional updates so racing callers cannot both succeed.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::Account;
use crate::errors::DomainError;

/// Repository trait for Account entity persistence operations
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Find an account by its normalized email address
    ///
    /// # Returns
    /// * `Ok(Some(Account))` - Account found
    /// * `Ok(None)` - No account with the given email
    /// * `Err(DomainError)` - Database or other error occurred
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, DomainError>;

    /// Find an account by its unique identifier
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, DomainError>;

    /// Check whether an account exists with the given email
    async fn exists_by_email(&self, email: &str) -> Result<bool, DomainError>;

    /// Create a new account
    ///
    /// # Returns
    /// * `Ok(Account)` - The created account
    /// * `Err(DomainError)` - Creation failed (e.g. duplicate email)
    async fn create(&self, account: Account) -> Result<Account, DomainError>;

    /// Update an existing account
    ///
    /// # Returns
    /// * `Ok(Account)` - The updated account
    /// * `Err(DomainError)` - Update failed (e.g. account not found)
    async fn update(&self, account: Account) -> Result<Account, DomainError>;

    /// Atomically consume a verification code.
    ///
    /// Where an account holds this code AND the code's expiry is in the
    /// future, mark the account verified and clear the code and expiry in
    /// one indivisible operation.
    ///
    /// # Returns
    /// * `Ok(Some(Account))` - The updated, now-verified account
    /// * `Ok(None)` - No account qualified (unknown or expired code, or
    ///   a concurrent caller consumed it first)
    /// * `Err(DomainError)` - Database error occurred
    ///
    /// At most one of any number of racing callers receives `Some`.
    async fn consume_verification_code(&self, code: &str) -> Result<Option<Account>, DomainError>;

    /// Atomically consume a password reset token.
    ///
    /// Where an account holds this token AND the token's expiry is in the
    /// future, store `new_password_hash` and clear the token and expiry in
    /// one indivisible operation. Same single-winner guarantee as
    /// [`consume_verification_code`](Self::consume_verification_code).
    async fn consume_reset_token(
        &self,
        token: &str,
        new_password_hash: &str,
    ) -> Result<Option<Account>, DomainError>;
}
