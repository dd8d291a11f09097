//! MySQL implementation of the AccountRepository trait.
//!
//! The two `consume_*` methods wrap a `SELECT ... FOR UPDATE` and the
//! matching `UPDATE` in one transaction, so the row lock serializes
//! racing consumers and at most one of them observes the pending secret.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use sesame_core::domain::entities::Account;
use sesame_core::errors::DomainError;
use sesame_core::repositories::AccountRepository;

const ACCOUNT_COLUMNS: &str = r#"
    id, name, email, password_hash, is_verified,
    verification_code, verification_code_expires_at,
    reset_password_token, reset_password_expires_at,
    last_login_at, created_at, updated_at
"#;

/// MySQL implementation of AccountRepository
pub struct MySqlAccountRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlAccountRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert a database row to an Account entity
    fn row_to_account(row: &sqlx::mysql::MySqlRow) -> Result<Account, DomainError> {
        let id: String = row
            .try_get("id")
            .map_err(|e| db_error("id", e))?;

        Ok(Account {
            id: Uuid::parse_str(&id).map_err(|e| DomainError::Database {
                message: format!("Invalid UUID: {}", e),
            })?,
            name: row.try_get("name").map_err(|e| db_error("name", e))?,
            email: row.try_get("email").map_err(|e| db_error("email", e))?,
            password_hash: row
                .try_get("password_hash")
                .map_err(|e| db_error("password_hash", e))?,
            is_verified: row
                .try_get("is_verified")
                .map_err(|e| db_error("is_verified", e))?,
            verification_code: row
                .try_get("verification_code")
                .map_err(|e| db_error("verification_code", e))?,
            verification_code_expires_at: row
                .try_get("verification_code_expires_at")
                .map_err(|e| db_error("verification_code_expires_at", e))?,
            reset_password_token: row
                .try_get("reset_password_token")
                .map_err(|e| db_error("reset_password_token", e))?,
            reset_password_expires_at: row
                .try_get("reset_password_expires_at")
                .map_err(|e| db_error("reset_password_expires_at", e))?,
            last_login_at: row
                .try_get("last_login_at")
                .map_err(|e| db_error("last_login_at", e))?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| db_error("created_at", e))?,
            updated_at: row
                .try_get::<DateTime<Utc>, _>("updated_at")
                .map_err(|e| db_error("updated_at", e))?,
        })
    }
}

fn db_error(column: &str, e: sqlx::Error) -> DomainError {
    DomainError::Database {
        message: format!("Failed to get {}: {}", column, e),
    }
}

fn query_error(e: sqlx::Error) -> DomainError {
    DomainError::Database {
        message: format!("Database query failed: {}", e),
    }
}

/// Insert failures: the UNIQUE index on `accounts.email` (see
/// `infra/migrations/`) rejects the loser of two racing signups, so a
/// duplicate-key error here is a client error, not a database fault.
fn insert_error(e: sqlx::Error) -> DomainError {
    let duplicate = e
        .as_database_error()
        .is_some_and(|db| db.kind() == sqlx::error::ErrorKind::UniqueViolation);

    if duplicate {
        DomainError::Validation {
            message: "Email already registered".to_string(),
        }
    } else {
        DomainError::Database {
            message: format!("Failed to create account: {}", e),
        }
    }
}

#[async_trait]
impl AccountRepository for MySqlAccountRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, DomainError> {
        let query = format!(
            "SELECT {} FROM accounts WHERE email = ? LIMIT 1",
            ACCOUNT_COLUMNS
        );

        let result = sqlx::query(&query)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(query_error)?;

        match result {
            Some(row) => Ok(Some(Self::row_to_account(&row)?)),
            None => Ok(None),
        }
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, DomainError> {
        let query = format!(
            "SELECT {} FROM accounts WHERE id = ? LIMIT 1",
            ACCOUNT_COLUMNS
        );

        let result = sqlx::query(&query)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(query_error)?;

        match result {
            Some(row) => Ok(Some(Self::row_to_account(&row)?)),
            None => Ok(None),
        }
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, DomainError> {
        let query = "SELECT EXISTS(SELECT 1 FROM accounts WHERE email = ?) as account_exists";

        let row = sqlx::query(query)
            .bind(email)
            .fetch_one(&self.pool)
            .await
            .map_err(query_error)?;

        let exists: i8 = row
            .try_get("account_exists")
            .map_err(|e| db_error("account_exists", e))?;
        Ok(exists == 1)
    }

    async fn create(&self, account: Account) -> Result<Account, DomainError> {
        let query = r#"
            INSERT INTO accounts (
                id, name, email, password_hash, is_verified,
                verification_code, verification_code_expires_at,
                reset_password_token, reset_password_expires_at,
                last_login_at, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(account.id.to_string())
            .bind(&account.name)
            .bind(&account.email)
            .bind(&account.password_hash)
            .bind(account.is_verified)
            .bind(&account.verification_code)
            .bind(account.verification_code_expires_at)
            .bind(&account.reset_password_token)
            .bind(account.reset_password_expires_at)
            .bind(account.last_login_at)
            .bind(account.created_at)
            .bind(account.updated_at)
            .execute(&self.pool)
            .await
            .map_err(insert_error)?;

        Ok(account)
    }

    async fn update(&self, account: Account) -> Result<Account, DomainError> {
        let query = r#"
            UPDATE accounts SET
                name = ?,
                email = ?,
                password_hash = ?,
                is_verified = ?,
                verification_code = ?,
                verification_code_expires_at = ?,
                reset_password_token = ?,
                reset_password_expires_at = ?,
                last_login_at = ?,
                updated_at = ?
            WHERE id = ?
        "#;

        let updated_at = Utc::now();
        let result = sqlx::query(query)
            .bind(&account.name)
            .bind(&account.email)
            .bind(&account.password_hash)
            .bind(account.is_verified)
            .bind(&account.verification_code)
            .bind(account.verification_code_expires_at)
            .bind(&account.reset_password_token)
            .bind(account.reset_password_expires_at)
            .bind(account.last_login_at)
            .bind(updated_at)
            .bind(account.id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Database {
                message: format!("Failed to update account: {}", e),
            })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound {
                resource: "Account".to_string(),
            });
        }

        let mut updated = account;
        updated.updated_at = updated_at;
        Ok(updated)
    }

    async fn consume_verification_code(&self, code: &str) -> Result<Option<Account>, DomainError> {
        let mut tx = self.pool.begin().await.map_err(query_error)?;

        // Row lock: the first transaction to get here wins, later ones
        // see the cleared code after it commits.
        let select = format!(
            "SELECT {} FROM accounts \
             WHERE verification_code = ? AND verification_code_expires_at > NOW() \
             LIMIT 1 FOR UPDATE",
            ACCOUNT_COLUMNS
        );

        let row = sqlx::query(&select)
            .bind(code)
            .fetch_optional(&mut *tx)
            .await
            .map_err(query_error)?;

        let Some(row) = row else {
            tx.rollback().await.map_err(query_error)?;
            return Ok(None);
        };

        let mut account = Self::row_to_account(&row)?;

        sqlx::query(
            "UPDATE accounts SET is_verified = TRUE, verification_code = NULL, \
             verification_code_expires_at = NULL, updated_at = ? WHERE id = ?",
        )
        .bind(Utc::now())
        .bind(account.id.to_string())
        .execute(&mut *tx)
        .await
        .map_err(query_error)?;

        tx.commit().await.map_err(query_error)?;

        account.mark_verified();
        Ok(Some(account))
    }

    async fn consume_reset_token(
        &self,
        token: &str,
        new_password_hash: &str,
    ) -> Result<Option<Account>, DomainError> {
        let mut tx = self.pool.begin().await.map_err(query_error)?;

        let select = format!(
            "SELECT {} FROM accounts \
             WHERE reset_password_token = ? AND reset_password_expires_at > NOW() \
             LIMIT 1 FOR UPDATE",
            ACCOUNT_COLUMNS
        );

        let row = sqlx::query(&select)
            .bind(token)
            .fetch_optional(&mut *tx)
            .await
            .map_err(query_error)?;

        let Some(row) = row else {
            tx.rollback().await.map_err(query_error)?;
            return Ok(None);
        };

        let mut account = Self::row_to_account(&row)?;

        sqlx::query(
            "UPDATE accounts SET password_hash = ?, reset_password_token = NULL, \
             reset_password_expires_at = NULL, updated_at = ? WHERE id = ?",
        )
        .bind(new_password_hash)
        .bind(Utc::now())
        .bind(account.id.to_string())
        .execute(&mut *tx)
        .await
        .map_err(query_error)?;

        tx.commit().await.map_err(query_error)?;

        account.apply_password_reset(new_password_hash.to_string());
        Ok(Some(account))
    }
}
