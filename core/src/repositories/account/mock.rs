//! In-memory implementation of AccountRepository for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::Account;
use crate::errors::DomainError;

use super::trait_::AccountRepository;

/// In-memory account repository backed by a `RwLock<HashMap>`.
///
/// The single write guard taken in the `consume_*` methods is what makes
/// them atomic: check and mutation happen under one lock acquisition.
pub struct InMemoryAccountRepository {
    accounts: Arc<RwLock<HashMap<Uuid, Account>>>,
}

impl InMemoryAccountRepository {
    /// Create a new empty repository
    pub fn new() -> Self {
        Self {
            accounts: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Number of stored accounts, for test assertions
    pub async fn len(&self) -> usize {
        self.accounts.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.accounts.read().await.is_empty()
    }
}

impl Default for InMemoryAccountRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, DomainError> {
        let accounts = self.accounts.read().await;
        Ok(accounts.values().find(|a| a.email == email).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, DomainError> {
        let accounts = self.accounts.read().await;
        Ok(accounts.get(&id).cloned())
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, DomainError> {
        let accounts = self.accounts.read().await;
        Ok(accounts.values().any(|a| a.email == email))
    }

    async fn create(&self, account: Account) -> Result<Account, DomainError> {
        let mut accounts = self.accounts.write().await;

        if accounts.values().any(|a| a.email == account.email) {
            return Err(DomainError::Validation {
                message: "Email already registered".to_string(),
            });
        }

        accounts.insert(account.id, account.clone());
        Ok(account)
    }

    async fn update(&self, account: Account) -> Result<Account, DomainError> {
        let mut accounts = self.accounts.write().await;

        if !accounts.contains_key(&account.id) {
            return Err(DomainError::NotFound {
                resource: "Account".to_string(),
            });
        }

        accounts.insert(account.id, account.clone());
        Ok(account)
    }

    async fn consume_verification_code(&self, code: &str) -> Result<Option<Account>, DomainError> {
        let mut accounts = self.accounts.write().await;

        let matching = accounts
            .values_mut()
            .find(|a| a.verification_code.as_deref() == Some(code) && a.verification_code_is_current());

        match matching {
            Some(account) => {
                account.mark_verified();
                Ok(Some(account.clone()))
            }
            None => Ok(None),
        }
    }

    async fn consume_reset_token(
        &self,
        token: &str,
        new_password_hash: &str,
    ) -> Result<Option<Account>, DomainError> {
        let mut accounts = self.accounts.write().await;

        let matching = accounts
            .values_mut()
            .find(|a| a.reset_password_token.as_deref() == Some(token) && a.reset_token_is_current());

        match matching {
            Some(account) => {
                account.apply_password_reset(new_password_hash.to_string());
                Ok(Some(account.clone()))
            }
            None => Ok(None),
        }
    }
}
