//! Account lifecycle service implementation.
//!
//! Orchestrates the repository, token service and email dispatcher.
//! Emails whose content the recipient needs in order to proceed
//! (verification code, reset link, magic link) fail the operation when
//! delivery fails; purely informational emails (welcome, reset
//! confirmation) only log.

use std::sync::Arc;

use tracing::{error, info, warn};

use crate::domain::entities::Account;
use crate::domain::value_objects::{AccountView, LoginResult, SignupResult};
use crate::errors::{AuthError, DomainError, DomainResult, ValidationError};
use crate::repositories::AccountRepository;
use crate::services::email::EmailServiceTrait;
use crate::services::secrets;
use crate::services::token::TokenService;

use super::config::AccountServiceConfig;
use sesame_shared::utils::validation::{is_valid_email, normalize_email};

/// Service orchestrating the account lifecycle
pub struct AccountService<R: AccountRepository, M: EmailServiceTrait> {
    repository: Arc<R>,
    email_service: Arc<M>,
    token_service: Arc<TokenService>,
    config: AccountServiceConfig,
}

impl<R: AccountRepository, M: EmailServiceTrait> AccountService<R, M> {
    pub fn new(
        repository: Arc<R>,
        email_service: Arc<M>,
        token_service: Arc<TokenService>,
        config: AccountServiceConfig,
    ) -> Self {
        Self {
            repository,
            email_service,
            token_service,
            config,
        }
    }

    /// Register a new account and send its verification code.
    ///
    /// The account starts unverified; the emailed 6-digit code proves
    /// control of the mailbox. An access token is issued immediately so
    /// the client can poll `check_auth` while verification is pending.
    pub async fn signup(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> DomainResult<SignupResult> {
        self.validate_signup(name, email, password)?;
        let email = normalize_email(email);

        if self.repository.exists_by_email(&email).await? {
            return Err(AuthError::UserAlreadyExists.into());
        }

        let password_hash = self.hash_password(password)?;
        let mut account = Account::new(name.trim().to_string(), email.clone(), password_hash);

        let code = secrets::generate_verification_code();
        account.set_verification_code(code.clone());

        let account = self.repository.create(account).await?;
        info!(account_id = %account.id, "account created, sending verification code");

        self.email_service
            .send_verification(&email, &code)
            .await
            .map_err(|e| {
                error!(account_id = %account.id, error = %e, "verification email failed");
                DomainError::from(AuthError::EmailServiceFailure)
            })?;

        let access_token = self.token_service.issue_access_token(account.id)?;

        Ok(SignupResult {
            account: AccountView::from(&account),
            access_token,
        })
    }

    /// Consume a verification code and mark the account verified.
    ///
    /// Single-use: the repository clears the code in the same atomic
    /// operation that flips the verified flag, so a second submission of
    /// the same code fails even under concurrency.
    pub async fn verify_email(&self, code: &str) -> DomainResult<AccountView> {
        let account = self
            .repository
            .consume_verification_code(code)
            .await?
            .ok_or(AuthError::InvalidVerificationCode)?;

        info!(account_id = %account.id, "email verified");

        // Informational only: verification already succeeded.
        if let Err(e) = self
            .email_service
            .send_welcome(&account.email, &account.name)
            .await
        {
            warn!(account_id = %account.id, error = %e, "welcome email failed");
        }

        Ok(AccountView::from(&account))
    }

    /// Authenticate with email and password, issuing a token pair.
    ///
    /// Unknown email, passwordless account and wrong password all
    /// produce the same error so responses cannot be used to probe for
    /// registered addresses.
    pub async fn login(&self, email: &str, password: &str) -> DomainResult<LoginResult> {
        let email = normalize_email(email);

        let mut account = self
            .repository
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        let password_hash = account
            .password_hash
            .as_deref()
            .ok_or(AuthError::InvalidCredentials)?;

        let matches = bcrypt::verify(password, password_hash).map_err(|_| {
            DomainError::Internal {
                message: "password verification failed".to_string(),
            }
        })?;
        if !matches {
            return Err(AuthError::InvalidCredentials.into());
        }

        account.record_login();
        let account = self.repository.update(account).await?;

        let tokens = self.token_service.issue_token_pair(account.id)?;
        info!(account_id = %account.id, "login succeeded");

        Ok(LoginResult {
            account: AccountView::from(&account),
            tokens,
        })
    }

    /// Start the password reset flow by emailing a reset link.
    // TODO: returning UserNotFound for unknown emails discloses which
    // addresses are registered; align with a uniform 200 once the web
    // client stops surfacing the distinction.
    pub async fn forgot_password(&self, email: &str) -> DomainResult<()> {
        let email = normalize_email(email);

        let mut account = self
            .repository
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        let token = secrets::generate_reset_token();
        account.set_reset_token(token.clone());
        self.repository.update(account).await?;

        self.email_service
            .send_reset_request(&email, &token)
            .await
            .map_err(|e| {
                error!(error = %e, "reset request email failed");
                DomainError::from(AuthError::EmailServiceFailure)
            })?;

        Ok(())
    }

    /// Complete a password reset with the emailed token.
    ///
    /// The token is single-use: hash replacement and token clearing are
    /// one atomic repository operation.
    pub async fn reset_password(&self, token: &str, new_password: &str) -> DomainResult<()> {
        if new_password.len() < self.config.min_password_length {
            return Err(ValidationError::PasswordTooShort {
                min: self.config.min_password_length,
            }
            .into());
        }

        let new_hash = self.hash_password(new_password)?;

        let account = self
            .repository
            .consume_reset_token(token, &new_hash)
            .await?
            .ok_or(AuthError::InvalidResetToken)?;

        info!(account_id = %account.id, "password reset completed");

        // Informational only: the reset already happened.
        if let Err(e) = self.email_service.send_reset_success(&account.email).await {
            warn!(account_id = %account.id, error = %e, "reset confirmation email failed");
        }

        Ok(())
    }

    /// Resolve an access token to its account
    pub async fn check_auth(&self, access_token: &str) -> DomainResult<AccountView> {
        let claims = self
            .token_service
            .verify_access_token(access_token)
            .ok_or(AuthError::Unauthorized)?;

        let account_id = claims.account_id().map_err(|_| AuthError::Unauthorized)?;

        let account = self
            .repository
            .find_by_id(account_id)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        Ok(AccountView::from(&account))
    }

    /// Mint a fresh access token from a valid refresh token.
    ///
    /// The refresh token itself is untouched; it stays valid until its
    /// own expiry.
    pub async fn refresh_access_token(&self, refresh_token: &str) -> DomainResult<String> {
        let claims = self
            .token_service
            .verify_refresh_token(refresh_token)
            .ok_or(AuthError::Unauthorized)?;

        let account_id = claims.account_id().map_err(|_| AuthError::Unauthorized)?;

        self.token_service.issue_access_token(account_id)
    }

    /// Send a passwordless login link, creating the account on first
    /// sight of an unknown email.
    ///
    /// Always succeeds for a valid address, so the response does not
    /// reveal whether the email was already registered.
    pub async fn magic_request(&self, email: &str) -> DomainResult<()> {
        let email = normalize_email(email);
        if !is_valid_email(&email) {
            return Err(ValidationError::InvalidEmail.into());
        }

        if self.repository.find_by_email(&email).await?.is_none() {
            let account = Account::new_passwordless(email.clone());
            self.repository.create(account).await?;
            info!("passwordless account created");
        }

        let token = self.token_service.issue_magic_token(&email)?;

        self.email_service
            .send_magic_link(&email, &token)
            .await
            .map_err(|e| {
                error!(error = %e, "magic link email failed");
                DomainError::from(AuthError::EmailServiceFailure)
            })?;

        Ok(())
    }

    /// Complete a passwordless login with the emailed token
    pub async fn magic_login(&self, magic_token: &str) -> DomainResult<LoginResult> {
        let claims = self
            .token_service
            .verify_magic_token(magic_token)
            .ok_or(AuthError::InvalidMagicLink)?;

        let mut account = self
            .repository
            .find_by_email(&claims.email)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        account.record_login();
        let account = self.repository.update(account).await?;

        let tokens = self.token_service.issue_token_pair(account.id)?;
        info!(account_id = %account.id, "magic link login succeeded");

        Ok(LoginResult {
            account: AccountView::from(&account),
            tokens,
        })
    }

    fn validate_signup(&self, name: &str, email: &str, password: &str) -> DomainResult<()> {
        if name.trim().is_empty() {
            return Err(ValidationError::RequiredField {
                field: "name".to_string(),
            }
            .into());
        }
        if email.trim().is_empty() {
            return Err(ValidationError::RequiredField {
                field: "email".to_string(),
            }
            .into());
        }
        if password.is_empty() {
            return Err(ValidationError::RequiredField {
                field: "password".to_string(),
            }
            .into());
        }
        if !is_valid_email(&normalize_email(email)) {
            return Err(ValidationError::InvalidEmail.into());
        }
        if password.len() < self.config.min_password_length {
            return Err(ValidationError::PasswordTooShort {
                min: self.config.min_password_length,
            }
            .into());
        }
        Ok(())
    }

    fn hash_password(&self, password: &str) -> DomainResult<String> {
        bcrypt::hash(password, self.config.bcrypt_cost).map_err(|_| DomainError::Internal {
            message: "password hashing failed".to_string(),
        })
    }
}

// Convenience accessor used by HTTP integration tests to seed state.
impl<R: AccountRepository, M: EmailServiceTrait> AccountService<R, M> {
    pub fn repository(&self) -> &Arc<R> {
        &self.repository
    }
}
