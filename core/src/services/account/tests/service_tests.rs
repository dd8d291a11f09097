//! Behavioural tests for the account lifecycle service.

use std::sync::Arc;

use crate::errors::{AuthError, DomainError};
use crate::repositories::account::InMemoryAccountRepository;
use crate::repositories::AccountRepository;
use crate::services::account::{AccountService, AccountServiceConfig};
use crate::services::token::{TokenService, TokenServiceConfig};

use super::mocks::{EmailKind, RecordingEmailService};

type TestService = AccountService<InMemoryAccountRepository, RecordingEmailService>;

fn build_service(mailer: RecordingEmailService) -> (Arc<TestService>, Arc<RecordingEmailService>) {
    let repository = Arc::new(InMemoryAccountRepository::new());
    let email_service = Arc::new(mailer);
    let token_service =
        Arc::new(TokenService::new(TokenServiceConfig::for_tests()).unwrap());
    let service = Arc::new(AccountService::new(
        Arc::clone(&repository),
        Arc::clone(&email_service),
        token_service,
        AccountServiceConfig::for_tests(),
    ));
    (service, email_service)
}

fn service() -> (Arc<TestService>, Arc<RecordingEmailService>) {
    build_service(RecordingEmailService::new())
}

fn assert_auth_error(result: DomainError, expected: AuthError) {
    match result {
        DomainError::Auth(err) => assert_eq!(err.to_string(), expected.to_string()),
        other => panic!("expected auth error, got: {other}"),
    }
}

mod signup {
    use super::*;

    #[tokio::test]
    async fn test_signup_sends_code_and_issues_token() {
        let (service, mailer) = service();

        let result = service
            .signup("Ada", "Ada@Example.com", "correct-horse")
            .await
            .unwrap();

        assert_eq!(result.account.email, "ada@example.com");
        assert!(!result.account.is_verified);
        assert!(!result.access_token.is_empty());

        assert_eq!(mailer.count_of(EmailKind::Verification).await, 1);
        let code = mailer.last_secret_of(EmailKind::Verification).await.unwrap();
        assert_eq!(code.len(), 6);
    }

    #[tokio::test]
    async fn test_signup_never_stores_plaintext_password() {
        let (service, _) = service();
        service
            .signup("Ada", "ada@example.com", "correct-horse")
            .await
            .unwrap();

        let stored = service
            .repository()
            .find_by_email("ada@example.com")
            .await
            .unwrap()
            .unwrap();
        let hash = stored.password_hash.unwrap();
        assert_ne!(hash, "correct-horse");
        assert!(bcrypt::verify("correct-horse", &hash).unwrap());
    }

    #[tokio::test]
    async fn test_duplicate_signup_rejected() {
        let (service, mailer) = service();
        service
            .signup("Ada", "ada@example.com", "correct-horse")
            .await
            .unwrap();

        let err = service
            .signup("Eve", "ada@example.com", "other-password")
            .await
            .unwrap_err();
        assert_auth_error(err, AuthError::UserAlreadyExists);
        // No second verification code went out.
        assert_eq!(mailer.count_of(EmailKind::Verification).await, 1);
    }

    #[tokio::test]
    async fn test_signup_rejects_bad_input() {
        let (service, _) = service();
        assert!(service.signup("", "a@b.co", "longenough").await.is_err());
        assert!(service.signup("Ada", "not-an-email", "longenough").await.is_err());
        assert!(service.signup("Ada", "a@b.co", "short").await.is_err());
    }

    #[tokio::test]
    async fn test_signup_fails_when_verification_email_fails() {
        let (service, _) =
            build_service(RecordingEmailService::failing(vec![EmailKind::Verification]));

        let err = service
            .signup("Ada", "ada@example.com", "correct-horse")
            .await
            .unwrap_err();
        assert_auth_error(err, AuthError::EmailServiceFailure);
    }
}

mod verification {
    use super::*;

    #[tokio::test]
    async fn test_verify_email_marks_account_verified() {
        let (service, mailer) = service();
        service
            .signup("Ada", "ada@example.com", "correct-horse")
            .await
            .unwrap();
        let code = mailer.last_secret_of(EmailKind::Verification).await.unwrap();

        let view = service.verify_email(&code).await.unwrap();
        assert!(view.is_verified);
        assert_eq!(mailer.count_of(EmailKind::Welcome).await, 1);
    }

    #[tokio::test]
    async fn test_verification_code_is_single_use() {
        let (service, mailer) = service();
        service
            .signup("Ada", "ada@example.com", "correct-horse")
            .await
            .unwrap();
        let code = mailer.last_secret_of(EmailKind::Verification).await.unwrap();

        service.verify_email(&code).await.unwrap();
        let err = service.verify_email(&code).await.unwrap_err();
        assert_auth_error(err, AuthError::InvalidVerificationCode);

        // Welcome email went out exactly once.
        assert_eq!(mailer.count_of(EmailKind::Welcome).await, 1);
    }

    #[tokio::test]
    async fn test_unknown_code_rejected() {
        let (service, _) = service();
        let err = service.verify_email("000000").await.unwrap_err();
        assert_auth_error(err, AuthError::InvalidVerificationCode);
    }

    #[tokio::test]
    async fn test_welcome_failure_does_not_fail_verification() {
        let (service, mailer) =
            build_service(RecordingEmailService::failing(vec![EmailKind::Welcome]));
        service
            .signup("Ada", "ada@example.com", "correct-horse")
            .await
            .unwrap();
        let code = mailer.last_secret_of(EmailKind::Verification).await.unwrap();

        let view = service.verify_email(&code).await.unwrap();
        assert!(view.is_verified);
    }

    #[tokio::test]
    async fn test_concurrent_verification_single_winner() {
        let (service, mailer) = service();
        service
            .signup("Ada", "ada@example.com", "correct-horse")
            .await
            .unwrap();
        let code = mailer.last_secret_of(EmailKind::Verification).await.unwrap();

        let mut handles = Vec::new();
        for _ in 0..12 {
            let service = Arc::clone(&service);
            let code = code.clone();
            handles.push(tokio::spawn(
                async move { service.verify_email(&code).await },
            ));
        }

        let mut winners = 0;
        for handle in handles {
            if handle.await.unwrap().is_ok() {
                winners += 1;
            }
        }
        assert_eq!(winners, 1);
        assert_eq!(mailer.count_of(EmailKind::Welcome).await, 1);
    }
}

mod login {
    use super::*;

    #[tokio::test]
    async fn test_login_returns_token_pair_and_records_timestamp() {
        let (service, _) = service();
        service
            .signup("Ada", "ada@example.com", "correct-horse")
            .await
            .unwrap();

        let result = service.login("ada@example.com", "correct-horse").await.unwrap();
        assert!(!result.tokens.access_token.is_empty());
        assert!(!result.tokens.refresh_token.is_empty());
        assert!(result.account.last_login_at.is_some());
    }

    #[tokio::test]
    async fn test_unknown_email_and_wrong_password_are_indistinguishable() {
        let (service, _) = service();
        service
            .signup("Ada", "ada@example.com", "correct-horse")
            .await
            .unwrap();

        let unknown = service
            .login("nobody@example.com", "correct-horse")
            .await
            .unwrap_err();
        let wrong = service
            .login("ada@example.com", "wrong-password")
            .await
            .unwrap_err();

        assert_eq!(unknown.to_string(), wrong.to_string());
        assert_eq!(unknown.to_string(), "Invalid credentials");
    }

    #[tokio::test]
    async fn test_passwordless_account_cannot_password_login() {
        let (service, _) = service();
        service.magic_request("ghost@example.com").await.unwrap();

        let err = service
            .login("ghost@example.com", "any-password")
            .await
            .unwrap_err();
        assert_auth_error(err, AuthError::InvalidCredentials);
    }
}

mod password_reset {
    use super::*;
    use chrono::{Duration, Utc};

    #[tokio::test]
    async fn test_full_reset_flow_rotates_password() {
        let (service, mailer) = service();
        service
            .signup("Ada", "ada@example.com", "correct-horse")
            .await
            .unwrap();

        service.forgot_password("ada@example.com").await.unwrap();
        let token = mailer.last_secret_of(EmailKind::ResetRequest).await.unwrap();
        assert_eq!(token.len(), 48);

        service.reset_password(&token, "battery-staple").await.unwrap();
        assert_eq!(mailer.count_of(EmailKind::ResetSuccess).await, 1);

        // Old password no longer works, new one does.
        assert!(service.login("ada@example.com", "correct-horse").await.is_err());
        assert!(service.login("ada@example.com", "battery-staple").await.is_ok());
    }

    #[tokio::test]
    async fn test_reset_token_is_single_use() {
        let (service, mailer) = service();
        service
            .signup("Ada", "ada@example.com", "correct-horse")
            .await
            .unwrap();
        service.forgot_password("ada@example.com").await.unwrap();
        let token = mailer.last_secret_of(EmailKind::ResetRequest).await.unwrap();

        service.reset_password(&token, "battery-staple").await.unwrap();
        let err = service
            .reset_password(&token, "another-password")
            .await
            .unwrap_err();
        assert_auth_error(err, AuthError::InvalidResetToken);
    }

    #[tokio::test]
    async fn test_expired_reset_token_rejected() {
        let (service, mailer) = service();
        service
            .signup("Ada", "ada@example.com", "correct-horse")
            .await
            .unwrap();
        service.forgot_password("ada@example.com").await.unwrap();
        let token = mailer.last_secret_of(EmailKind::ResetRequest).await.unwrap();

        // Age the token past its window.
        let mut account = service
            .repository()
            .find_by_email("ada@example.com")
            .await
            .unwrap()
            .unwrap();
        account.reset_password_expires_at = Some(Utc::now() - Duration::minutes(1));
        service.repository().update(account).await.unwrap();

        let err = service
            .reset_password(&token, "battery-staple")
            .await
            .unwrap_err();
        assert_auth_error(err, AuthError::InvalidResetToken);
    }

    #[tokio::test]
    async fn test_forgot_password_for_unknown_email_errors() {
        let (service, _) = service();
        let err = service.forgot_password("nobody@example.com").await.unwrap_err();
        assert_auth_error(err, AuthError::UserNotFound);
    }
}

mod sessions {
    use super::*;

    #[tokio::test]
    async fn test_check_auth_resolves_account() {
        let (service, _) = service();
        let signup = service
            .signup("Ada", "ada@example.com", "correct-horse")
            .await
            .unwrap();

        let view = service.check_auth(&signup.access_token).await.unwrap();
        assert_eq!(view.email, "ada@example.com");
    }

    #[tokio::test]
    async fn test_check_auth_rejects_garbage_token() {
        let (service, _) = service();
        let err = service.check_auth("not-a-token").await.unwrap_err();
        assert_auth_error(err, AuthError::Unauthorized);
    }

    #[tokio::test]
    async fn test_refresh_mints_working_access_token() {
        let (service, _) = service();
        service
            .signup("Ada", "ada@example.com", "correct-horse")
            .await
            .unwrap();
        let login = service.login("ada@example.com", "correct-horse").await.unwrap();

        let access = service
            .refresh_access_token(&login.tokens.refresh_token)
            .await
            .unwrap();
        let view = service.check_auth(&access).await.unwrap();
        assert_eq!(view.email, "ada@example.com");
    }

    #[tokio::test]
    async fn test_refresh_rejects_access_token_and_garbage() {
        let (service, _) = service();
        let signup = service
            .signup("Ada", "ada@example.com", "correct-horse")
            .await
            .unwrap();

        let err = service
            .refresh_access_token(&signup.access_token)
            .await
            .unwrap_err();
        assert_auth_error(err, AuthError::Unauthorized);

        let err = service.refresh_access_token("garbage").await.unwrap_err();
        assert_auth_error(err, AuthError::Unauthorized);
    }
}

mod passwordless {
    use super::*;

    #[tokio::test]
    async fn test_magic_request_creates_account_on_first_sight() {
        let (service, mailer) = service();

        service.magic_request("ghost@example.com").await.unwrap();

        let account = service
            .repository()
            .find_by_email("ghost@example.com")
            .await
            .unwrap()
            .unwrap();
        assert!(account.is_verified);
        assert!(account.password_hash.is_none());
        assert_eq!(mailer.count_of(EmailKind::MagicLink).await, 1);
    }

    #[tokio::test]
    async fn test_magic_request_reuses_existing_account() {
        let (service, _) = service();
        service
            .signup("Ada", "ada@example.com", "correct-horse")
            .await
            .unwrap();

        service.magic_request("ada@example.com").await.unwrap();
        assert_eq!(service.repository().len().await, 1);
    }

    #[tokio::test]
    async fn test_magic_login_round_trip() {
        let (service, mailer) = service();
        service.magic_request("ghost@example.com").await.unwrap();
        let token = mailer.last_secret_of(EmailKind::MagicLink).await.unwrap();

        let result = service.magic_login(&token).await.unwrap();
        assert_eq!(result.account.email, "ghost@example.com");
        assert!(result.account.last_login_at.is_some());
        assert!(!result.tokens.access_token.is_empty());
    }

    #[tokio::test]
    async fn test_magic_login_rejects_garbage_token() {
        let (service, _) = service();
        let err = service.magic_login("garbage").await.unwrap_err();
        assert_auth_error(err, AuthError::InvalidMagicLink);
    }

    #[tokio::test]
    async fn test_magic_request_rejects_invalid_email() {
        let (service, _) = service();
        assert!(service.magic_request("not-an-email").await.is_err());
    }
}
