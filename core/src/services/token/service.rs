//! Main token service implementation

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;

use crate::domain::entities::token::{Claims, MagicClaims, TokenPair, TokenType};
use crate::errors::{DomainError, TokenError};

use super::config::{TokenServiceConfig, MIN_SECRET_BYTES};

/// Signing and verification keys for one token kind
struct KeyPair {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl KeyPair {
    fn from_secret(secret: &str) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
        }
    }
}

/// Service for issuing and verifying the three token kinds.
///
/// Access, refresh and magic link tokens each get their own key pair.
/// Verification never returns an error: any failure (malformed input,
/// bad signature, wrong type, expiry) collapses to `None` so callers
/// have exactly one unauthenticated path.
pub struct TokenService {
    config: TokenServiceConfig,
    access_keys: KeyPair,
    refresh_keys: KeyPair,
    magic_keys: KeyPair,
    validation: Validation,
}

impl TokenService {
    /// Creates a new token service instance.
    ///
    /// Fails when any secret is empty or shorter than [`MIN_SECRET_BYTES`].
    /// This is a startup-time check; it never occurs per request.
    pub fn new(config: TokenServiceConfig) -> Result<Self, DomainError> {
        for (name, secret) in [
            ("access", &config.access_secret),
            ("refresh", &config.refresh_secret),
            ("magic", &config.magic_secret),
        ] {
            if secret.len() < MIN_SECRET_BYTES {
                return Err(TokenError::InvalidConfiguration {
                    reason: format!(
                        "{} secret must be at least {} bytes",
                        name, MIN_SECRET_BYTES
                    ),
                }
                .into());
            }
        }

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&config.issuer]);
        validation.set_audience(&[&config.audience]);
        validation.validate_exp = true;

        Ok(Self {
            access_keys: KeyPair::from_secret(&config.access_secret),
            refresh_keys: KeyPair::from_secret(&config.refresh_secret),
            magic_keys: KeyPair::from_secret(&config.magic_secret),
            validation,
            config,
        })
    }

    /// Issues a short-lived access token for an account
    pub fn issue_access_token(&self, account_id: Uuid) -> Result<String, DomainError> {
        let claims =
            Claims::new_access_token(account_id, &self.config.issuer, &self.config.audience);
        encode(&Header::default(), &claims, &self.access_keys.encoding)
            .map_err(|_| TokenError::TokenGenerationFailed.into())
    }

    /// Issues a long-lived refresh token for an account
    pub fn issue_refresh_token(&self, account_id: Uuid) -> Result<String, DomainError> {
        let claims =
            Claims::new_refresh_token(account_id, &self.config.issuer, &self.config.audience);
        encode(&Header::default(), &claims, &self.refresh_keys.encoding)
            .map_err(|_| TokenError::TokenGenerationFailed.into())
    }

    /// Issues an access and refresh token pair
    pub fn issue_token_pair(&self, account_id: Uuid) -> Result<TokenPair, DomainError> {
        let access_token = self.issue_access_token(account_id)?;
        let refresh_token = self.issue_refresh_token(account_id)?;
        Ok(TokenPair::new(access_token, refresh_token))
    }

    /// Issues a magic login token bound to an email address
    pub fn issue_magic_token(&self, email: &str) -> Result<String, DomainError> {
        let claims =
            MagicClaims::new(email.to_string(), &self.config.issuer, &self.config.audience);
        encode(&Header::default(), &claims, &self.magic_keys.encoding)
            .map_err(|_| TokenError::TokenGenerationFailed.into())
    }

    /// Verifies an access token, returning its claims or `None`
    pub fn verify_access_token(&self, token: &str) -> Option<Claims> {
        self.verify_session_token(token, &self.access_keys, TokenType::Access)
    }

    /// Verifies a refresh token, returning its claims or `None`
    pub fn verify_refresh_token(&self, token: &str) -> Option<Claims> {
        self.verify_session_token(token, &self.refresh_keys, TokenType::Refresh)
    }

    /// Verifies a magic login token, returning its claims or `None`
    pub fn verify_magic_token(&self, token: &str) -> Option<MagicClaims> {
        decode::<MagicClaims>(token, &self.magic_keys.decoding, &self.validation)
            .map(|data| data.claims)
            .ok()
    }

    fn verify_session_token(
        &self,
        token: &str,
        keys: &KeyPair,
        expected: TokenType,
    ) -> Option<Claims> {
        let claims = decode::<Claims>(token, &keys.decoding, &self.validation)
            .map(|data| data.claims)
            .ok()?;
        // A refresh token must never pass as an access token or vice versa
        if claims.token_type != expected {
            return None;
        }
        Some(claims)
    }
}
