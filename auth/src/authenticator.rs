use chrono::Duration;
use serde_json::Map;
use serde_json::Value;

use crate::config::ConfigurationError;
use crate::config::PasswordSettings;
use crate::config::TokenSettings;
use crate::jwt::claims::ROLES_CLAIM;
use crate::jwt::AccessClaims;
use crate::jwt::JwtError;
use crate::jwt::TokenIssuer;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Authentication coordinator combining password verification and token issuance.
///
/// Holds only immutable configuration, so a single instance can be shared
/// across threads behind an `Arc`.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    token_issuer: TokenIssuer,
    /// Hash of a throwaway password, checked when there is no stored hash
    decoy_hash: String,
}

/// Identity a token is issued for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    /// Opaque subject identifier
    pub subject: String,
    /// Role keys, already deduplicated by the caller
    pub roles: Vec<String>,
}

impl Principal {
    pub fn new(subject: impl Into<String>, roles: Vec<String>) -> Self {
        Self {
            subject: subject.into(),
            roles,
        }
    }

    /// Claims contributed by this principal, excluding the subject.
    pub fn claims(&self) -> Map<String, Value> {
        let mut claims = Map::new();
        claims.insert(ROLES_CLAIM.to_string(), Value::from(self.roles.clone()));
        claims
    }
}

/// Result of successful authentication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticationResult {
    /// Signed access token
    pub access_token: String,
    /// Role keys embedded in the token
    pub roles: Vec<String>,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("JWT error: {0}")]
    JwtError(#[from] JwtError),
}

impl Authenticator {
    const DECOY_PASSWORD: &'static str = "decoy-password-never-stored";

    /// Create a new authenticator from its two components.
    ///
    /// Hashes a decoy password once with the configured scheme and cost, so
    /// rejecting an unknown account later costs a full verification.
    ///
    /// # Errors
    /// * `PasswordError` - The configured hasher cannot produce a hash
    pub fn new(
        password_hasher: PasswordHasher,
        token_issuer: TokenIssuer,
    ) -> Result<Self, PasswordError> {
        let decoy_hash = password_hasher.hash(Self::DECOY_PASSWORD)?;

        Ok(Self {
            password_hasher,
            token_issuer,
            decoy_hash,
        })
    }

    /// Build an authenticator from loaded settings.
    ///
    /// # Errors
    /// * `MissingSecret` - Signing secret is empty
    /// * `InvalidValidity` - Token validity is not positive or too large
    /// * `InvalidCost` - Hashing cost is out of range for the scheme
    /// * `HasherUnavailable` - Hasher failed to produce the decoy hash
    pub fn from_settings(
        token: &TokenSettings,
        password: &PasswordSettings,
    ) -> Result<Self, ConfigurationError> {
        let token_issuer = TokenIssuer::from_settings(token)?;
        let password_hasher = PasswordHasher::with_scheme(password.scheme, password.effective_cost())
            .map_err(|e| match e {
                PasswordError::InvalidCost(msg) => ConfigurationError::InvalidCost(msg),
                other => ConfigurationError::InvalidCost(other.to_string()),
            })?;

        tracing::info!(
            scheme = %password_hasher.scheme(),
            cost = password_hasher.cost(),
            token_validity_minutes = token_issuer.validity().num_minutes(),
            "Authenticator configured"
        );

        Self::new(password_hasher, token_issuer)
            .map_err(|e| ConfigurationError::HasherUnavailable(e.to_string()))
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Password rejected or hashing failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Verify a password against a stored hash, failing closed.
    pub fn verify_password(&self, password: &str, stored_hash: &str) -> bool {
        self.password_hasher.verify(password, stored_hash)
    }

    /// Whether a stored hash should be replaced on the next successful login.
    pub fn needs_rehash(&self, stored_hash: &str) -> bool {
        self.password_hasher.needs_rehash(stored_hash)
    }

    /// Reject a login that has no usable stored hash.
    ///
    /// Runs a full verification against the decoy hash first, whatever the
    /// password, so an unknown or inactive account takes as long to reject
    /// as a wrong password.
    pub fn reject_without_account(&self, password: &str) -> AuthenticationError {
        if let Err(e) = self.password_hasher.check(password, &self.decoy_hash) {
            tracing::error!(error = %e, "Decoy verification failed");
        }
        AuthenticationError::InvalidCredentials
    }

    /// Verify credentials and issue an access token.
    ///
    /// A malformed stored hash is logged and reported as `InvalidCredentials`,
    /// like any other mismatch.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `stored_hash` - Stored password hash
    /// * `principal` - Subject and roles to encode in the token
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `JwtError` - Token generation failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
        principal: &Principal,
    ) -> Result<AuthenticationResult, AuthenticationError> {
        self.verify_credentials(password, stored_hash)?;

        let access_token = self.issue_for(principal)?;

        Ok(AuthenticationResult {
            access_token,
            roles: principal.roles.clone(),
        })
    }

    /// Verify a password, collapsing every failure into `InvalidCredentials`.
    ///
    /// A malformed stored hash is logged at error level before being reported
    /// as a plain mismatch.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match or the hash is malformed
    pub fn verify_credentials(
        &self,
        password: &str,
        stored_hash: &str,
    ) -> Result<(), AuthenticationError> {
        match self.password_hasher.check(password, stored_hash) {
            Ok(true) => Ok(()),
            Ok(false) => Err(AuthenticationError::InvalidCredentials),
            Err(PasswordError::MalformedHash) => {
                tracing::error!("Stored password hash is malformed");
                Err(AuthenticationError::InvalidCredentials)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Issue an access token without password verification.
    ///
    /// # Errors
    /// * `JwtError` - Token generation failed
    pub fn issue_for(&self, principal: &Principal) -> Result<String, JwtError> {
        self.token_issuer.issue(&principal.subject, principal.claims())
    }

    /// Issue an access token with a non-default validity window.
    pub fn issue_for_with_validity(
        &self,
        principal: &Principal,
        validity: Duration,
    ) -> Result<String, JwtError> {
        self.token_issuer
            .issue_with_validity(&principal.subject, principal.claims(), validity)
    }

    /// Validate and decode an access token.
    ///
    /// # Errors
    /// * `JwtError` - Token validation or decoding failed
    pub fn validate_token(&self, token: &str) -> Result<AccessClaims, JwtError> {
        self.token_issuer.decode(token)
    }
}
