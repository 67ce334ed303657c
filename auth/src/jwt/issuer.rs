use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;
use serde::Deserialize;
use serde_json::Map;
use serde_json::Value;

use super::claims::EXPIRY_CLAIM;
use super::claims::ISSUED_AT_CLAIM;
use super::claims::SUBJECT_CLAIM;
use super::errors::JwtError;
use super::secret::TokenSecret;
use crate::config::ConfigurationError;
use crate::config::TokenSettings;

/// Signs time-limited access tokens.
///
/// Tokens are compact JWTs signed with HS256 (HMAC with SHA-256). The issuer
/// keeps no per-token state: a token is valid as long as its signature checks
/// out and `exp` has not passed.
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    validity: Duration,
}

impl TokenIssuer {
    /// Longest validity window accepted, one year.
    pub const MAX_VALIDITY_MINUTES: i64 = 60 * 24 * 365;

    fn max_validity() -> Duration {
        Duration::minutes(Self::MAX_VALIDITY_MINUTES)
    }

    /// Create a token issuer.
    ///
    /// # Arguments
    /// * `secret` - Validated signing secret
    /// * `validity` - Default validity window for issued tokens
    ///
    /// # Errors
    /// * `InvalidValidity` - Validity window is not positive or exceeds `MAX_VALIDITY_MINUTES`
    pub fn new(secret: &TokenSecret, validity: Duration) -> Result<Self, ConfigurationError> {
        if validity <= Duration::zero() || validity > Self::max_validity() {
            return Err(ConfigurationError::InvalidValidity(validity.num_minutes()));
        }

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            algorithm: Algorithm::HS256,
            validity,
        })
    }

    /// Create a token issuer from loaded settings.
    ///
    /// # Errors
    /// * `MissingSecret` - Secret is empty
    /// * `InvalidValidity` - Expiration minutes is not in `1..=MAX_VALIDITY_MINUTES`
    pub fn from_settings(settings: &TokenSettings) -> Result<Self, ConfigurationError> {
        let minutes = settings.expiration_minutes;
        if !(1..=Self::MAX_VALIDITY_MINUTES).contains(&minutes) {
            return Err(ConfigurationError::InvalidValidity(minutes));
        }
        let validity =
            Duration::try_minutes(minutes).ok_or(ConfigurationError::InvalidValidity(minutes))?;

        let secret = TokenSecret::new(settings.secret.as_str())?;
        Self::new(&secret, validity)
    }

    /// Default validity window.
    pub fn validity(&self) -> Duration {
        self.validity
    }

    /// Issue a token valid for the default window, starting now.
    ///
    /// # Arguments
    /// * `subject` - Subject identifier, stored in `sub`
    /// * `claims` - Additional claims to embed
    ///
    /// # Errors
    /// * `EmptySubject` - Subject is empty
    /// * `EncodingFailed` - Token signing failed
    pub fn issue(&self, subject: &str, claims: Map<String, Value>) -> Result<String, JwtError> {
        self.issue_at(subject, claims, self.validity, Utc::now())
    }

    /// Issue a token valid for `validity`, starting now.
    pub fn issue_with_validity(
        &self,
        subject: &str,
        claims: Map<String, Value>,
        validity: Duration,
    ) -> Result<String, JwtError> {
        self.issue_at(subject, claims, validity, Utc::now())
    }

    /// Issue a token as of `issued_at`.
    ///
    /// Caller claims are merged first and the reserved claims (`sub`, `iat`,
    /// `exp`) are written last, so computed values always replace caller values
    /// under those names.
    ///
    /// # Errors
    /// * `EmptySubject` - Subject is empty
    /// * `InvalidValidity` - Validity window is not positive, exceeds
    ///   `MAX_VALIDITY_MINUTES` or puts `exp` past the representable range
    /// * `EncodingFailed` - Token signing failed
    pub fn issue_at(
        &self,
        subject: &str,
        mut claims: Map<String, Value>,
        validity: Duration,
        issued_at: DateTime<Utc>,
    ) -> Result<String, JwtError> {
        if subject.is_empty() {
            return Err(JwtError::EmptySubject);
        }
        if validity <= Duration::zero() || validity > Self::max_validity() {
            return Err(JwtError::InvalidValidity);
        }

        let expires_at = issued_at
            .checked_add_signed(validity)
            .ok_or(JwtError::InvalidValidity)?;

        claims.insert(SUBJECT_CLAIM.to_string(), Value::from(subject));
        claims.insert(ISSUED_AT_CLAIM.to_string(), Value::from(issued_at.timestamp()));
        claims.insert(EXPIRY_CLAIM.to_string(), Value::from(expires_at.timestamp()));

        let header = Header::new(self.algorithm);

        encode(&header, &claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingFailed(e.to_string()))
    }

    /// Decode and validate a token.
    ///
    /// Checks the signature, the algorithm and `exp` (with the default
    /// 60 second leeway).
    ///
    /// # Errors
    /// * `TokenExpired` - Token has expired
    /// * `InvalidSignature` - Signature does not match this issuer's secret
    /// * `DecodingFailed` - Token is malformed or claims do not deserialize
    pub fn decode<T: for<'de> Deserialize<'de>>(&self, token: &str) -> Result<T, JwtError> {
        let validation = Validation::new(self.algorithm);

        let token_data =
            decode::<T>(token, &self.decoding_key, &validation).map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => JwtError::TokenExpired,
                ErrorKind::InvalidSignature => JwtError::InvalidSignature,
                _ => JwtError::DecodingFailed(e.to_string()),
            })?;

        Ok(token_data.claims)
    }
}
