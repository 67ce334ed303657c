use std::fmt;

use crate::config::ConfigurationError;

/// Symmetric key used to sign and validate access tokens.
///
/// Built once from configuration. The value is never printed: `Debug` is
/// redacted and there is no `Display`.
#[derive(Clone)]
pub struct TokenSecret(Vec<u8>);

impl TokenSecret {
    /// Minimum length recommended for HS256 keys, in bytes.
    pub const RECOMMENDED_MIN_BYTES: usize = 32;

    /// Validate and wrap a signing secret.
    ///
    /// # Errors
    /// * `MissingSecret` - Secret is empty or only whitespace
    pub fn new(secret: impl Into<String>) -> Result<Self, ConfigurationError> {
        let secret = secret.into();
        if secret.trim().is_empty() {
            return Err(ConfigurationError::MissingSecret);
        }

        if secret.len() < Self::RECOMMENDED_MIN_BYTES {
            tracing::warn!(
                length = secret.len(),
                recommended = Self::RECOMMENDED_MIN_BYTES,
                "Token signing secret is shorter than recommended"
            );
        }

        Ok(Self(secret.into_bytes()))
    }

    pub(crate) fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for TokenSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("TokenSecret(<redacted>)")
    }
}
