use std::fmt;

use serde::Deserialize;
use thiserror::Error;

use crate::password::PasswordScheme;

/// Invalid or missing settings detected while building the authenticator.
///
/// Raised at construction so a misconfigured process fails at startup
/// instead of on its first login.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("Token signing secret is not set")]
    MissingSecret,

    #[error("Token validity must be between 1 and 525600 minutes, got {0} minutes")]
    InvalidValidity(i64),

    #[error("Invalid password hashing cost: {0}")]
    InvalidCost(String),

    #[error("Password hasher could not be initialized: {0}")]
    HasherUnavailable(String),
}

/// Token signing settings.
#[derive(Clone, Deserialize)]
pub struct TokenSettings {
    /// Symmetric signing secret. Required, there is no fallback value.
    #[serde(default)]
    pub secret: String,

    /// Access token validity window in minutes
    #[serde(default = "TokenSettings::default_expiration_minutes")]
    pub expiration_minutes: i64,
}

impl TokenSettings {
    pub const DEFAULT_EXPIRATION_MINUTES: i64 = 60;

    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            expiration_minutes: Self::DEFAULT_EXPIRATION_MINUTES,
        }
    }

    fn default_expiration_minutes() -> i64 {
        Self::DEFAULT_EXPIRATION_MINUTES
    }
}

impl Default for TokenSettings {
    fn default() -> Self {
        Self::new(String::new())
    }
}

impl fmt::Debug for TokenSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenSettings")
            .field("secret", &"<redacted>")
            .field("expiration_minutes", &self.expiration_minutes)
            .finish()
    }
}

/// Password hashing settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PasswordSettings {
    /// Scheme used for new hashes
    #[serde(default)]
    pub scheme: PasswordScheme,

    /// Cost factor; the scheme default applies when unset
    #[serde(default)]
    pub cost: Option<u32>,
}

impl PasswordSettings {
    /// Cost factor after applying the scheme default.
    pub fn effective_cost(&self) -> u32 {
        self.cost.unwrap_or_else(|| self.scheme.default_cost())
    }
}
