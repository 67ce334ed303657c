use std::env;

use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use credential_auth::Authenticator;
use credential_auth::ConfigurationError;
use credential_auth::PasswordSettings;
use credential_auth::TokenSettings;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub jwt: TokenSettings,
    #[serde(default)]
    pub password: PasswordSettings,
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. `JWT_SECRET` for the signing secret
    /// 2. Environment variables (AUTH_JWT__SECRET, AUTH_JWT__EXPIRATION_MINUTES, AUTH_PASSWORD__COST, etc.)
    /// 3. Environment-specific config file (config/{environment}.toml)
    /// 4. Default config file (config/default.toml)
    ///
    /// A missing secret is not an error here; it is reported by
    /// [`authenticator`](Self::authenticator).
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            // Start with default configuration
            .add_source(File::with_name("config/default").required(false))
            // Layer on environment-specific configuration
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Layer on environment variables (with __ as separator)
            // Example: AUTH_JWT__EXPIRATION_MINUTES=15 overrides jwt.expiration_minutes
            .add_source(
                Environment::with_prefix("AUTH")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .set_override_option("jwt.secret", env::var("JWT_SECRET").ok())?
            .build()?;

        let config: Config = configuration.try_deserialize()?;

        Ok(config)
    }

    /// Build the shared authenticator, failing on invalid security settings.
    ///
    /// # Errors
    /// * `MissingSecret` - No signing secret configured
    /// * `InvalidValidity` - Token validity is not positive or too large
    /// * `InvalidCost` - Hashing cost out of range
    /// * `HasherUnavailable` - Hasher could not produce a hash
    pub fn authenticator(&self) -> Result<Authenticator, ConfigurationError> {
        Authenticator::from_settings(&self.jwt, &self.password)
    }
}
