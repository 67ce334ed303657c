use std::sync::Arc;

use anyhow::Context;
use credential_auth::ConfigurationError;

use crate::config::Config;
use crate::login::ports::AccountRepository;
use crate::login::service::LoginService;
use crate::telemetry::init_tracing;

/// Wire the login service from configuration.
///
/// Called once at process start. Invalid security settings (most importantly
/// a missing signing secret) abort startup here rather than on the first login.
///
/// # Errors
/// * `ConfigurationError` - Security settings are missing or invalid
pub fn build_login_service<AR>(
    config: &Config,
    repository: Arc<AR>,
) -> Result<LoginService<AR>, ConfigurationError>
where
    AR: AccountRepository,
{
    let authenticator = Arc::new(config.authenticator()?);

    tracing::info!(
        service = "login-service",
        version = env!("CARGO_PKG_VERSION"),
        "Login service ready"
    );

    Ok(LoginService::new(repository, authenticator))
}

/// Entry hook for a host process.
///
/// Loads configuration from files and environment, installs the tracing
/// subscriber and wires the login service around the host's repository.
/// Call it once from the host's `main`, before serving any request.
///
/// # Errors
/// Fails if configuration cannot be loaded, a subscriber is already
/// installed, or security settings are invalid.
pub fn bootstrap<AR>(repository: Arc<AR>) -> anyhow::Result<LoginService<AR>>
where
    AR: AccountRepository,
{
    let config = Config::load().context("Failed to load configuration")?;
    init_tracing().context("Failed to initialize tracing")?;

    let service = build_login_service(&config, repository)
        .context("Invalid authentication settings")?;

    Ok(service)
}
