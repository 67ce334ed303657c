use std::sync::Arc;

use async_trait::async_trait;
use credential_auth::AuthenticationResult;
use credential_auth::Authenticator;
use credential_auth::Principal;

use crate::login::errors::LoginError;
use crate::login::models::LoginCommand;
use crate::login::models::LoginOutcome;
use crate::login::ports::AccountRepository;
use crate::login::ports::LoginServicePort;

/// Domain service implementation for the login use case.
///
/// Password verification is CPU-bound and runs on the blocking thread pool.
pub struct LoginService<AR>
where
    AR: AccountRepository,
{
    repository: Arc<AR>,
    authenticator: Arc<Authenticator>,
}

impl<AR> LoginService<AR>
where
    AR: AccountRepository,
{
    /// Create a new login service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - Account lookup implementation
    /// * `authenticator` - Configured password verifier and token issuer
    pub fn new(repository: Arc<AR>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            repository,
            authenticator,
        }
    }

    async fn authenticate(
        &self,
        password: String,
        stored_hash: String,
        principal: Principal,
    ) -> Result<AuthenticationResult, LoginError> {
        let authenticator = Arc::clone(&self.authenticator);

        tokio::task::spawn_blocking(move || {
            authenticator.authenticate(&password, &stored_hash, &principal)
        })
        .await
        .map_err(|e| LoginError::Internal(format!("Verification task failed: {}", e)))?
        .map_err(LoginError::from)
    }

    async fn reject(&self, password: String, reason: &'static str) -> LoginError {
        let authenticator = Arc::clone(&self.authenticator);

        match tokio::task::spawn_blocking(move || {
            authenticator.reject_without_account(&password)
        })
        .await
        {
            Ok(e) => {
                tracing::info!(reason, "Login rejected");
                LoginError::from(e)
            }
            Err(e) => {
                tracing::error!(error = %e, "Verification task failed");
                LoginError::InvalidCredentials
            }
        }
    }
}

#[async_trait]
impl<AR> LoginServicePort for LoginService<AR>
where
    AR: AccountRepository,
{
    async fn login(&self, command: LoginCommand) -> Result<LoginOutcome, LoginError> {
        let LoginCommand { email, password } = command;

        let account = match self.repository.find_by_email(&email).await? {
            Some(account) if account.is_active => account,
            Some(_) => return Err(self.reject(password, "inactive_account").await),
            None => return Err(self.reject(password, "unknown_account").await),
        };

        // Token is signed in the same blocking task as the verification
        let roles = self.repository.find_role_keys(&account.id).await?;
        let principal = Principal::new(account.id.as_str(), roles);

        let result = match self
            .authenticate(password, account.password_hash.clone(), principal)
            .await
        {
            Ok(result) => result,
            Err(e) => {
                if e == LoginError::InvalidCredentials {
                    tracing::info!(
                        user_id = %account.id,
                        reason = "password_mismatch",
                        "Login rejected"
                    );
                }
                return Err(e);
            }
        };

        if self.authenticator.needs_rehash(&account.password_hash) {
            tracing::debug!(
                user_id = %account.id,
                "Stored password hash uses outdated parameters"
            );
        }

        tracing::info!(
            user_id = %account.id,
            roles = result.roles.len(),
            "Access token issued"
        );

        Ok(LoginOutcome::bearer(result.access_token, result.roles))
    }
}
