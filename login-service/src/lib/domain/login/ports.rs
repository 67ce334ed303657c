use async_trait::async_trait;

use crate::login::errors::LoginError;
use crate::login::models::EmailAddress;
use crate::login::models::LoginCommand;
use crate::login::models::LoginOutcome;
use crate::login::models::UserAccount;
use crate::login::models::UserId;

/// Port for the login use case.
#[async_trait]
pub trait LoginServicePort: Send + Sync + 'static {
    /// Authenticate with email and password and issue an access token.
    ///
    /// # Arguments
    /// * `command` - Case-folded email and plaintext password
    ///
    /// # Returns
    /// Access token, token type and the role keys embedded in the token
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown account, inactive account or wrong password
    /// * `RepositoryError` - Account or role lookup failed
    /// * `Internal` - Verification task or token signing failed
    async fn login(&self, command: LoginCommand) -> Result<LoginOutcome, LoginError>;
}

/// Read access to stored accounts and their roles.
#[async_trait]
pub trait AccountRepository: Send + Sync + 'static {
    /// Retrieve account by case-folded email address.
    ///
    /// # Returns
    /// Optional account (None if not found)
    ///
    /// # Errors
    /// * `RepositoryError` - Storage operation failed
    async fn find_by_email(&self, email: &EmailAddress)
        -> Result<Option<UserAccount>, LoginError>;

    /// Retrieve the role keys granted to a user.
    ///
    /// # Returns
    /// Role keys, unique per user
    ///
    /// # Errors
    /// * `RepositoryError` - Storage operation failed
    async fn find_role_keys(&self, id: &UserId) -> Result<Vec<String>, LoginError>;
}
