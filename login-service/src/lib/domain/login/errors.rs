use credential_auth::AuthenticationError;
use thiserror::Error;

/// Error for EmailAddress validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmailError {
    #[error("Invalid email format: {0}")]
    InvalidFormat(String),
}

/// Top-level error for login operations
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LoginError {
    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    /// Unknown account, inactive account and wrong password all map here.
    #[error("Invalid credentials")]
    InvalidCredentials,

    // Infrastructure errors
    #[error("Repository error: {0}")]
    RepositoryError(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<AuthenticationError> for LoginError {
    fn from(err: AuthenticationError) -> Self {
        match err {
            AuthenticationError::InvalidCredentials => LoginError::InvalidCredentials,
            AuthenticationError::PasswordError(e) => {
                LoginError::Internal(format!("Password verification failed: {}", e))
            }
            AuthenticationError::JwtError(e) => {
                LoginError::Internal(format!("Token generation failed: {}", e))
            }
        }
    }
}
