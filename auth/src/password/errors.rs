use thiserror::Error;

/// Error type for password operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PasswordError {
    #[error("Password must not be empty")]
    EmptyPassword,

    #[error("Password exceeds the maximum length of {max} bytes")]
    TooLong { max: usize },

    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    /// The stored hash does not parse as a recognized scheme.
    ///
    /// Carries no detail so callers cannot learn which part of the check failed.
    #[error("Stored password hash is malformed")]
    MalformedHash,

    #[error("Invalid hashing cost: {0}")]
    InvalidCost(String),
}
