use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::login::errors::EmailError;

/// Stored account, as returned by the account repository.
#[derive(Debug, Clone)]
pub struct UserAccount {
    pub id: UserId,
    pub email: EmailAddress,
    pub password_hash: String,
    pub is_active: bool,
}

/// Opaque user identifier, used as the token subject.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Email address type
///
/// Validated with an RFC 5322 compliant parser and case-folded, so lookups
/// always use the lower-cased form.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new validated, lower-cased email address.
    ///
    /// # Arguments
    /// * `email` - Raw email string
    ///
    /// # Errors
    /// * `InvalidFormat` - Email does not conform to RFC 5322
    pub fn new(email: &str) -> Result<Self, EmailError> {
        let email = email.trim().to_lowercase();
        email_address::EmailAddress::from_str(&email)
            .map(|_| EmailAddress(email))
            .map_err(|e| EmailError::InvalidFormat(e.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Command to log in with an email and password.
pub struct LoginCommand {
    pub email: EmailAddress,
    pub password: String,
}

impl LoginCommand {
    /// Construct a login command from raw request values.
    ///
    /// # Errors
    /// * `InvalidFormat` - Email is not a valid address
    pub fn new(email: &str, password: impl Into<String>) -> Result<Self, EmailError> {
        Ok(Self {
            email: EmailAddress::new(email)?,
            password: password.into(),
        })
    }
}

impl fmt::Debug for LoginCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginCommand")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Successful login, echoed to the client by the transport layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginOutcome {
    pub access_token: String,
    pub token_type: String,
    pub roles: Vec<String>,
}

impl LoginOutcome {
    pub const TOKEN_TYPE: &'static str = "bearer";

    pub fn bearer(access_token: String, roles: Vec<String>) -> Self {
        Self {
            access_token,
            token_type: Self::TOKEN_TYPE.to_string(),
            roles,
        }
    }
}
