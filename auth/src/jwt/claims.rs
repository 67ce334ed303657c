use std::collections::HashMap;

use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Subject claim name.
pub const SUBJECT_CLAIM: &str = "sub";
/// Expiration claim name (seconds since the Unix epoch).
pub const EXPIRY_CLAIM: &str = "exp";
/// Issued-at claim name (seconds since the Unix epoch).
pub const ISSUED_AT_CLAIM: &str = "iat";
/// Role keys claim name.
pub const ROLES_CLAIM: &str = "roles";

/// Claims computed by the issuer. Caller-supplied values under these names
/// are overwritten.
pub const RESERVED_CLAIMS: [&str; 3] = [SUBJECT_CLAIM, EXPIRY_CLAIM, ISSUED_AT_CLAIM];

/// Decoded access token payload.
///
/// `sub` and `exp` are always present on issued tokens. Claims other than the
/// registered ones and `roles` are kept in `extra`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AccessClaims {
    /// Subject (user identifier)
    pub sub: String,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// Issued at (Unix timestamp)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,

    /// Role keys granted to the subject
    #[serde(default)]
    pub roles: Vec<String>,

    /// Additional custom fields (flattened into token)
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

impl AccessClaims {
    /// Check if the token is expired.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        self.exp < current_timestamp
    }

    /// Expiration as a UTC instant.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
    }

    /// Check if a role key was granted.
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }
}
