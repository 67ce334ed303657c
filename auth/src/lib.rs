//! Credential verification and access token issuance.
//!
//! Provides the two stateless building blocks of a password login:
//! - Password hashing and verification (bcrypt or Argon2, self-describing hashes)
//! - Signed, time-limited access tokens (HS256 JWT)
//! - Authentication coordination over both
//!
//! All configuration (signing secret, token validity, hashing cost) is passed in
//! explicitly at construction; nothing is read from the environment here.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use credential_auth::{PasswordHasher, PasswordScheme};
//!
//! let hasher = PasswordHasher::with_scheme(PasswordScheme::Bcrypt, 4).unwrap();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash));
//! assert!(!hasher.verify("not_my_password", &hash));
//! ```
//!
//! ## Access Tokens
//! ```
//! use chrono::Duration;
//! use credential_auth::{AccessClaims, TokenIssuer, TokenSecret};
//!
//! let secret = TokenSecret::new("secret_key_at_least_32_bytes_long!").unwrap();
//! let issuer = TokenIssuer::new(&secret, Duration::minutes(60)).unwrap();
//! let token = issuer.issue("user123", serde_json::Map::new()).unwrap();
//! let decoded: AccessClaims = issuer.decode(&token).unwrap();
//! assert_eq!(decoded.sub, "user123");
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use credential_auth::{Authenticator, PasswordSettings, PasswordScheme, Principal, TokenSettings};
//!
//! let auth = Authenticator::from_settings(
//!     &TokenSettings::new("secret_key_at_least_32_bytes_long!"),
//!     &PasswordSettings { scheme: PasswordScheme::Bcrypt, cost: Some(4) },
//! )
//! .unwrap();
//!
//! let hash = auth.hash_password("password123").unwrap();
//!
//! let principal = Principal::new("user123", vec!["admin".to_string()]);
//! let result = auth.authenticate("password123", &hash, &principal).unwrap();
//!
//! let decoded = auth.validate_token(&result.access_token).unwrap();
//! assert_eq!(decoded.roles, vec!["admin".to_string()]);
//! ```

pub mod authenticator;
pub mod config;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use authenticator::Principal;
pub use config::ConfigurationError;
pub use config::PasswordSettings;
pub use config::TokenSettings;
pub use jwt::AccessClaims;
pub use jwt::JwtError;
pub use jwt::TokenIssuer;
pub use jwt::TokenSecret;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use password::PasswordScheme;
