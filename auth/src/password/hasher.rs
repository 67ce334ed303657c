use std::str::FromStr;

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::PasswordHash;
use argon2::password_hash::PasswordHasher as Argon2PasswordHasher;
use argon2::password_hash::PasswordVerifier;
use argon2::password_hash::SaltString;
use argon2::Argon2;
use argon2::Params;
use argon2::Version;

use super::errors::PasswordError;
use super::scheme::PasswordScheme;

/// Password hashing and verification.
///
/// New hashes are produced with the configured scheme and cost. Verification
/// dispatches on the scheme embedded in the stored hash, so hashes written under
/// an older configuration remain valid after the cost is raised.
#[derive(Clone)]
pub struct PasswordHasher {
    scheme: PasswordScheme,
    cost: u32,
    argon2: Argon2<'static>,
}

impl PasswordHasher {
    /// Upper bound on accepted password length, in bytes.
    pub const MAX_PASSWORD_BYTES: usize = 1024;

    /// Create a hasher with the default scheme (bcrypt) and cost.
    pub fn new() -> Self {
        Self {
            scheme: PasswordScheme::Bcrypt,
            cost: bcrypt::DEFAULT_COST,
            argon2: Argon2::default(),
        }
    }

    /// Create a hasher for a specific scheme and cost factor.
    ///
    /// # Arguments
    /// * `scheme` - Scheme used for new hashes
    /// * `cost` - bcrypt log2 rounds, or Argon2 iterations
    ///
    /// # Errors
    /// * `InvalidCost` - Cost is outside the range the scheme accepts
    pub fn with_scheme(scheme: PasswordScheme, cost: u32) -> Result<Self, PasswordError> {
        let argon2 = match scheme.argon2_algorithm() {
            None => {
                if !(PasswordScheme::BCRYPT_MIN_COST..=PasswordScheme::BCRYPT_MAX_COST)
                    .contains(&cost)
                {
                    return Err(PasswordError::InvalidCost(format!(
                        "bcrypt cost must be between {} and {}, got {}",
                        PasswordScheme::BCRYPT_MIN_COST,
                        PasswordScheme::BCRYPT_MAX_COST,
                        cost
                    )));
                }
                Argon2::default()
            }
            Some(algorithm) => {
                let params = Params::new(
                    Params::DEFAULT_M_COST,
                    cost,
                    Params::DEFAULT_P_COST,
                    None,
                )
                .map_err(|e| PasswordError::InvalidCost(format!("{}: {}", scheme, e)))?;
                Argon2::new(algorithm, Version::V0x13, params)
            }
        };

        Ok(Self {
            scheme,
            cost,
            argon2,
        })
    }

    /// Scheme used for new hashes.
    pub fn scheme(&self) -> PasswordScheme {
        self.scheme
    }

    /// Cost factor used for new hashes.
    pub fn cost(&self) -> u32 {
        self.cost
    }

    /// Hash a plaintext password with a fresh random salt.
    ///
    /// # Returns
    /// Self-describing hash string (scheme, cost, salt and digest)
    ///
    /// # Errors
    /// * `EmptyPassword` - Password is empty
    /// * `TooLong` - Password exceeds `MAX_PASSWORD_BYTES`
    /// * `HashingFailed` - Underlying hashing operation failed
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        if password.is_empty() {
            return Err(PasswordError::EmptyPassword);
        }
        if password.len() > Self::MAX_PASSWORD_BYTES {
            return Err(PasswordError::TooLong {
                max: Self::MAX_PASSWORD_BYTES,
            });
        }

        match self.scheme {
            PasswordScheme::Bcrypt => bcrypt::hash(password, self.cost)
                .map_err(|e| PasswordError::HashingFailed(e.to_string())),
            PasswordScheme::Argon2id | PasswordScheme::Argon2i | PasswordScheme::Argon2d => {
                let salt = SaltString::generate(&mut OsRng);
                self.argon2
                    .hash_password(password.as_bytes(), &salt)
                    .map(|hash| hash.to_string())
                    .map_err(|e| PasswordError::HashingFailed(e.to_string()))
            }
        }
    }

    /// Verify a password against a stored hash, failing closed.
    ///
    /// A malformed hash yields `false` and is reported through `tracing`.
    /// Use [`check`](Self::check) to observe the condition directly.
    pub fn verify(&self, password: &str, hash: &str) -> bool {
        match self.check(password, hash) {
            Ok(matches) => matches,
            Err(e) => {
                tracing::warn!(error = %e, "Password verification failed closed");
                false
            }
        }
    }

    /// Verify a password against a stored hash.
    ///
    /// The comparison runs in constant time inside the scheme implementation.
    ///
    /// # Returns
    /// True if the password matches, false otherwise
    ///
    /// # Errors
    /// * `MalformedHash` - Stored hash is not a recognized, well-formed scheme
    pub fn check(&self, password: &str, hash: &str) -> Result<bool, PasswordError> {
        let scheme = PasswordScheme::identify(hash).ok_or(PasswordError::MalformedHash)?;

        if password.len() > Self::MAX_PASSWORD_BYTES {
            return Ok(false);
        }

        match scheme {
            PasswordScheme::Bcrypt => {
                bcrypt::verify(password, hash).map_err(|_| PasswordError::MalformedHash)
            }
            PasswordScheme::Argon2id | PasswordScheme::Argon2i | PasswordScheme::Argon2d => {
                let parsed_hash =
                    PasswordHash::new(hash).map_err(|_| PasswordError::MalformedHash)?;
                if parsed_hash.salt.is_none() || parsed_hash.hash.is_none() {
                    return Err(PasswordError::MalformedHash);
                }
                match self.argon2.verify_password(password.as_bytes(), &parsed_hash) {
                    Ok(()) => Ok(true),
                    Err(argon2::password_hash::Error::Password) => Ok(false),
                    Err(_) => Err(PasswordError::MalformedHash),
                }
            }
        }
    }

    /// Whether a stored hash was produced with a weaker configuration.
    ///
    /// True when the scheme differs from the configured one or its cost is
    /// lower. Malformed hashes always need rehashing.
    pub fn needs_rehash(&self, hash: &str) -> bool {
        match PasswordScheme::identify(hash) {
            Some(scheme) if scheme == self.scheme => match Self::embedded_cost(scheme, hash) {
                Some(cost) => cost < self.cost,
                None => true,
            },
            _ => true,
        }
    }

    fn embedded_cost(scheme: PasswordScheme, hash: &str) -> Option<u32> {
        match scheme {
            PasswordScheme::Bcrypt => bcrypt::HashParts::from_str(hash)
                .ok()
                .map(|parts| parts.get_cost()),
            PasswordScheme::Argon2id | PasswordScheme::Argon2i | PasswordScheme::Argon2d => {
                let parsed_hash = PasswordHash::new(hash).ok()?;
                Params::try_from(&parsed_hash).ok().map(|p| p.t_cost())
            }
        }
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}
