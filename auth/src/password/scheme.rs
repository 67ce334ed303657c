use std::fmt;

use serde::Deserialize;

/// Adaptive password hashing schemes understood by [`PasswordHasher`](super::PasswordHasher).
///
/// Stored hashes are self-describing: the scheme, its cost and the salt are all
/// embedded in the hash string, so a hash produced under one configuration keeps
/// verifying after the configured scheme or cost changes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PasswordScheme {
    /// Modular crypt format, `$2b$<cost>$<salt+hash>`.
    #[default]
    Bcrypt,
    /// PHC string format, `$argon2id$v=19$m=..,t=..,p=..$<salt>$<hash>`.
    Argon2id,
    /// PHC string format, `$argon2i$...`.
    Argon2i,
    /// PHC string format, `$argon2d$...`.
    Argon2d,
}

impl PasswordScheme {
    pub const BCRYPT_MIN_COST: u32 = 4;
    pub const BCRYPT_MAX_COST: u32 = 31;

    const BCRYPT_PREFIXES: [&'static str; 4] = ["$2a$", "$2b$", "$2x$", "$2y$"];
    const ARGON2ID_PREFIX: &'static str = "$argon2id$";
    const ARGON2I_PREFIX: &'static str = "$argon2i$";
    const ARGON2D_PREFIX: &'static str = "$argon2d$";

    /// Identify the scheme a stored hash was produced with.
    ///
    /// # Returns
    /// The scheme, or `None` when the prefix is not recognized
    pub fn identify(hash: &str) -> Option<Self> {
        if Self::BCRYPT_PREFIXES
            .iter()
            .any(|prefix| hash.starts_with(prefix))
        {
            Some(Self::Bcrypt)
        } else if hash.starts_with(Self::ARGON2ID_PREFIX) {
            Some(Self::Argon2id)
        } else if hash.starts_with(Self::ARGON2I_PREFIX) {
            Some(Self::Argon2i)
        } else if hash.starts_with(Self::ARGON2D_PREFIX) {
            Some(Self::Argon2d)
        } else {
            None
        }
    }

    /// Cost factor used when none is configured.
    ///
    /// For bcrypt this is the log2 round count, for Argon2 the iteration count.
    pub fn default_cost(self) -> u32 {
        match self {
            Self::Bcrypt => bcrypt::DEFAULT_COST,
            Self::Argon2id | Self::Argon2i | Self::Argon2d => argon2::Params::DEFAULT_T_COST,
        }
    }

    /// Argon2 algorithm for the Argon2 family, `None` for bcrypt.
    pub fn argon2_algorithm(self) -> Option<argon2::Algorithm> {
        match self {
            Self::Bcrypt => None,
            Self::Argon2id => Some(argon2::Algorithm::Argon2id),
            Self::Argon2i => Some(argon2::Algorithm::Argon2i),
            Self::Argon2d => Some(argon2::Algorithm::Argon2d),
        }
    }
}

impl fmt::Display for PasswordScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bcrypt => f.write_str("bcrypt"),
            Self::Argon2id => f.write_str("argon2id"),
            Self::Argon2i => f.write_str("argon2i"),
            Self::Argon2d => f.write_str("argon2d"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identify_bcrypt_variants() {
        for hash in [
            "$2a$12$R9h/cIPz0gi.URNNX3kh2OPST9/PgBkqquzi.Ss7KIUgO2t0jWMUW",
            "$2b$04$EGdrhbKUv8Oc9vGiXX0HQOxSg445d458Muh7DAHskb6QbtCvdxcie",
            "$2y$10$abcdefghijklmnopqrstuu",
        ] {
            assert_eq!(PasswordScheme::identify(hash), Some(PasswordScheme::Bcrypt));
        }
    }

    #[test]
    fn test_identify_argon2() {
        let hash = "$argon2id$v=19$m=19456,t=2,p=1$c29tZXNhbHQ$aGFzaA";
        assert_eq!(
            PasswordScheme::identify(hash),
            Some(PasswordScheme::Argon2id)
        );
    }

    #[test]
    fn test_identify_argon2_variants_separately() {
        assert_eq!(
            PasswordScheme::identify("$argon2i$v=19$m=4096,t=3,p=1$c29tZXNhbHQ$aGFzaA"),
            Some(PasswordScheme::Argon2i)
        );
        assert_eq!(
            PasswordScheme::identify("$argon2d$v=19$m=4096,t=3,p=1$c29tZXNhbHQ$aGFzaA"),
            Some(PasswordScheme::Argon2d)
        );
        assert_eq!(PasswordScheme::identify("$argon2x$v=19$whatever"), None);
    }

    #[test]
    fn test_identify_unknown() {
        assert_eq!(PasswordScheme::identify(""), None);
        assert_eq!(PasswordScheme::identify("plaintext"), None);
        assert_eq!(PasswordScheme::identify("$1$md5crypt$hash"), None);
    }

    #[test]
    fn test_deserialize_lowercase() {
        let scheme: PasswordScheme = serde_json::from_str("\"argon2id\"").unwrap();
        assert_eq!(scheme, PasswordScheme::Argon2id);

        let scheme: PasswordScheme = serde_json::from_str("\"bcrypt\"").unwrap();
        assert_eq!(scheme, PasswordScheme::Bcrypt);
    }
}
