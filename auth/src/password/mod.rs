pub mod errors;
pub mod hasher;
pub mod scheme;

pub use errors::PasswordError;
pub use hasher::PasswordHasher;
pub use scheme::PasswordScheme;
