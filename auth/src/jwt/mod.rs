pub mod claims;
pub mod errors;
pub mod issuer;
pub mod secret;

pub use claims::AccessClaims;
pub use errors::JwtError;
pub use issuer::TokenIssuer;
pub use secret::TokenSecret;
