//! Credential handling: password hashing, strength scoring and session tokens.

pub mod password;
pub mod strength;
pub mod token;

pub use password::{PasswordError, PasswordHasher};
pub use strength::evaluate;
pub use token::TokenService;

/// Authenticated caller identity extracted from a session token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    pub user_id: i64,
    pub email: String,
}

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Missing Authorization header")]
    MissingHeader,
    #[error("Invalid Authorization header format")]
    InvalidFormat,
    /// Malformed, forged and expired tokens are deliberately indistinguishable.
    #[error("Invalid or expired token")]
    InvalidToken,
    #[error("Failed to sign token: {0}")]
    Signing(String),
}
