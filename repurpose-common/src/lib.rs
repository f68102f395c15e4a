//! Repurpose Common Types
//!
//! Wire types shared by the backend and its clients.

pub mod auth;
pub mod generation;
pub mod platform;

pub use auth::{
    AuthResponse, CheckPasswordRequest, LoginRequest, PasswordChecks, PasswordStrengthReport,
    RegisterRequest, Strength,
};
pub use generation::{HistoryEntry, HistoryResponse, RepurposeRequest, RepurposeResponse};
pub use platform::{Platform, UnknownPlatform};
