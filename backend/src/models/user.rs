use chrono::{DateTime, Utc};

/// Registered account. Never updated or deleted once created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    /// Lowercased, trimmed email; unique across users.
    pub email: String,
    /// Argon2 PHC string.
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}
