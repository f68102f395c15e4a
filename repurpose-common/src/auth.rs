//! Authentication request and response bodies.

use serde::{Deserialize, Serialize};

/// Body of `POST /register`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
}

/// Body of `POST /login`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Returned by both register and login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    /// Bearer token for subsequent requests.
    pub token: String,
    /// Normalized (lowercase) email of the account.
    pub email: String,
}

/// Body of `POST /check-password`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckPasswordRequest {
    pub password: String,
}

/// Outcome of each individual strength rule.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasswordChecks {
    /// At least 8 characters.
    pub length: bool,
    pub uppercase: bool,
    pub lowercase: bool,
    pub digit: bool,
    /// At least one character from the accepted symbol set.
    pub symbol: bool,
}

impl PasswordChecks {
    /// Number of satisfied rules (0 to 5).
    pub fn passed(&self) -> u8 {
        [self.length, self.uppercase, self.lowercase, self.digit, self.symbol]
            .into_iter()
            .filter(|passed| *passed)
            .count() as u8
    }
}

/// Password strength category derived from the score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strength {
    Weak,
    Medium,
    Strong,
}

impl Strength {
    /// Score 0-2 is weak, 3-4 medium, 5 strong.
    pub fn from_score(score: u8) -> Self {
        match score {
            0..=2 => Strength::Weak,
            3..=4 => Strength::Medium,
            _ => Strength::Strong,
        }
    }
}

impl std::fmt::Display for Strength {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Strength::Weak => write!(f, "weak"),
            Strength::Medium => write!(f, "medium"),
            Strength::Strong => write!(f, "strong"),
        }
    }
}

/// Result of evaluating a candidate password. Never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasswordStrengthReport {
    pub checks: PasswordChecks,
    pub score: u8,
    pub strength: Strength,
}

impl PasswordStrengthReport {
    pub fn from_checks(checks: PasswordChecks) -> Self {
        let score = checks.passed();
        Self {
            checks,
            score,
            strength: Strength::from_score(score),
        }
    }

    pub fn is_weak(&self) -> bool {
        self.strength == Strength::Weak
    }
}
