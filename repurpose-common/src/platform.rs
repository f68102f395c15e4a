//! Target platforms for repurposed content.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Platforms an article can be rewritten for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Platform {
    /// Five-tweet thread
    #[default]
    Twitter,
    /// Professional post
    Linkedin,
    /// Caption with hashtags
    Instagram,
    /// Newsletter section with a subject line
    Newsletter,
    /// Long-form blog post
    Medium,
}

impl Platform {
    /// All platform variants for iteration.
    pub const ALL: [Platform; 5] = [
        Platform::Twitter,
        Platform::Linkedin,
        Platform::Instagram,
        Platform::Newsletter,
        Platform::Medium,
    ];

    /// Wire key used in requests, responses and storage.
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Twitter => "twitter",
            Platform::Linkedin => "linkedin",
            Platform::Instagram => "instagram",
            Platform::Newsletter => "newsletter",
            Platform::Medium => "medium",
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a platform key is not one of [`Platform::ALL`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unsupported platform '{0}'. Expected one of: twitter, linkedin, instagram, newsletter, medium")]
pub struct UnknownPlatform(pub String);

impl FromStr for Platform {
    type Err = UnknownPlatform;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Platform::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| UnknownPlatform(s.to_string()))
    }
}
