//! Content generation and history payloads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::platform::Platform;

fn default_platform() -> String {
    Platform::default().as_str().to_string()
}

/// Body of `POST /repurpose`.
///
/// `platform` stays a raw string so an unknown key can be rejected with a
/// descriptive error instead of a generic body rejection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepurposeRequest {
    pub article: String,
    #[serde(default = "default_platform")]
    pub platform: String,
}

/// Returned by `POST /repurpose`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepurposeResponse {
    pub platform: Platform,
    pub repurposed_content: String,
}

/// A single past generation as exposed by `GET /history`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: i64,
    pub platform: String,
    pub input_text: String,
    pub output_text: String,
    pub created_at: DateTime<Utc>,
}

/// Returned by `GET /history`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryResponse {
    pub history: Vec<HistoryEntry>,
}
