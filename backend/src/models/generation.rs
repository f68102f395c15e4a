use chrono::{DateTime, Utc};
use repurpose_common::HistoryEntry;

/// One completed repurposing call. The log is append-only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRecord {
    pub id: i64,
    /// Absent for generations recorded without an authenticated caller.
    pub user_id: Option<i64>,
    pub platform: String,
    pub input_text: String,
    pub output_text: String,
    pub created_at: DateTime<Utc>,
}

impl From<GenerationRecord> for HistoryEntry {
    fn from(record: GenerationRecord) -> Self {
        Self {
            id: record.id,
            platform: record.platform,
            input_text: record.input_text,
            output_text: record.output_text,
            created_at: record.created_at,
        }
    }
}
