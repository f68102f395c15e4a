//! Content generation backed by a hosted LLM.
//!
//! The `ContentGenerator` trait is the seam between the HTTP handlers and the
//! provider; `GroqClient` is the production implementation.

mod groq;
pub mod prompts;

pub use groq::GroqClient;

use async_trait::async_trait;
use repurpose_common::Platform;

#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("HTTP request failed: {0}")]
    RequestFailed(String),
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
    #[error("Provider error: {0}")]
    Provider(String),
    #[error("Provider returned no content")]
    EmptyResponse,
}

/// Rewrites an article for a target platform.
#[async_trait]
pub trait ContentGenerator: Send + Sync {
    /// Generate platform-specific content from `article`.
    async fn generate(&self, platform: Platform, article: &str) -> Result<String, LlmError>;
}
