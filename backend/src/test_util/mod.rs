//! Fixtures shared by unit and integration tests.

use std::sync::{Arc, Mutex};

use argon2::Params;
use async_trait::async_trait;
use repurpose_common::Platform;

use crate::config::{
    AuthConfig, Config, CorsConfig, DatabaseConfig, GroqConfig, LoggingConfig,
};
use crate::db::Store;
use crate::llm::{ContentGenerator, LlmError};
use crate::AppState;

pub const TEST_JWT_SECRET: &str = "test-secret-key-12345";

/// Config with an in-memory database and the cheapest Argon2 parameters.
pub fn test_config() -> Config {
    Config {
        host: "127.0.0.1".to_string(),
        port: 8000,
        groq: GroqConfig {
            api_key: "gsk_test".to_string(),
            base_url: "http://127.0.0.1:9".to_string(),
            model: "test-model".to_string(),
            timeout_secs: 5,
        },
        auth: AuthConfig {
            jwt_secret: TEST_JWT_SECRET.to_string(),
            token_ttl_hours: 24,
            hash_memory_kib: Params::MIN_M_COST,
            hash_iterations: 1,
        },
        database: DatabaseConfig {
            url: ":memory:".to_string(),
        },
        logging: LoggingConfig {
            level: "debug".to_string(),
        },
        cors: CorsConfig {
            origins: "*".to_string(),
        },
    }
}

/// Build state around `generator` using [`test_config`].
pub fn create_test_state(generator: Arc<dyn ContentGenerator>) -> Arc<AppState> {
    create_test_state_with_config(test_config(), generator)
}

pub fn create_test_state_with_config(
    config: Config,
    generator: Arc<dyn ContentGenerator>,
) -> Arc<AppState> {
    let store = Arc::new(Store::new(&config.database.url).unwrap());
    Arc::new(AppState::new(config, store, generator).unwrap())
}

/// Generator that answers from memory and records what it was asked.
#[derive(Default)]
pub struct StubGenerator {
    fail: bool,
    calls: Mutex<Vec<(Platform, String)>>,
}

impl StubGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// A generator whose every call fails like an unreachable provider.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<(Platform, String)> {
        self.calls.lock().unwrap().clone()
    }

    /// The canned output for a platform and article.
    pub fn output_for(platform: Platform, article: &str) -> String {
        format!("[{}] {}", platform, article)
    }
}

#[async_trait]
impl ContentGenerator for StubGenerator {
    async fn generate(&self, platform: Platform, article: &str) -> Result<String, LlmError> {
        self.calls
            .lock()
            .unwrap()
            .push((platform, article.to_string()));

        if self.fail {
            return Err(LlmError::RequestFailed("connection refused".to_string()));
        }
        Ok(Self::output_for(platform, article))
    }
}
