//! Configuration for the repurposing backend.

use std::env;

use config::{Config as ConfigLoader, Environment, File};
use serde::Deserialize;

/// Application configuration.
///
/// The signing secret and the Groq API key are required; everything else has
/// a default.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Server host (default: 0.0.0.0)
    #[serde(default = "default_host")]
    pub host: String,
    /// Server port (default: 8000)
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub groq: GroqConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub cors: CorsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GroqConfig {
    /// API key sent as a bearer token to Groq.
    #[serde(default)]
    pub api_key: String,
    /// OpenAI-compatible base URL, without the trailing `/chat/completions`.
    #[serde(default = "default_groq_base_url")]
    pub base_url: String,
    #[serde(default = "default_groq_model")]
    pub model: String,
    /// Whole-request timeout for a generation call.
    #[serde(default = "default_groq_timeout")]
    pub timeout_secs: u64,
}

impl Default for GroqConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_groq_base_url(),
            model: default_groq_model(),
            timeout_secs: default_groq_timeout(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// HS256 signing secret for session tokens. Changing it invalidates every
    /// outstanding token.
    #[serde(default)]
    pub jwt_secret: String,
    #[serde(default = "default_token_ttl_hours")]
    pub token_ttl_hours: u64,
    /// Argon2 memory cost in KiB.
    #[serde(default = "default_hash_memory_kib")]
    pub hash_memory_kib: u32,
    /// Argon2 iteration count.
    #[serde(default = "default_hash_iterations")]
    pub hash_iterations: u32,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            token_ttl_hours: default_token_ttl_hours(),
            hash_memory_kib: default_hash_memory_kib(),
            hash_iterations: default_hash_iterations(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_database_url")]
    pub url: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: default_database_url(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CorsConfig {
    /// Comma-separated list of allowed origins, or `*` for any.
    #[serde(default = "default_cors_origins")]
    pub origins: String,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            origins: default_cors_origins(),
        }
    }
}

// Default values
fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    8000
}
fn default_groq_base_url() -> String {
    "https://api.groq.com/openai/v1".to_string()
}
fn default_groq_model() -> String {
    "llama-3.3-70b-versatile".to_string()
}
fn default_groq_timeout() -> u64 {
    60
}
fn default_token_ttl_hours() -> u64 {
    24
}
fn default_hash_memory_kib() -> u32 {
    argon2::Params::DEFAULT_M_COST
}
fn default_hash_iterations() -> u32 {
    argon2::Params::DEFAULT_T_COST
}
fn default_database_url() -> String {
    "sqlite:./data/repurpose.db".to_string()
}
fn default_log_level() -> String {
    "info".to_string()
}
fn default_cors_origins() -> String {
    "*".to_string()
}

/// Longest accepted session lifetime (one year).
pub const MAX_TOKEN_TTL_HOURS: u64 = 24 * 365;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),
    #[error("Missing required setting {setting} (set {env_var})")]
    Missing {
        setting: &'static str,
        env_var: &'static str,
    },
    #[error("Invalid setting {setting}: {reason}")]
    Invalid {
        setting: &'static str,
        reason: String,
    },
}

impl Config {
    /// Load configuration from file and environment variables.
    ///
    /// Configuration sources (in order of precedence):
    /// 1. `GROQ_API_KEY` and `JWT_SECRET_KEY`
    /// 2. Environment variables (REPURPOSE__SECTION__KEY format)
    /// 3. config.toml file (if present)
    /// 4. Built-in defaults
    pub fn load() -> Result<Self, ConfigError> {
        let config = ConfigLoader::builder()
            .add_source(File::with_name("config").required(false))
            .add_source(
                Environment::with_prefix("REPURPOSE")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option("groq.api_key", env::var("GROQ_API_KEY").ok())?
            .set_override_option("auth.jwt_secret", env::var("JWT_SECRET_KEY").ok())?
            .build()?;

        let config: Config = config.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations the service cannot start with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.groq.api_key.trim().is_empty() {
            return Err(ConfigError::Missing {
                setting: "groq.api_key",
                env_var: "GROQ_API_KEY",
            });
        }
        if self.auth.jwt_secret.is_empty() {
            return Err(ConfigError::Missing {
                setting: "auth.jwt_secret",
                env_var: "JWT_SECRET_KEY",
            });
        }
        if !(1..=MAX_TOKEN_TTL_HOURS).contains(&self.auth.token_ttl_hours) {
            return Err(ConfigError::Invalid {
                setting: "auth.token_ttl_hours",
                reason: format!("must be between 1 and {}", MAX_TOKEN_TTL_HOURS),
            });
        }
        Ok(())
    }

    /// Address the HTTP listener binds to.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
