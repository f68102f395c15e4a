pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod extract;
pub mod llm;
pub mod logging;
pub mod models;
pub mod routes;
pub mod test_util;
pub mod validation;

pub use auth::{AuthUser, PasswordHasher, TokenService};
pub use config::Config;
pub use db::Store;
pub use error::ApiError;
pub use llm::{ContentGenerator, GroqClient};
pub use routes::app;

use std::sync::Arc;

use crate::auth::PasswordError;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    /// Issues and validates session tokens.
    pub tokens: TokenService,
    pub hasher: PasswordHasher,
    /// User accounts and generation history.
    pub store: Arc<Store>,
    /// Content provider; swapped for a stub in tests.
    pub generator: Arc<dyn ContentGenerator>,
}

impl AppState {
    pub fn new(
        config: Config,
        store: Arc<Store>,
        generator: Arc<dyn ContentGenerator>,
    ) -> Result<Self, PasswordError> {
        let tokens = TokenService::from_config(&config.auth);
        let hasher = PasswordHasher::from_config(&config.auth)?;

        Ok(Self {
            config,
            tokens,
            hasher,
            store,
            generator,
        })
    }
}
