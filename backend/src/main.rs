use std::sync::Arc;

use tokio::net::TcpListener;

use repurpose_backend::config::Config;
use repurpose_backend::{app, logging, AppState, GroqClient, Store};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // A missing .env file is fine; real deployments set the environment directly.
    dotenvy::dotenv().ok();

    let config = Config::load()?;
    logging::init(&config.logging.level);

    tracing::info!("Starting repurpose backend v{}", env!("CARGO_PKG_VERSION"));

    let store = Arc::new(Store::new(&config.database.url)?);
    let generator = Arc::new(GroqClient::from_config(&config.groq)?);
    tracing::info!("Using Groq model {} at {}", config.groq.model, config.groq.base_url);

    let addr = config.bind_addr();
    let state = Arc::new(AppState::new(config, store, generator)?);

    tracing::info!("Listening on {}", addr);
    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, app(state)).await?;

    Ok(())
}
