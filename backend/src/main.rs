//! Agro Scout - Backend Server
//!
//! Recommends crops for a plot from soil nutrients, soil pH and climate
//! indicators, for the Agro Scout web front end.

use std::net::SocketAddr;

use agro_scout_backend::external::load_model;
use agro_scout_backend::{create_app, AppState, Config};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::load()?;

    // Initialize tracing
    let default_filter = if config.debug {
        "agro_scout_server=debug,agro_scout_backend=debug,tower_http=debug"
    } else {
        "agro_scout_server=info,agro_scout_backend=info,tower_http=info"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Agro Scout Server");
    tracing::info!("Environment: {}", config.environment);
    tracing::info!("Model path: {}", config.model.path.display());

    // Load the classifier; without one the engine runs on rules
    let model = match load_model(&config.model.path) {
        Ok(Some(model)) => {
            tracing::info!("Model loaded successfully ({} classes)", model.classes().len());
            Some(model)
        }
        Ok(None) => {
            tracing::warn!(
                "Model file not found at {}, using rule-based recommendations",
                config.model.path.display()
            );
            None
        }
        Err(e) => {
            tracing::error!("Error loading model: {}, using rule-based recommendations", e);
            None
        }
    };

    // Create application state
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    let state = AppState::new(config, model)?;

    // Build application
    let app = create_app(state);

    // Start server
    tracing::info!("Listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
