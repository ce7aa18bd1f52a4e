//! Agro Scout - Backend Library
//!
//! Crop recommendation service: weather acquisition, soil estimation, input
//! validation and the recommendation engine, served over a small JSON API.

use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use axum::Router;
use rand::rngs::StdRng;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub mod config;
pub mod error;
pub mod external;
pub mod handlers;
pub mod routes;
pub mod services;

pub use config::Config;

use external::{CropClassifier, OpenMeteoClient};
use services::{NoiseSource, RecommendationEngine, RngNoise, WeatherProvider};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub weather: Arc<WeatherProvider<OpenMeteoClient>>,
    pub engine: Arc<RecommendationEngine>,
    noise: Arc<Mutex<RngNoise<StdRng>>>,
}

impl AppState {
    /// Wire up services from configuration and an optional loaded classifier
    pub fn new(config: Config, model: Option<Arc<dyn CropClassifier>>) -> anyhow::Result<Self> {
        let weather_config = &config.weather;
        let client = OpenMeteoClient::new(
            weather_config.forecast_endpoint.clone(),
            weather_config.archive_endpoint.clone(),
            weather_config.api_key.clone(),
            Duration::from_secs(weather_config.timeout_secs),
        )?;
        let capacity = NonZeroUsize::new(weather_config.cache_capacity)
            .ok_or_else(|| anyhow::anyhow!("weather.cache_capacity must be at least 1"))?;
        let weather = WeatherProvider::new(client, weather_config.reference_window()?, capacity);
        let noise = RngNoise::from_seed(config.recommendation.seed);

        Ok(Self {
            weather: Arc::new(weather),
            engine: Arc::new(RecommendationEngine::new(model)),
            noise: Arc::new(Mutex::new(noise)),
            config: Arc::new(config),
        })
    }

    /// Run `f` with exclusive access to the process noise source
    pub fn with_noise<T>(&self, f: impl FnOnce(&mut dyn NoiseSource) -> T) -> T {
        let mut noise = self.noise.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut *noise)
    }
}

/// Create the application router with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .nest("/api", routes::api_routes())
        .fallback(handlers::not_found)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
