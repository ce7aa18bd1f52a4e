//! Route definitions for the Agro Scout service

use axum::{
    routing::{get, post},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/weather", get(handlers::get_weather))
        .route("/soil", get(handlers::get_soil))
        .route("/recommend", post(handlers::recommend_crops))
        .route("/crops/info", get(handlers::get_crop_info))
}
