//! HTTP request handlers

pub mod crops;
pub mod health;
pub mod recommendation;
pub mod soil;
pub mod weather;

pub use crops::get_crop_info;
pub use health::health_check;
pub use recommendation::recommend_crops;
pub use soil::get_soil;
pub use weather::get_weather;

use crate::error::AppError;

/// Fallback for unknown routes
pub async fn not_found() -> AppError {
    AppError::NotFound("Endpoint".to_string())
}
