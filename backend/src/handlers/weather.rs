//! HTTP handlers for weather lookups

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use serde::Deserialize;
use shared::{parse_coordinates, CoordinateError, WeatherSnapshot};

use crate::error::AppResult;
use crate::AppState;

/// Query parameters for a weather lookup; parsed by hand for precise errors
#[derive(Debug, Deserialize)]
pub struct WeatherQuery {
    pub lat: Option<String>,
    pub lon: Option<String>,
}

/// Climate signals for a coordinate pair
pub async fn get_weather(
    State(state): State<AppState>,
    query: Result<Query<WeatherQuery>, QueryRejection>,
) -> AppResult<Json<WeatherSnapshot>> {
    let Ok(Query(query)) = query else {
        return Err(CoordinateError::Invalid.into());
    };
    let coords = parse_coordinates(query.lat.as_deref(), query.lon.as_deref())?;
    let snapshot = state.weather.get_weather(coords).await;
    Ok(Json(snapshot))
}
