//! HTTP handlers for soil estimates

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use serde::Deserialize;
use shared::SoilEstimate;

use crate::error::{AppError, AppResult};
use crate::services::estimate_soil;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct SoilQuery {
    pub location: Option<String>,
}

/// Approximate soil values for a named location
pub async fn get_soil(
    State(state): State<AppState>,
    query: Result<Query<SoilQuery>, QueryRejection>,
) -> AppResult<Json<SoilEstimate>> {
    let location = match &query {
        Ok(Query(query)) => query.location.as_deref().map(str::trim).unwrap_or_default(),
        Err(_) => "",
    };
    if location.is_empty() {
        return Err(AppError::BadRequest("Location parameter required".to_string()));
    }

    let soil = state.with_noise(|noise| estimate_soil(location, noise));
    Ok(Json(soil))
}
