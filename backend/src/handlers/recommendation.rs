//! HTTP handlers for crop recommendations

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use shared::{validate_features, AgronomicFeatures, Recommendation};

use crate::error::{AppError, AppResult};
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct RecommendResponse {
    pub recommendations: Vec<Recommendation>,
    pub input_data: AgronomicFeatures,
    pub timestamp: DateTime<Utc>,
}

/// Rank crops for the submitted soil and climate features
pub async fn recommend_crops(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> AppResult<Json<RecommendResponse>> {
    let Ok(Json(Value::Object(raw))) = payload else {
        return Err(AppError::BadRequest("JSON data required".to_string()));
    };

    let features = validate_features(&raw)?;
    let recommendations = state.with_noise(|noise| state.engine.recommend(&features, noise));
    if recommendations.is_empty() {
        return Err(AppError::Internal(
            "recommendation engine returned no results".to_string(),
        ));
    }

    tracing::info!(
        top = %recommendations[0].name,
        confidence = recommendations[0].confidence,
        trend = %recommendations[0].trend,
        model = state.engine.model_loaded(),
        "Recommendations generated"
    );

    Ok(Json(RecommendResponse {
        recommendations,
        input_data: features,
        timestamp: Utc::now(),
    }))
}
