//! HTTP handlers for the crop catalogue

use axum::Json;
use serde::Serialize;
use shared::CropCatalog;

#[derive(Serialize)]
pub struct CropInfoResponse {
    pub crops: CropCatalog,
    pub total_crops: usize,
}

/// Descriptions of every supported crop
pub async fn get_crop_info() -> Json<CropInfoResponse> {
    Json(CropInfoResponse {
        crops: CropCatalog,
        total_crops: CropCatalog.len(),
    })
}
