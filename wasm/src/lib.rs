//! WebAssembly module for the Agro Scout front end
//!
//! Provides client-side computation for:
//! - Feature form validation (same rules and messages as the server)
//! - Coordinate checks before a weather lookup
//! - Rule-based candidate scoring for offline previews

use serde_json::{Map, Value};
use wasm_bindgen::prelude::*;

// Re-export shared types for use in JavaScript
pub use shared::models::*;
pub use shared::scoring::*;
pub use shared::validation::*;

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {}

fn parse_object(input_json: &str) -> Result<Map<String, Value>, JsValue> {
    match serde_json::from_str::<Value>(input_json) {
        Ok(Value::Object(map)) => Ok(map),
        _ => Err(JsValue::from_str("JSON data required")),
    }
}

/// Validate the seven feature fields; returns the normalized features as JSON
#[wasm_bindgen]
pub fn validate_feature_form(input_json: &str) -> Result<String, JsValue> {
    let raw = parse_object(input_json)?;
    let features = validate_features(&raw).map_err(|e| JsValue::from_str(&e.to_string()))?;
    serde_json::to_string(&features).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Check that a coordinate pair is in range
#[wasm_bindgen]
pub fn coordinates_valid(latitude: f64, longitude: f64) -> bool {
    check_coordinates(latitude, longitude).is_ok()
}

/// Rank the rule-based candidates for validated features; returns JSON
#[wasm_bindgen]
pub fn score_crops(input_json: &str) -> Result<String, JsValue> {
    let raw = parse_object(input_json)?;
    let features = validate_features(&raw).map_err(|e| JsValue::from_str(&e.to_string()))?;
    serde_json::to_string(&rank_candidates(&features))
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Name of the soil region a location resolves to, if any
#[wasm_bindgen]
pub fn soil_region(location: &str) -> Option<String> {
    match_region(location).map(|r| r.name.to_string())
}
