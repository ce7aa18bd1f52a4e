//! Weather data models

use serde::{Deserialize, Serialize};

/// Climate signals for a coordinate pair.
///
/// `rainfall` is the average annual precipitation in millimetres over the
/// reference climatology window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub temperature: f64,
    pub humidity: f64,
    pub rainfall: f64,
}

/// Snapshot served whenever upstream data cannot be obtained in full
pub const FALLBACK_WEATHER: WeatherSnapshot = WeatherSnapshot {
    temperature: 25.0,
    humidity: 60.0,
    rainfall: 1200.0,
};
