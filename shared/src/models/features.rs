//! Agronomic feature models

use serde::{Deserialize, Serialize};

/// Number of features the recommendation engine consumes
pub const FEATURE_COUNT: usize = 7;

/// Feature names in the fixed order used for model input
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] =
    ["N", "P", "K", "temperature", "humidity", "ph", "rainfall"];

/// Validated soil and climate inputs for one plot.
///
/// Construct through [`crate::validate_features`]; every field is inside its
/// documented domain. Rainfall is the average annual total in millimetres.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AgronomicFeatures {
    #[serde(rename = "N")]
    pub nitrogen: f64,
    #[serde(rename = "P")]
    pub phosphorus: f64,
    #[serde(rename = "K")]
    pub potassium: f64,
    pub temperature: f64,
    pub humidity: f64,
    pub ph: f64,
    pub rainfall: f64,
}

impl AgronomicFeatures {
    /// Feature vector in [`FEATURE_NAMES`] order
    pub fn to_vector(&self) -> [f64; FEATURE_COUNT] {
        [
            self.nitrogen,
            self.phosphorus,
            self.potassium,
            self.temperature,
            self.humidity,
            self.ph,
            self.rainfall,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vector_order_matches_names() {
        let features = AgronomicFeatures {
            nitrogen: 1.0,
            phosphorus: 2.0,
            potassium: 3.0,
            temperature: 4.0,
            humidity: 5.0,
            ph: 6.0,
            rainfall: 7.0,
        };
        assert_eq!(features.to_vector(), [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0]);
    }

    #[test]
    fn test_serializes_with_wire_names() {
        let features = AgronomicFeatures {
            nitrogen: 90.0,
            phosphorus: 42.0,
            potassium: 43.0,
            temperature: 28.0,
            humidity: 80.0,
            ph: 6.2,
            rainfall: 1800.0,
        };
        let json = serde_json::to_value(features).unwrap();
        for name in FEATURE_NAMES {
            assert!(json.get(name).is_some(), "missing {}", name);
        }
    }
}
