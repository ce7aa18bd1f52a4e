//! Validation of agronomic inputs and coordinates
//!
//! Feature checks run in two passes: every field must be present and numeric,
//! then each value must sit inside its inclusive domain. Both passes stop at
//! the first failure, in [`FEATURE_NAMES`](crate::FEATURE_NAMES) order.

use serde_json::{Map, Value};
use thiserror::Error;

use crate::models::{AgronomicFeatures, FEATURE_COUNT};
use crate::types::GpsCoordinates;

/// Inclusive domain of one feature
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureBound {
    pub field: &'static str,
    pub label: &'static str,
    pub min: f64,
    pub max: f64,
    pub unit: &'static str,
}

/// Domains for every feature, in vector order.
///
/// Rainfall is an average annual total, hence the wide upper bound.
pub const FEATURE_BOUNDS: [FeatureBound; FEATURE_COUNT] = [
    FeatureBound { field: "N", label: "Nitrogen", min: 0.0, max: 200.0, unit: "" },
    FeatureBound { field: "P", label: "Phosphorus", min: 0.0, max: 100.0, unit: "" },
    FeatureBound { field: "K", label: "Potassium", min: 0.0, max: 300.0, unit: "" },
    FeatureBound { field: "temperature", label: "Temperature", min: 0.0, max: 50.0, unit: "°C" },
    FeatureBound { field: "humidity", label: "Humidity", min: 0.0, max: 100.0, unit: "%" },
    FeatureBound { field: "ph", label: "pH", min: 3.0, max: 10.0, unit: "" },
    FeatureBound { field: "rainfall", label: "Rainfall", min: 0.0, max: 5000.0, unit: "mm/year" },
];

/// Rejected feature input
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FeatureError {
    #[error("Missing required field: {field}")]
    Missing { field: &'static str },

    #[error("Invalid value for field: {field}")]
    NotNumeric { field: &'static str },

    #[error("{label} ({field}) must be between {min}-{max}{unit}")]
    OutOfRange {
        field: &'static str,
        label: &'static str,
        min: f64,
        max: f64,
        unit: &'static str,
    },
}

impl FeatureError {
    /// Name of the offending field
    pub fn field(&self) -> &'static str {
        match self {
            FeatureError::Missing { field }
            | FeatureError::NotNumeric { field }
            | FeatureError::OutOfRange { field, .. } => field,
        }
    }
}

/// Rejected coordinate input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CoordinateError {
    #[error("Invalid latitude or longitude")]
    Invalid,

    #[error("Invalid coordinates")]
    OutOfRange,
}

/// Coerce a JSON value to a finite number. Numeric strings are accepted.
fn coerce_number(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    number.filter(|n| n.is_finite())
}

/// Validate raw request fields into [`AgronomicFeatures`]
pub fn validate_features(raw: &Map<String, Value>) -> Result<AgronomicFeatures, FeatureError> {
    let mut values = [0.0; FEATURE_COUNT];
    for (slot, bound) in values.iter_mut().zip(FEATURE_BOUNDS.iter()) {
        let value = raw
            .get(bound.field)
            .ok_or(FeatureError::Missing { field: bound.field })?;
        *slot = coerce_number(value).ok_or(FeatureError::NotNumeric { field: bound.field })?;
    }

    for (value, bound) in values.iter().zip(FEATURE_BOUNDS.iter()) {
        if !(bound.min..=bound.max).contains(value) {
            return Err(FeatureError::OutOfRange {
                field: bound.field,
                label: bound.label,
                min: bound.min,
                max: bound.max,
                unit: bound.unit,
            });
        }
    }

    let [nitrogen, phosphorus, potassium, temperature, humidity, ph, rainfall] = values;
    Ok(AgronomicFeatures {
        nitrogen,
        phosphorus,
        potassium,
        temperature,
        humidity,
        ph,
        rainfall,
    })
}

/// Range-check a coordinate pair
pub fn check_coordinates(latitude: f64, longitude: f64) -> Result<GpsCoordinates, CoordinateError> {
    if !latitude.is_finite() || !longitude.is_finite() {
        return Err(CoordinateError::Invalid);
    }
    if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
        return Err(CoordinateError::OutOfRange);
    }
    Ok(GpsCoordinates::new(latitude, longitude))
}

/// Parse and range-check coordinates given as query-string text
pub fn parse_coordinates(
    latitude: Option<&str>,
    longitude: Option<&str>,
) -> Result<GpsCoordinates, CoordinateError> {
    let parse = |raw: Option<&str>| {
        raw.and_then(|s| s.trim().parse::<f64>().ok())
            .ok_or(CoordinateError::Invalid)
    };
    check_coordinates(parse(latitude)?, parse(longitude)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    fn valid_input() -> Map<String, Value> {
        json!({
            "N": 90,
            "P": 42,
            "K": 43,
            "temperature": 28.0,
            "humidity": 80.0,
            "ph": 6.2,
            "rainfall": 1800.0
        })
        .as_object()
        .cloned()
        .unwrap()
    }

    // ========================================================================
    // Feature Validation Tests
    // ========================================================================

    #[test]
    fn test_validate_features_valid() {
        let features = validate_features(&valid_input()).unwrap();
        assert_eq!(features.nitrogen, 90.0);
        assert_eq!(features.ph, 6.2);
        assert_eq!(features.rainfall, 1800.0);
    }

    #[test]
    fn test_validate_features_numeric_strings() {
        let mut input = valid_input();
        input.insert("K".into(), json!(" 120.5 "));
        let features = validate_features(&input).unwrap();
        assert_eq!(features.potassium, 120.5);
    }

    #[test]
    fn test_validate_features_missing_field() {
        let mut input = valid_input();
        input.remove("humidity");
        let err = validate_features(&input).unwrap_err();
        assert_eq!(err, FeatureError::Missing { field: "humidity" });
        assert_eq!(err.to_string(), "Missing required field: humidity");
    }

    #[test]
    fn test_validate_features_not_numeric() {
        for bad in [json!("abc"), json!(null), json!(true), json!([1]), json!("NaN")] {
            let mut input = valid_input();
            input.insert("P".into(), bad);
            let err = validate_features(&input).unwrap_err();
            assert_eq!(err, FeatureError::NotNumeric { field: "P" });
        }
    }

    #[test]
    fn test_parse_errors_reported_before_range_errors() {
        let mut input = valid_input();
        input.insert("N".into(), json!(999));
        input.insert("rainfall".into(), json!("lots"));
        let err = validate_features(&input).unwrap_err();
        assert_eq!(err.field(), "rainfall");
    }

    #[test]
    fn test_first_range_violation_reported() {
        let mut input = valid_input();
        input.insert("temperature".into(), json!(60));
        input.insert("ph".into(), json!(11));
        let err = validate_features(&input).unwrap_err();
        assert_eq!(err.field(), "temperature");
    }

    #[test]
    fn test_ph_out_of_range_message_names_field() {
        let mut input = valid_input();
        input.insert("ph".into(), json!(11));
        let err = validate_features(&input).unwrap_err();
        assert_eq!(err.field(), "ph");
        assert_eq!(err.to_string(), "pH (ph) must be between 3-10");
    }

    #[test]
    fn test_rainfall_message_carries_unit() {
        let mut input = valid_input();
        input.insert("rainfall".into(), json!(5000.5));
        let err = validate_features(&input).unwrap_err();
        assert_eq!(err.to_string(), "Rainfall (rainfall) must be between 0-5000mm/year");
    }

    #[test]
    fn test_all_bounds_inclusive() {
        for pick_max in [false, true] {
            let mut input = Map::new();
            for bound in FEATURE_BOUNDS {
                let v = if pick_max { bound.max } else { bound.min };
                input.insert(bound.field.into(), json!(v));
            }
            assert!(validate_features(&input).is_ok());
        }
    }

    // ========================================================================
    // Coordinate Validation Tests
    // ========================================================================

    #[test]
    fn test_parse_coordinates() {
        let coords = parse_coordinates(Some("30.9"), Some("75.8")).unwrap();
        assert_eq!(coords, GpsCoordinates::new(30.9, 75.8));
        assert!(parse_coordinates(Some("-90"), Some("180")).is_ok());
    }

    #[test]
    fn test_parse_coordinates_invalid() {
        assert_eq!(parse_coordinates(None, Some("1")), Err(CoordinateError::Invalid));
        assert_eq!(parse_coordinates(Some("north"), Some("1")), Err(CoordinateError::Invalid));
        assert_eq!(parse_coordinates(Some("inf"), Some("1")), Err(CoordinateError::Invalid));
    }

    #[test]
    fn test_parse_coordinates_out_of_range() {
        assert_eq!(parse_coordinates(Some("91"), Some("0")), Err(CoordinateError::OutOfRange));
        assert_eq!(parse_coordinates(Some("0"), Some("-180.5")), Err(CoordinateError::OutOfRange));
    }

    // ========================================================================
    // Property Tests
    // ========================================================================

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        /// Any value inside every domain is accepted unchanged
        #[test]
        fn property_in_range_accepted(fractions in proptest::array::uniform7(0.0f64..=1.0)) {
            let mut input = Map::new();
            for (bound, t) in FEATURE_BOUNDS.iter().zip(fractions) {
                input.insert(bound.field.into(), json!(bound.min + (bound.max - bound.min) * t));
            }
            let features = validate_features(&input);
            prop_assert!(features.is_ok(), "rejected {:?}", input);
        }

        /// A value past either end of a domain is rejected, naming that field
        #[test]
        fn property_out_of_range_names_field(
            index in 0usize..FEATURE_COUNT,
            excess in 0.001f64..1000.0,
            above in any::<bool>(),
        ) {
            let bound = FEATURE_BOUNDS[index];
            let mut input = valid_input();
            let value = if above { bound.max + excess } else { bound.min - excess };
            input.insert(bound.field.into(), json!(value));
            let err = validate_features(&input).unwrap_err();
            prop_assert_eq!(err.field(), bound.field);
        }
    }
}
