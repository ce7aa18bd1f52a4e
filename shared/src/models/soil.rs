//! Soil models and regional soil averages

use serde::{Deserialize, Serialize};

/// Approximate soil nutrient levels and pH for a location
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SoilEstimate {
    pub nitrogen: f64,
    pub phosphorus: f64,
    pub potassium: f64,
    pub ph: f64,
}

/// Baseline soil values for a named region
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegionSoil {
    pub name: &'static str,
    pub baseline: SoilEstimate,
}

const fn region(name: &'static str, n: f64, p: f64, k: f64, ph: f64) -> RegionSoil {
    RegionSoil {
        name,
        baseline: SoilEstimate {
            nitrogen: n,
            phosphorus: p,
            potassium: k,
            ph,
        },
    }
}

/// State-level soil averages; matching walks this table in order
pub static REGION_SOILS: &[RegionSoil] = &[
    region("punjab", 85.0, 40.0, 180.0, 7.2),
    region("haryana", 82.0, 38.0, 175.0, 7.1),
    region("uttar pradesh", 78.0, 35.0, 165.0, 6.8),
    region("west bengal", 80.0, 42.0, 170.0, 6.5),
    region("andhra pradesh", 75.0, 45.0, 190.0, 6.9),
    region("karnataka", 72.0, 38.0, 160.0, 6.7),
    region("maharashtra", 70.0, 36.0, 155.0, 7.0),
    region("gujarat", 68.0, 32.0, 145.0, 7.3),
    region("rajasthan", 65.0, 30.0, 140.0, 7.5),
    region("madhya pradesh", 74.0, 34.0, 150.0, 6.9),
];

/// Centre of the envelope returned for unknown locations
pub const DEFAULT_SOIL: SoilEstimate = SoilEstimate {
    nitrogen: 75.0,
    phosphorus: 35.0,
    potassium: 160.0,
    ph: 6.8,
};

/// Absolute standard deviation per field around [`DEFAULT_SOIL`]
pub const DEFAULT_SOIL_SPREAD: SoilEstimate = SoilEstimate {
    nitrogen: 10.0,
    phosphorus: 8.0,
    potassium: 20.0,
    ph: 0.3,
};

/// Find the first region whose name occurs in `location`, or whose name
/// contains `location`. Case-insensitive; blank input matches nothing.
pub fn match_region(location: &str) -> Option<&'static RegionSoil> {
    let needle = location.trim().to_lowercase();
    if needle.is_empty() {
        return None;
    }
    REGION_SOILS
        .iter()
        .find(|r| needle.contains(r.name) || r.name.contains(needle.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_region_substring_of_input() {
        let region = match_region("Punjab Region").unwrap();
        assert_eq!(region.name, "punjab");
    }

    #[test]
    fn test_match_region_input_substring_of_name() {
        assert_eq!(match_region("bengal").unwrap().name, "west bengal");
    }

    #[test]
    fn test_match_region_follows_table_order() {
        // "pradesh" is contained in three names; the first table entry wins
        assert_eq!(match_region("Pradesh").unwrap().name, "uttar pradesh");
        // Both names occur in the input; punjab precedes haryana
        assert_eq!(match_region("Haryana and Punjab").unwrap().name, "punjab");
    }

    #[test]
    fn test_match_region_unknown_or_blank() {
        assert!(match_region("Bavaria").is_none());
        assert!(match_region("   ").is_none());
    }
}
