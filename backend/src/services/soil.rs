//! Soil estimation from a free-text location
//!
//! Known regions return their baseline scaled by independent relative noise
//! (σ = 10%); anything else returns the default envelope with absolute noise.

use shared::{match_region, round1, SoilEstimate, DEFAULT_SOIL, DEFAULT_SOIL_SPREAD};

use super::noise::NoiseSource;

/// Relative standard deviation applied to regional baselines
const REGIONAL_SPREAD: f64 = 0.1;

/// Approximate soil values for `location`. Non-deterministic by nature; the
/// outcome depends on `noise`.
pub fn estimate_soil(location: &str, noise: &mut dyn NoiseSource) -> SoilEstimate {
    match match_region(location) {
        Some(region) => {
            let base = region.baseline;
            let mut scale = |value: f64| value * (1.0 + noise.gaussian(REGIONAL_SPREAD));
            SoilEstimate {
                nitrogen: round1(scale(base.nitrogen).max(0.0)),
                phosphorus: round1(scale(base.phosphorus).max(0.0)),
                potassium: round1(scale(base.potassium).max(0.0)),
                ph: round1(scale(base.ph).clamp(4.0, 9.0)),
            }
        }
        None => {
            tracing::debug!(location, "No regional soil match, using defaults");
            SoilEstimate {
                nitrogen: round1(DEFAULT_SOIL.nitrogen + noise.gaussian(DEFAULT_SOIL_SPREAD.nitrogen)),
                phosphorus: round1(
                    DEFAULT_SOIL.phosphorus + noise.gaussian(DEFAULT_SOIL_SPREAD.phosphorus),
                ),
                potassium: round1(
                    DEFAULT_SOIL.potassium + noise.gaussian(DEFAULT_SOIL_SPREAD.potassium),
                ),
                ph: round1(DEFAULT_SOIL.ph + noise.gaussian(DEFAULT_SOIL_SPREAD.ph)),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::noise::FixedNoise;

    #[test]
    fn test_regional_baseline_without_noise() {
        let soil = estimate_soil("Punjab", &mut FixedNoise(0.0));
        assert_eq!(
            soil,
            SoilEstimate {
                nitrogen: 85.0,
                phosphorus: 40.0,
                potassium: 180.0,
                ph: 7.2,
            }
        );
    }

    #[test]
    fn test_ph_clamped_to_agronomic_range() {
        // +5σ pushes rajasthan's 7.5 to 11.25 before clamping
        let soil = estimate_soil("rajasthan", &mut FixedNoise(5.0));
        assert_eq!(soil.ph, 9.0);
    }

    #[test]
    fn test_nutrients_floored_at_zero() {
        let soil = estimate_soil("gujarat", &mut FixedNoise(-20.0));
        assert_eq!(soil.nitrogen, 0.0);
        assert_eq!(soil.phosphorus, 0.0);
        assert_eq!(soil.potassium, 0.0);
        assert_eq!(soil.ph, 4.0);
    }

    #[test]
    fn test_unknown_location_uses_absolute_noise() {
        let soil = estimate_soil("Atlantis", &mut FixedNoise(1.0));
        assert_eq!(soil.nitrogen, 85.0);
        assert_eq!(soil.phosphorus, 43.0);
        assert_eq!(soil.potassium, 180.0);
        assert_eq!(soil.ph, 7.1);
    }
}
