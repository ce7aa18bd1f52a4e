//! Crop recommendation engine
//!
//! Two strategies share one output contract:
//!
//! - [`ModelBacked`] ranks the classes of a loaded [`CropClassifier`] and
//!   falls back to the rules whenever inference fails.
//! - [`RuleBased`] ranks a fixed set of candidates by additive point score.
//!
//! [`RecommendationEngine`] picks the strategy once, at construction.

use std::sync::Arc;

use shared::{
    crop_profile_or_generic, rank_candidates, title_case, AgronomicFeatures, Recommendation, Trend,
    HISTORY_LEN,
};

use super::noise::NoiseSource;
use crate::external::model::{CropClassifier, ModelError, Prediction};

/// Maximum number of recommendations returned
pub const MAX_RECOMMENDATIONS: usize = 3;

/// Confidence band of the rule-based path
pub const RULE_CONFIDENCE_MIN: f64 = 60.0;
pub const RULE_CONFIDENCE_MAX: f64 = 95.0;

/// Spread of the noise added to rule scores
const RULE_SCORE_SPREAD: f64 = 5.0;

/// Fixed output when the classifier only reports a label
const LABEL_ONLY_CONFIDENCE: u8 = 85;
const LABEL_ONLY_HISTORY: [u8; HISTORY_LEN] = [80, 82, 84, 85];

/// Shape of a synthetic confidence history: per-point offset from the final
/// confidence, noise spread, and a floor
struct HistoryShape {
    offsets: [f64; HISTORY_LEN - 1],
    spreads: [f64; HISTORY_LEN - 1],
    floor: f64,
}

const MODEL_HISTORY: HistoryShape = HistoryShape {
    offsets: [-10.0, -5.0, -2.0],
    spreads: [3.0, 2.0, 1.0],
    floor: 0.0,
};

const RULE_HISTORY: HistoryShape = HistoryShape {
    offsets: [-8.0, -4.0, -2.0],
    spreads: [2.0, 2.0, 1.0],
    floor: 50.0,
};

/// Build a non-decreasing series ending exactly at `confidence`
fn synthesize_history(
    confidence: u8,
    shape: &HistoryShape,
    noise: &mut dyn NoiseSource,
) -> [u8; HISTORY_LEN] {
    let mut history = [confidence; HISTORY_LEN];
    for i in (0..HISTORY_LEN - 1).rev() {
        let point = f64::from(confidence) + shape.offsets[i] + noise.gaussian(shape.spreads[i]);
        let point = point.clamp(shape.floor, 100.0).round() as u8;
        history[i] = point.min(history[i + 1]);
    }
    history
}

fn build_recommendation(
    crop: &str,
    confidence: u8,
    trend: Trend,
    historical_data: [u8; HISTORY_LEN],
) -> Recommendation {
    let profile = crop_profile_or_generic(crop);
    Recommendation {
        name: title_case(crop),
        confidence,
        description: profile.description.to_string(),
        optimal_conditions: profile.optimal_conditions.to_string(),
        trend,
        historical_data,
    }
}

/// A strategy producing ranked crop recommendations
pub trait Recommender: Send + Sync {
    /// Between one and [`MAX_RECOMMENDATIONS`] recommendations, best first
    fn recommend(
        &self,
        features: &AgronomicFeatures,
        noise: &mut dyn NoiseSource,
    ) -> Vec<Recommendation>;

    /// Whether a trained model backs this strategy
    fn uses_model(&self) -> bool;
}

/// Threshold-scoring strategy used when no model is available
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleBased;

impl Recommender for RuleBased {
    fn recommend(
        &self,
        features: &AgronomicFeatures,
        noise: &mut dyn NoiseSource,
    ) -> Vec<Recommendation> {
        rank_candidates(features)
            .into_iter()
            .take(MAX_RECOMMENDATIONS)
            .map(|candidate| {
                let confidence = (f64::from(candidate.score) + noise.gaussian(RULE_SCORE_SPREAD))
                    .clamp(RULE_CONFIDENCE_MIN, RULE_CONFIDENCE_MAX)
                    .round() as u8;
                let history = synthesize_history(confidence, &RULE_HISTORY, noise);
                build_recommendation(candidate.crop, confidence, candidate.trend, history)
            })
            .collect()
    }

    fn uses_model(&self) -> bool {
        false
    }
}

/// Classifier-backed strategy with rule-based fallback
pub struct ModelBacked {
    model: Arc<dyn CropClassifier>,
    fallback: RuleBased,
}

impl ModelBacked {
    pub fn new(model: Arc<dyn CropClassifier>) -> Self {
        Self {
            model,
            fallback: RuleBased,
        }
    }

    fn infer(
        &self,
        features: &AgronomicFeatures,
        noise: &mut dyn NoiseSource,
    ) -> Result<Vec<Recommendation>, ModelError> {
        match self.model.predict(&features.to_vector())? {
            Prediction::Probabilities(probabilities) => {
                let classes = self.model.classes();
                if probabilities.len() != classes.len() {
                    return Err(ModelError::Shape {
                        expected: classes.len(),
                        actual: probabilities.len(),
                    });
                }
                if probabilities.iter().any(|p| !p.is_finite()) {
                    return Err(ModelError::NonFinite);
                }

                // Stable sort keeps the model's class order among equal probabilities
                let mut ranked: Vec<usize> = (0..probabilities.len()).collect();
                ranked.sort_by(|&a, &b| probabilities[b].total_cmp(&probabilities[a]));

                Ok(ranked
                    .into_iter()
                    .take(MAX_RECOMMENDATIONS)
                    .enumerate()
                    .map(|(rank, index)| {
                        let confidence = (probabilities[index] * 100.0).round().clamp(0.0, 100.0) as u8;
                        let trend = model_trend(rank, confidence);
                        let history = synthesize_history(confidence, &MODEL_HISTORY, noise);
                        build_recommendation(&classes[index], confidence, trend, history)
                    })
                    .collect())
            }
            Prediction::Label(label) => {
                if label.trim().is_empty() {
                    return Err(ModelError::UnknownClass(label));
                }
                Ok(vec![build_recommendation(
                    &label,
                    LABEL_ONLY_CONFIDENCE,
                    Trend::Stable,
                    LABEL_ONLY_HISTORY,
                )])
            }
        }
    }
}

/// Trend hint for the recommendation at `rank` (0 = best)
fn model_trend(rank: usize, confidence: u8) -> Trend {
    match rank {
        0 if confidence > 80 => Trend::Up,
        0 => Trend::Stable,
        1 if confidence > 70 => Trend::Stable,
        _ => Trend::Up,
    }
}

impl Recommender for ModelBacked {
    fn recommend(
        &self,
        features: &AgronomicFeatures,
        noise: &mut dyn NoiseSource,
    ) -> Vec<Recommendation> {
        match self.infer(features, noise) {
            Ok(recommendations) if !recommendations.is_empty() => recommendations,
            Ok(_) => {
                tracing::warn!("Model returned no classes, using rule-based recommendations");
                self.fallback.recommend(features, noise)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Model prediction failed, using rule-based recommendations");
                self.fallback.recommend(features, noise)
            }
        }
    }

    fn uses_model(&self) -> bool {
        true
    }
}

/// Entry point for recommendations; owns the strategy chosen at startup
pub struct RecommendationEngine {
    recommender: Box<dyn Recommender>,
}

impl RecommendationEngine {
    /// Model-backed when a classifier is supplied, rule-based otherwise
    pub fn new(model: Option<Arc<dyn CropClassifier>>) -> Self {
        let recommender: Box<dyn Recommender> = match model {
            Some(model) => Box::new(ModelBacked::new(model)),
            None => Box::new(RuleBased),
        };
        Self { recommender }
    }

    pub fn recommend(
        &self,
        features: &AgronomicFeatures,
        noise: &mut dyn NoiseSource,
    ) -> Vec<Recommendation> {
        self.recommender.recommend(features, noise)
    }

    pub fn model_loaded(&self) -> bool {
        self.recommender.uses_model()
    }
}
