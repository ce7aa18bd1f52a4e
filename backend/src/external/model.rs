//! Crop classifier artifacts
//!
//! The classifier is trained elsewhere and shipped as a JSON artifact. It is
//! loaded once at startup and shared read-only between requests.

use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;
use shared::FEATURE_COUNT;
use thiserror::Error;

/// Failure while loading or querying the classifier
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    #[error("Feature shape mismatch: expected {expected}, got {actual}")]
    Shape { expected: usize, actual: usize },

    #[error("Unknown class: {0}")]
    UnknownClass(String),

    #[error("Model produced non-finite output")]
    NonFinite,

    #[error("Invalid model artifact: {0}")]
    Artifact(String),
}

/// Output of a single prediction
#[derive(Debug, Clone, PartialEq)]
pub enum Prediction {
    /// One probability per entry of [`CropClassifier::classes`]
    Probabilities(Vec<f64>),
    /// Best label only
    Label(String),
}

/// A trained crop classifier over the seven agronomic features
pub trait CropClassifier: Send + Sync {
    /// Class labels in the model's own order
    fn classes(&self) -> &[String];

    fn predict(&self, features: &[f64]) -> Result<Prediction, ModelError>;
}

/// Serialized model, tagged by `kind`
#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelArtifact {
    GaussianNb(GaussianNb),
    NearestCentroid(NearestCentroid),
}

impl ModelArtifact {
    /// Check shapes and wrap the model for shared use
    pub fn into_classifier(self) -> Result<Arc<dyn CropClassifier>, ModelError> {
        match self {
            ModelArtifact::GaussianNb(model) => {
                model.check()?;
                Ok(Arc::new(model))
            }
            ModelArtifact::NearestCentroid(model) => {
                model.check()?;
                Ok(Arc::new(model))
            }
        }
    }
}

/// Gaussian naive Bayes: per-class feature means and variances
#[derive(Debug, Clone, Deserialize)]
pub struct GaussianNb {
    pub classes: Vec<String>,
    pub class_prior: Vec<f64>,
    pub theta: Vec<Vec<f64>>,
    pub var: Vec<Vec<f64>>,
}

impl GaussianNb {
    fn check(&self) -> Result<(), ModelError> {
        let n = self.classes.len();
        if n == 0 {
            return Err(ModelError::Artifact("no classes".to_string()));
        }
        if self.class_prior.len() != n || self.theta.len() != n || self.var.len() != n {
            return Err(ModelError::Artifact(
                "class_prior, theta and var must have one row per class".to_string(),
            ));
        }
        if self.class_prior.iter().any(|p| !(p.is_finite() && *p > 0.0)) {
            return Err(ModelError::Artifact("class priors must be positive".to_string()));
        }
        for (mean, var) in self.theta.iter().zip(&self.var) {
            if mean.len() != FEATURE_COUNT || var.len() != FEATURE_COUNT {
                return Err(ModelError::Shape {
                    expected: FEATURE_COUNT,
                    actual: mean.len().max(var.len()),
                });
            }
            if var.iter().any(|v| !(v.is_finite() && *v > 0.0)) {
                return Err(ModelError::Artifact("variances must be positive".to_string()));
            }
        }
        Ok(())
    }

    fn joint_log_likelihood(&self, x: &[f64]) -> Vec<f64> {
        self.class_prior
            .iter()
            .zip(self.theta.iter().zip(&self.var))
            .map(|(prior, (mean, var))| {
                let log_density: f64 = x
                    .iter()
                    .zip(mean.iter().zip(var))
                    .map(|(xi, (mu, v))| {
                        -0.5 * (2.0 * std::f64::consts::PI * v).ln() - (xi - mu).powi(2) / (2.0 * v)
                    })
                    .sum();
                prior.ln() + log_density
            })
            .collect()
    }
}

impl CropClassifier for GaussianNb {
    fn classes(&self) -> &[String] {
        &self.classes
    }

    fn predict(&self, features: &[f64]) -> Result<Prediction, ModelError> {
        if features.len() != FEATURE_COUNT {
            return Err(ModelError::Shape {
                expected: FEATURE_COUNT,
                actual: features.len(),
            });
        }

        let jll = self.joint_log_likelihood(features);
        let max = jll.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        if !max.is_finite() {
            return Err(ModelError::NonFinite);
        }
        let exp: Vec<f64> = jll.iter().map(|l| (l - max).exp()).collect();
        let total: f64 = exp.iter().sum();
        let probabilities: Vec<f64> = exp.iter().map(|e| e / total).collect();
        if probabilities.iter().any(|p| !p.is_finite()) {
            return Err(ModelError::NonFinite);
        }
        Ok(Prediction::Probabilities(probabilities))
    }
}

/// Nearest centroid: predicts the class whose mean is closest, no probabilities
#[derive(Debug, Clone, Deserialize)]
pub struct NearestCentroid {
    pub classes: Vec<String>,
    pub centroids: Vec<Vec<f64>>,
}

impl NearestCentroid {
    fn check(&self) -> Result<(), ModelError> {
        if self.classes.is_empty() || self.centroids.len() != self.classes.len() {
            return Err(ModelError::Artifact(
                "centroids must have one row per class".to_string(),
            ));
        }
        if let Some(row) = self.centroids.iter().find(|c| c.len() != FEATURE_COUNT) {
            return Err(ModelError::Shape {
                expected: FEATURE_COUNT,
                actual: row.len(),
            });
        }
        Ok(())
    }
}

impl CropClassifier for NearestCentroid {
    fn classes(&self) -> &[String] {
        &self.classes
    }

    fn predict(&self, features: &[f64]) -> Result<Prediction, ModelError> {
        if features.len() != FEATURE_COUNT {
            return Err(ModelError::Shape {
                expected: FEATURE_COUNT,
                actual: features.len(),
            });
        }

        let mut best: Option<(usize, f64)> = None;
        for (index, centroid) in self.centroids.iter().enumerate() {
            let distance: f64 = centroid
                .iter()
                .zip(features)
                .map(|(c, x)| (c - x).powi(2))
                .sum();
            if !distance.is_finite() {
                return Err(ModelError::NonFinite);
            }
            if best.map_or(true, |(_, d)| distance < d) {
                best = Some((index, distance));
            }
        }

        let (index, _) = best.ok_or_else(|| ModelError::Artifact("no centroids".to_string()))?;
        self.classes
            .get(index)
            .cloned()
            .map(Prediction::Label)
            .ok_or_else(|| ModelError::UnknownClass(index.to_string()))
    }
}

/// Load the classifier artifact at `path`.
///
/// Returns `Ok(None)` when no file exists there.
pub fn load_model(path: &Path) -> Result<Option<Arc<dyn CropClassifier>>, ModelError> {
    if !path.exists() {
        return Ok(None);
    }
    let raw = std::fs::read_to_string(path)
        .map_err(|e| ModelError::Artifact(format!("{}: {}", path.display(), e)))?;
    let artifact: ModelArtifact =
        serde_json::from_str(&raw).map_err(|e| ModelError::Artifact(e.to_string()))?;
    artifact.into_classifier().map(Some)
}
