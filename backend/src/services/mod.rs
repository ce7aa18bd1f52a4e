//! Business logic services for the Agro Scout service

pub mod noise;
pub mod recommendation;
pub mod soil;
pub mod weather;

pub use noise::{FixedNoise, NoiseSource, RngNoise};
pub use recommendation::{ModelBacked, RecommendationEngine, Recommender, RuleBased};
pub use soil::estimate_soil;
pub use weather::WeatherProvider;
