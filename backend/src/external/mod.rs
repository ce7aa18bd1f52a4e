//! External integrations

pub mod model;
pub mod weather;

pub use model::{load_model, CropClassifier, ModelError, Prediction};
pub use weather::{ClimateSource, CurrentConditions, OpenMeteoClient, ReferenceWindow, UpstreamError};
