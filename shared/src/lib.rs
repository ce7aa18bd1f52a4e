//! Shared types and logic for the Agro Scout crop recommendation service
//!
//! This crate contains types shared between the backend, the browser front end
//! (via WASM), and other components of the system.

pub mod models;
pub mod scoring;
pub mod types;
pub mod validation;

pub use models::*;
pub use scoring::*;
pub use types::*;
pub use validation::*;
