//! Domain models for the Agro Scout service

mod crop;
mod features;
mod recommendation;
mod soil;
mod weather;

pub use crop::*;
pub use features::*;
pub use recommendation::*;
pub use soil::*;
pub use weather::*;
