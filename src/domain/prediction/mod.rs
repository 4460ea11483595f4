// Wait-time prediction domain module
// Contains the prediction aggregate and its partial-update value object

#![allow(clippy::module_inception)]

pub mod prediction;
pub mod value_objects;

// Re-export main types for convenience
pub use prediction::WaitTimePrediction;
pub use value_objects::PredictionUpdate;
