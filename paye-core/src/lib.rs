pub mod calculations;
pub mod models;

pub use calculations::{EstimatorError, PayeEstimator};
pub use models::*;
