//! PAYE calculation steps.
//!
//! Input flows normalize → reliefs → bracket → estimator, with comparison
//! and display formatting layered on the results.

pub mod bracket;
pub mod common;
pub mod comparison;
pub mod estimator;
pub mod format;
pub mod normalize;
pub mod reliefs;

pub use bracket::{BracketTaxError, compute_tax, marginal_rate};
pub use comparison::compare;
pub use estimator::{EstimatorError, PayeEstimator};
pub use reliefs::compute_reliefs;
