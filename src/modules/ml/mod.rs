//! Regression model layer
//!
//! Feature selection over the dataset header, the smartcore decision tree
//! behind the [`Predictor`] trait, and the immutable [`ModelContext`] built at
//! startup.

mod context;
mod selector;
mod trainer;

pub use context::{ModelContext, TrainingError};
pub use selector::FeatureSchema;
pub use trainer::{evaluate, DecisionTreePredictor, ModelError, ModelMetrics, Predictor};
