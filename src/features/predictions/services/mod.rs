mod prediction_service;

pub use prediction_service::{format_prediction, PredictionOutcome, PredictionService};
