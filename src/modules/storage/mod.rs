//! Storage module for prediction persistence
//!
//! Provides the file-backed, append-only prediction log.

mod prediction_log;

pub use prediction_log::{
    LogTable, PredictionLog, PredictionLogError, PredictionRecord, LABEL_COLUMN,
    PREDICTION_COLUMN,
};
