//! Modules layer - Infrastructure components behind the features
//!
//! Contains the dataset reader, the regression model adapter and the
//! prediction log storage.

pub mod dataset;
pub mod ml;
pub mod storage;
