//! Decision tree regression backed by smartcore
//!
//! Fitting, prediction and the error metrics are delegated to the library.
//! This module adapts it to row-major `f64` data and guards the input shape so
//! a malformed request surfaces as an error instead of reaching the tree.

use serde::{Deserialize, Serialize};
use smartcore::linalg::basic::matrix::DenseMatrix;
use smartcore::metrics::{mean_squared_error, r2};
use smartcore::tree::decision_tree_regressor::{
    DecisionTreeRegressor, DecisionTreeRegressorParameters,
};
use thiserror::Error;
use tracing::{debug, info};
use utoipa::ToSchema;

use crate::core::config::ModelConfig;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("Failed to fit model: {0}")]
    Fit(String),

    #[error("Expected {expected} feature values, got {found}")]
    ShapeMismatch { expected: usize, found: usize },

    #[error("Prediction failed: {0}")]
    Predict(String),
}

/// A fitted regressor over a fixed number of features.
pub trait Predictor: Send + Sync {
    fn n_features(&self) -> usize;

    /// Predict one value per row. Every row must have `n_features()` values.
    fn predict(&self, rows: &[Vec<f64>]) -> Result<Vec<f64>, ModelError>;

    fn predict_one(&self, features: &[f64]) -> Result<f64, ModelError> {
        let predictions = self.predict(&[features.to_vec()])?;
        predictions
            .first()
            .copied()
            .ok_or_else(|| ModelError::Predict("model returned no prediction".to_string()))
    }
}

/// In-sample evaluation of a fitted model
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ModelMetrics {
    /// Mean squared error
    pub mse: f64,
    /// Coefficient of determination
    pub r2: f64,
}

type Tree = DecisionTreeRegressor<f64, f64, DenseMatrix<f64>, Vec<f64>>;

pub struct DecisionTreePredictor {
    tree: Tree,
    n_features: usize,
}

impl DecisionTreePredictor {
    /// Fit a regression tree on row-major `x` and target `y`.
    pub fn fit(x: &[Vec<f64>], y: &[f64], config: &ModelConfig) -> Result<Self, ModelError> {
        let n_features = x.first().map(Vec::len).unwrap_or(0);
        if x.is_empty() || n_features == 0 {
            return Err(ModelError::Fit("no training data".to_string()));
        }
        if x.len() != y.len() {
            return Err(ModelError::Fit(format!(
                "{} feature rows but {} target values",
                x.len(),
                y.len()
            )));
        }
        if let Some(row) = x.iter().find(|row| row.len() != n_features) {
            return Err(ModelError::ShapeMismatch {
                expected: n_features,
                found: row.len(),
            });
        }

        let mut params = DecisionTreeRegressorParameters {
            seed: Some(config.seed),
            ..Default::default()
        }
        .with_min_samples_leaf(config.min_samples_leaf)
        .with_min_samples_split(config.min_samples_split);
        if let Some(depth) = config.max_depth {
            params = params.with_max_depth(depth);
        }

        let matrix = to_matrix(x).map_err(ModelError::Fit)?;
        let tree = Tree::fit(&matrix, &y.to_vec(), params)
            .map_err(|e| ModelError::Fit(e.to_string()))?;

        info!(
            "Decision tree fitted on {} rows x {} features (seed={})",
            x.len(),
            n_features,
            config.seed
        );

        Ok(Self { tree, n_features })
    }
}

impl Predictor for DecisionTreePredictor {
    fn n_features(&self) -> usize {
        self.n_features
    }

    fn predict(&self, rows: &[Vec<f64>]) -> Result<Vec<f64>, ModelError> {
        if let Some(row) = rows.iter().find(|row| row.len() != self.n_features) {
            return Err(ModelError::ShapeMismatch {
                expected: self.n_features,
                found: row.len(),
            });
        }
        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let matrix = to_matrix(rows).map_err(ModelError::Predict)?;
        let predictions = self
            .tree
            .predict(&matrix)
            .map_err(|e| ModelError::Predict(e.to_string()))?;
        debug!("Predicted {} rows", predictions.len());
        Ok(predictions)
    }
}

/// Score a predictor on the data it was fitted on.
pub fn evaluate(
    predictor: &dyn Predictor,
    x: &[Vec<f64>],
    y: &[f64],
) -> Result<ModelMetrics, ModelError> {
    let y_true = y.to_vec();
    let y_pred = predictor.predict(x)?;

    let metrics = ModelMetrics {
        mse: mean_squared_error(&y_true, &y_pred),
        r2: r2(&y_true, &y_pred),
    };
    info!(
        "In-sample evaluation: MSE={:.4}, R2={:.4}",
        metrics.mse, metrics.r2
    );
    Ok(metrics)
}

fn to_matrix(rows: &[Vec<f64>]) -> Result<DenseMatrix<f64>, String> {
    DenseMatrix::from_2d_vec(&rows.to_vec()).map_err(|e| e.to_string())
}
