use std::sync::Arc;

use thiserror::Error;
use tracing::info;

use super::selector::FeatureSchema;
use super::trainer::{evaluate, DecisionTreePredictor, ModelError, ModelMetrics, Predictor};
use crate::core::config::{DatasetConfig, ModelConfig};
use crate::modules::dataset::{Dataset, DatasetError};

#[derive(Debug, Error)]
pub enum TrainingError {
    #[error(transparent)]
    Dataset(#[from] DatasetError),

    #[error(transparent)]
    Model(#[from] ModelError),
}

/// Everything the prediction workflow needs from startup, fixed for the
/// lifetime of the process.
#[derive(Clone)]
pub struct ModelContext {
    pub schema: FeatureSchema,
    pub predictor: Arc<dyn Predictor>,
    pub metrics: ModelMetrics,
    pub n_samples: usize,
}

impl ModelContext {
    /// Select columns, fit the tree and score it on the training rows.
    pub fn train(
        dataset: &Dataset,
        dataset_config: &DatasetConfig,
        model_config: &ModelConfig,
    ) -> Result<Self, TrainingError> {
        let schema = FeatureSchema::select(
            dataset,
            &dataset_config.ignore_columns,
            &dataset_config.target_column,
        )?;
        info!(
            "Features selected: target={}, {} features=[{}], ignored=[{}]",
            schema.target,
            schema.n_features(),
            schema.features.join(", "),
            schema.ignored.join(", ")
        );

        let (x, y) = schema.training_data(dataset)?;
        let predictor = DecisionTreePredictor::fit(&x, &y, model_config)?;
        let metrics = evaluate(&predictor, &x, &y)?;

        Ok(Self {
            schema,
            predictor: Arc::new(predictor),
            metrics,
            n_samples: x.len(),
        })
    }
}
