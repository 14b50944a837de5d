use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::modules::dataset::{Dataset, DatasetError};

/// Column roles derived from the dataset header
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FeatureSchema {
    /// Model inputs, in dataset column order
    pub features: Vec<String>,
    /// Column the model predicts
    pub target: String,
    /// Metadata columns present in the dataset but not used
    pub ignored: Vec<String>,
}

impl FeatureSchema {
    /// Partition the dataset columns. Ignore-set entries absent from the
    /// dataset are skipped; a missing target is an error.
    pub fn select(
        dataset: &Dataset,
        ignore_columns: &[String],
        target: &str,
    ) -> Result<Self, DatasetError> {
        if dataset.column_index(target).is_none() {
            return Err(DatasetError::MissingColumn(target.to_string()));
        }

        let (ignored, features): (Vec<String>, Vec<String>) = dataset
            .columns()
            .iter()
            .filter(|c| c.as_str() != target)
            .cloned()
            .partition(|c| ignore_columns.contains(c));

        Ok(Self {
            features,
            target: target.to_string(),
            ignored,
        })
    }

    pub fn n_features(&self) -> usize {
        self.features.len()
    }

    /// Row-major feature matrix and target vector. Every cell must be numeric.
    pub fn training_data(&self, dataset: &Dataset) -> Result<(Vec<Vec<f64>>, Vec<f64>), DatasetError> {
        let columns = self
            .features
            .iter()
            .map(|f| dataset.numeric_column(f))
            .collect::<Result<Vec<_>, _>>()?;
        let y = dataset.numeric_column(&self.target)?;

        let x = (0..dataset.len())
            .map(|row| columns.iter().map(|col| col[row]).collect())
            .collect();

        Ok((x, y))
    }
}
