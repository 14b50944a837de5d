use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::modules::ml::{FeatureSchema, ModelMetrics};
use crate::shared::constants::MAX_LABEL_LENGTH;

/// Request DTO for a single prediction
///
/// Feature values are given either by name (`features`) or positionally in
/// model column order (`values`), not both.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePredictionDto {
    /// Province name stored with the prediction
    #[validate(length(max = MAX_LABEL_LENGTH, message = "Province name must not exceed 255 characters"))]
    #[serde(default)]
    pub province_name: String,

    /// Feature values keyed by column name
    pub features: Option<HashMap<String, f64>>,

    /// Feature values in model column order
    pub values: Option<Vec<f64>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FeatureValueDto {
    pub name: String,
    pub value: f64,
}

/// Response DTO for a stored prediction
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PredictionResponseDto {
    pub province_name: String,
    /// Predicted unemployment rate
    pub prediction: f64,
    /// Prediction formatted with thousands separators and two decimals
    pub prediction_display: String,
    pub features: Vec<FeatureValueDto>,
    /// Log file the prediction was appended to
    pub log_path: String,
}

/// Trained model description
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ModelInfoDto {
    pub model: String,
    pub schema: FeatureSchema,
    pub metrics: ModelMetrics,
    /// Rows the model was fitted and evaluated on
    pub training_rows: usize,
    /// Metrics are computed on the training rows, not on held-out data
    pub in_sample: bool,
}

/// Contents of the prediction log
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PredictionHistoryDto {
    pub log_path: String,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}
