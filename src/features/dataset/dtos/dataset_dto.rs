use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Query parameters for the dataset preview
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct PreviewQueryParams {
    /// Number of leading rows to return (default from configuration, max: 100)
    #[param(minimum = 0, maximum = 100)]
    pub rows: Option<usize>,
}

/// First rows of the training dataset
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DatasetPreviewDto {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
    /// Total number of rows in the dataset
    pub total_rows: usize,
}

/// One statistic across all numeric columns, for tabular display
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StatRowDto {
    pub name: String,
    pub values: Vec<String>,
}

/// Describe-style statistics laid out as a table
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SummaryTableDto {
    pub columns: Vec<String>,
    pub rows: Vec<StatRowDto>,
}
