use std::sync::Arc;

use crate::features::dataset::dtos::{DatasetPreviewDto, StatRowDto, SummaryTableDto};
use crate::modules::dataset::{describe, ColumnSummary, Dataset};
use crate::shared::constants::MAX_PREVIEW_ROWS;
use crate::shared::format::format_grouped;

/// Read-only views over the training dataset
pub struct DatasetService {
    dataset: Arc<Dataset>,
    summary: Vec<ColumnSummary>,
    default_preview_rows: usize,
}

impl DatasetService {
    pub fn new(dataset: Arc<Dataset>, default_preview_rows: usize) -> Self {
        // The dataset never changes after startup, so the statistics are computed once
        let summary = describe(&dataset);
        tracing::debug!("Dataset summary computed for {} numeric columns", summary.len());
        Self {
            dataset,
            summary,
            default_preview_rows,
        }
    }

    /// Leading rows, `rows` defaulting to the configured preview size
    pub fn preview(&self, rows: Option<usize>) -> DatasetPreviewDto {
        let n = rows
            .unwrap_or(self.default_preview_rows)
            .min(MAX_PREVIEW_ROWS);

        DatasetPreviewDto {
            columns: self.dataset.columns().to_vec(),
            rows: self.dataset.head(n).to_vec(),
            total_rows: self.dataset.len(),
        }
    }

    pub fn summary(&self) -> &[ColumnSummary] {
        &self.summary
    }

    /// Statistics as rows (count, mean, std, ...) by numeric column
    pub fn summary_table(&self) -> SummaryTableDto {
        let row = |name: &str, value: fn(&ColumnSummary) -> String| StatRowDto {
            name: name.to_string(),
            values: self.summary.iter().map(value).collect(),
        };

        SummaryTableDto {
            columns: self.summary.iter().map(|s| s.column.clone()).collect(),
            rows: vec![
                row("count", |s| s.count.to_string()),
                row("mean", |s| format_grouped(s.mean, 2)),
                row("std", |s| {
                    s.std
                        .map(|v| format_grouped(v, 2))
                        .unwrap_or_else(|| "NaN".to_string())
                }),
                row("min", |s| format_grouped(s.min, 2)),
                row("25%", |s| format_grouped(s.q25, 2)),
                row("50%", |s| format_grouped(s.median, 2)),
                row("75%", |s| format_grouped(s.q75, 2)),
                row("max", |s| format_grouped(s.max, 2)),
            ],
        }
    }
}
