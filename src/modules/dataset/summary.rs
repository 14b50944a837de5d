//! Descriptive statistics over the numeric columns of a dataset
//!
//! Mirrors the usual "describe" table: count, mean, sample standard deviation,
//! min, quartiles (linear interpolation) and max.

use serde::Serialize;
use utoipa::ToSchema;

use super::table::Dataset;

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ColumnSummary {
    pub column: String,
    /// Number of non-blank values
    pub count: usize,
    pub mean: f64,
    /// Sample standard deviation; absent when only one value exists
    pub std: Option<f64>,
    pub min: f64,
    pub q25: f64,
    pub median: f64,
    pub q75: f64,
    pub max: f64,
}

/// Summaries for every numeric column, in dataset column order.
pub fn describe(dataset: &Dataset) -> Vec<ColumnSummary> {
    dataset
        .columns()
        .iter()
        .enumerate()
        .filter_map(|(idx, column)| {
            let values = dataset.numeric_values(idx)?;
            Some(summarize(column, values))
        })
        .collect()
}

fn summarize(column: &str, mut values: Vec<f64>) -> ColumnSummary {
    values.sort_by(f64::total_cmp);

    let count = values.len();
    let n = count as f64;
    let mean = values.iter().sum::<f64>() / n;
    let std = (count > 1).then(|| {
        let ss: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
        (ss / (n - 1.0)).sqrt()
    });

    ColumnSummary {
        column: column.to_string(),
        count,
        mean,
        std,
        min: values[0],
        q25: quantile(&values, 0.25),
        median: quantile(&values, 0.5),
        q75: quantile(&values, 0.75),
        max: values[count - 1],
    }
}

/// Quantile of sorted, non-empty values with linear interpolation between ranks
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    sorted[lo] + (sorted[hi] - sorted[lo]) * (pos - lo as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset(columns: &[&str], rows: &[&[&str]]) -> Dataset {
        Dataset::from_parts(
            columns.iter().map(|c| c.to_string()).collect(),
            rows.iter()
                .map(|r| r.iter().map(|c| c.to_string()).collect())
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn test_describe_numeric_columns_only() {
        let ds = dataset(
            &["Provinsi", "AK", "Pengangguran"],
            &[
                &["Aceh", "1", "6.0"],
                &["Bali", "2", "4.0"],
                &["Papua", "3", "2.0"],
                &["Riau", "4", "4.0"],
            ],
        );

        let summary = describe(&ds);
        assert_eq!(summary.len(), 2);
        assert_eq!(summary[0].column, "AK");
        assert_eq!(summary[1].column, "Pengangguran");

        let ak = &summary[0];
        assert_eq!(ak.count, 4);
        assert!((ak.mean - 2.5).abs() < 1e-12);
        // sample std of 1..=4
        assert!((ak.std.unwrap() - 1.2909944487358056).abs() < 1e-12);
        assert_eq!(ak.min, 1.0);
        assert!((ak.q25 - 1.75).abs() < 1e-12);
        assert!((ak.median - 2.5).abs() < 1e-12);
        assert!((ak.q75 - 3.25).abs() < 1e-12);
        assert_eq!(ak.max, 4.0);
    }

    #[test]
    fn test_single_value_has_no_std() {
        let ds = dataset(&["AK"], &[&["7.5"]]);
        let summary = describe(&ds);
        assert_eq!(summary[0].count, 1);
        assert_eq!(summary[0].std, None);
        assert_eq!(summary[0].median, 7.5);
    }

    #[test]
    fn test_blank_cells_are_not_counted() {
        let ds = dataset(&["AK"], &[&["1"], &[""], &["3"]]);
        let summary = describe(&ds);
        assert_eq!(summary[0].count, 2);
        assert_eq!(summary[0].mean, 2.0);
    }
}
