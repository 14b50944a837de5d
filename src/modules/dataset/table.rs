//! In-memory dataset table
//!
//! The dataset is read once at startup. Cells are kept as the trimmed text
//! from the source file so the preview shows exactly what was loaded; numeric
//! access parses on demand.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("Dataset file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to read dataset {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("Dataset {} has no data rows", .0.display())]
    Empty(PathBuf),

    #[error("Dataset has duplicate column '{0}'")]
    DuplicateColumn(String),

    #[error("Row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("Column '{0}' not found in dataset")]
    MissingColumn(String),

    #[error("Column '{column}' row {row} is not numeric: '{value}'")]
    NonNumeric {
        column: String,
        /// 1-based data row number (header excluded)
        row: usize,
        value: String,
    },
}

#[derive(Debug, Clone)]
pub struct Dataset {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Dataset {
    /// Read a delimited file with a header row.
    pub fn load(path: &Path, delimiter: u8) -> Result<Self, DatasetError> {
        if !path.exists() {
            return Err(DatasetError::NotFound(path.to_path_buf()));
        }

        let read_err = |source| DatasetError::Read {
            path: path.to_path_buf(),
            source,
        };

        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .trim(csv::Trim::All)
            .from_path(path)
            .map_err(read_err)?;

        let columns: Vec<String> = reader
            .headers()
            .map_err(read_err)?
            .iter()
            .map(|h| h.trim_start_matches('\u{feff}').to_string())
            .collect();

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record.map_err(read_err)?;
            rows.push(record.iter().map(str::to_string).collect());
        }

        let dataset = Self::from_parts(columns, rows)?;
        if dataset.is_empty() {
            return Err(DatasetError::Empty(path.to_path_buf()));
        }
        info!(
            "Dataset loaded from {}: {} rows x {} columns",
            path.display(),
            dataset.len(),
            dataset.columns.len()
        );
        Ok(dataset)
    }

    /// Build a table from already-split cells. Every row must have one cell per column.
    pub fn from_parts(columns: Vec<String>, rows: Vec<Vec<String>>) -> Result<Self, DatasetError> {
        let mut seen = HashSet::new();
        for column in &columns {
            if !seen.insert(column.as_str()) {
                return Err(DatasetError::DuplicateColumn(column.clone()));
            }
        }
        if let Some((i, row)) = rows
            .iter()
            .enumerate()
            .find(|(_, r)| r.len() != columns.len())
        {
            return Err(DatasetError::RaggedRow {
                row: i + 1,
                expected: columns.len(),
                found: row.len(),
            });
        }
        debug!("Dataset table built with {} columns", columns.len());
        Ok(Self { columns, rows })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// First `n` rows (fewer if the dataset is shorter)
    pub fn head(&self, n: usize) -> &[Vec<String>] {
        &self.rows[..n.min(self.rows.len())]
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// All values of a column as numbers. Fails on the first blank or unparsable cell.
    pub fn numeric_column(&self, name: &str) -> Result<Vec<f64>, DatasetError> {
        let idx = self
            .column_index(name)
            .ok_or_else(|| DatasetError::MissingColumn(name.to_string()))?;

        self.rows
            .iter()
            .enumerate()
            .map(|(i, row)| {
                parse_number(&row[idx]).ok_or_else(|| DatasetError::NonNumeric {
                    column: name.to_string(),
                    row: i + 1,
                    value: row[idx].clone(),
                })
            })
            .collect()
    }

    /// Non-blank values of a column if every non-blank cell is numeric.
    ///
    /// Returns `None` for text columns and for columns with no values at all.
    pub fn numeric_values(&self, idx: usize) -> Option<Vec<f64>> {
        let mut values = Vec::with_capacity(self.rows.len());
        for row in &self.rows {
            let cell = row[idx].as_str();
            if cell.is_empty() {
                continue;
            }
            values.push(parse_number(cell)?);
        }
        (!values.is_empty()).then_some(values)
    }
}

pub fn parse_number(cell: &str) -> Option<f64> {
    cell.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}
