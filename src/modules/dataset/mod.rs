//! Dataset module
//!
//! Loads the delimited source table and computes summary statistics for display.

mod summary;
mod table;

pub use summary::{describe, ColumnSummary};
pub use table::{parse_number, Dataset, DatasetError};
