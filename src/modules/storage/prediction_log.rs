//! Append-only CSV log of submitted predictions
//!
//! Each append reads the existing table, adds one row and rewrites the file.
//! The rewrite goes through a temporary file in the same folder followed by a
//! rename, so readers see either the old or the new table. Appends within the
//! process are serialised by a mutex; other processes writing the same file
//! are not coordinated.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use thiserror::Error;
use tracing::{debug, info};

use crate::core::config::PredictionLogConfig;

/// Column holding the predicted value
pub const PREDICTION_COLUMN: &str = "Prediksi Pengangguran";

/// Column holding the user-supplied province name
pub const LABEL_COLUMN: &str = "Nama Provinsi";

#[derive(Debug, Error)]
pub enum PredictionLogError {
    #[error("Failed to create folder {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("Failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// One submitted prediction. Field order is features, prediction, label.
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionRecord {
    features: Vec<(String, f64)>,
    prediction: f64,
    label: String,
}

impl PredictionRecord {
    /// Pair feature names with values positionally.
    pub fn new(feature_names: &[String], values: &[f64], prediction: f64, label: &str) -> Self {
        let features = feature_names
            .iter()
            .cloned()
            .zip(values.iter().copied())
            .collect();
        Self {
            features,
            prediction,
            label: label.to_string(),
        }
    }

    pub fn prediction(&self) -> f64 {
        self.prediction
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Column name and cell text, in record field order
    pub fn fields(&self) -> Vec<(String, String)> {
        self.features
            .iter()
            .map(|(name, value)| (name.clone(), format_cell(*value)))
            .chain([
                (PREDICTION_COLUMN.to_string(), format_cell(self.prediction)),
                (LABEL_COLUMN.to_string(), self.label.clone()),
            ])
            .collect()
    }
}

/// Whole contents of the log file
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LogTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl LogTable {
    #[cfg(test)]
    pub fn column(&self, name: &str) -> Option<Vec<&str>> {
        let idx = self.columns.iter().position(|c| c == name)?;
        Some(self.rows.iter().map(|r| r[idx].as_str()).collect())
    }

    /// Add a record as the last row. Record fields missing from the header
    /// become new trailing columns; header columns the record lacks stay empty.
    fn push(&mut self, record: &PredictionRecord) {
        let fields = record.fields();

        for (name, _) in &fields {
            if !self.columns.contains(name) {
                self.columns.push(name.clone());
                for row in &mut self.rows {
                    row.push(String::new());
                }
            }
        }

        let row = self
            .columns
            .iter()
            .map(|column| {
                fields
                    .iter()
                    .find(|(name, _)| name == column)
                    .map(|(_, value)| value.clone())
                    .unwrap_or_default()
            })
            .collect();
        self.rows.push(row);
    }
}

pub struct PredictionLog {
    folder: PathBuf,
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl PredictionLog {
    pub fn new(config: &PredictionLogConfig) -> Self {
        Self {
            folder: config.folder.clone(),
            path: config.file_path(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Persist one record, creating the folder and file on first use.
    /// Returns the log file path.
    pub fn append(&self, record: &PredictionRecord) -> Result<PathBuf, PredictionLogError> {
        let _guard = self
            .write_lock
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        if !self.folder.as_os_str().is_empty() && !self.folder.is_dir() {
            std::fs::create_dir_all(&self.folder).map_err(|source| {
                PredictionLogError::CreateDir {
                    path: self.folder.clone(),
                    source,
                }
            })?;
            info!("Created prediction log folder {}", self.folder.display());
        }

        let mut table = if self.path.exists() {
            self.read_all()?
        } else {
            debug!("Prediction log {} does not exist yet", self.path.display());
            LogTable::default()
        };
        table.push(record);

        self.write_atomic(&table)?;
        debug!(
            "Prediction log {} now has {} rows",
            self.path.display(),
            table.rows.len()
        );
        Ok(self.path.clone())
    }

    /// Read the log. A missing file is an empty table.
    pub fn read_all(&self) -> Result<LogTable, PredictionLogError> {
        if !self.path.exists() {
            return Ok(LogTable::default());
        }

        let read_err = |source| PredictionLogError::Read {
            path: self.path.clone(),
            source,
        };

        let mut reader = csv::Reader::from_path(&self.path).map_err(read_err)?;
        let columns = reader
            .headers()
            .map_err(read_err)?
            .iter()
            .map(str::to_string)
            .collect();

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record.map_err(read_err)?;
            rows.push(record.iter().map(str::to_string).collect());
        }

        Ok(LogTable { columns, rows })
    }

    fn write_atomic(&self, table: &LogTable) -> Result<(), PredictionLogError> {
        let io_err = |source| PredictionLogError::Io {
            path: self.path.clone(),
            source,
        };
        let write_err = |source| PredictionLogError::Write {
            path: self.path.clone(),
            source,
        };

        let dir = if self.folder.as_os_str().is_empty() {
            Path::new(".")
        } else {
            self.folder.as_path()
        };
        let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(io_err)?;

        {
            let mut writer = csv::Writer::from_writer(tmp.as_file_mut());
            writer.write_record(&table.columns).map_err(write_err)?;
            for row in &table.rows {
                writer.write_record(row).map_err(write_err)?;
            }
            writer.flush().map_err(io_err)?;
        }
        tmp.as_file_mut().flush().map_err(io_err)?;

        // Temp files are owner-only; the log keeps its current mode
        let permissions = match std::fs::metadata(&self.path) {
            Ok(meta) => meta.permissions(),
            Err(_) => new_log_permissions(tmp.as_file()).map_err(io_err)?,
        };
        tmp.as_file().set_permissions(permissions).map_err(io_err)?;
        tmp.as_file().sync_all().map_err(io_err)?;

        tmp.persist(&self.path).map_err(|e| io_err(e.error))?;
        Ok(())
    }
}

#[cfg(unix)]
fn new_log_permissions(_tmp: &std::fs::File) -> std::io::Result<std::fs::Permissions> {
    use std::os::unix::fs::PermissionsExt;
    Ok(std::fs::Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn new_log_permissions(tmp: &std::fs::File) -> std::io::Result<std::fs::Permissions> {
    tmp.metadata().map(|meta| meta.permissions())
}

/// Text form of a float cell: shortest round-trip repr, always with a decimal point
fn format_cell(value: f64) -> String {
    format!("{:?}", value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn log_in(folder: &Path) -> PredictionLog {
        PredictionLog::new(&PredictionLogConfig {
            folder: folder.to_path_buf(),
            file_name: "predictions.csv".to_string(),
        })
    }

    fn feature_names() -> Vec<String> {
        vec!["AK".to_string(), "PDRB".to_string(), "Upah".to_string()]
    }

    fn record(label: &str, prediction: f64) -> PredictionRecord {
        PredictionRecord::new(&feature_names(), &[120.5, 45000.0, 15.2], prediction, label)
    }

    #[test]
    fn test_record_field_order() {
        let fields = record("Jawa Barat", 7.25).fields();
        let names: Vec<&str> = fields.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(
            names,
            vec!["AK", "PDRB", "Upah", PREDICTION_COLUMN, LABEL_COLUMN]
        );
        assert_eq!(fields[1].1, "45000.0");
        assert_eq!(fields[3].1, "7.25");
        assert_eq!(fields[4].1, "Jawa Barat");
    }

    #[test]
    fn test_first_append_creates_folder_and_single_row() {
        let dir = tempfile::tempdir().unwrap();
        let folder = dir.path().join("nested").join("Predictions");
        let log = log_in(&folder);

        let path = log.append(&record("Jawa Barat", 7.25)).unwrap();

        assert!(folder.is_dir());
        assert_eq!(path, folder.join("predictions.csv"));
        let table = log.read_all().unwrap();
        assert_eq!(
            table.columns,
            vec!["AK", "PDRB", "Upah", PREDICTION_COLUMN, LABEL_COLUMN]
        );
        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.column(LABEL_COLUMN).unwrap(), vec!["Jawa Barat"]);
        assert_eq!(table.column(PREDICTION_COLUMN).unwrap(), vec!["7.25"]);
    }

    #[test]
    fn test_append_keeps_prior_rows_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let log = log_in(dir.path());

        for (i, label) in ["Aceh", "Bali", "Papua"].iter().enumerate() {
            log.append(&record(label, i as f64)).unwrap();
        }
        let before = log.read_all().unwrap();

        log.append(&record("Riau", 9.5)).unwrap();
        let after = log.read_all().unwrap();

        assert_eq!(after.rows.len(), before.rows.len() + 1);
        assert_eq!(&after.rows[..3], &before.rows[..]);
        assert_eq!(
            after.column(LABEL_COLUMN).unwrap(),
            vec!["Aceh", "Bali", "Papua", "Riau"]
        );
    }

    #[test]
    fn test_identical_records_are_not_deduplicated() {
        let dir = tempfile::tempdir().unwrap();
        let log = log_in(dir.path());

        log.append(&record("Bali", 4.0)).unwrap();
        log.append(&record("Bali", 4.0)).unwrap();

        let table = log.read_all().unwrap();
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0], table.rows[1]);
    }

    #[test]
    fn test_existing_column_order_is_kept() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("predictions.csv");
        std::fs::write(
            &path,
            "Nama Provinsi,Prediksi Pengangguran,Upah,PDRB,AK,Catatan\n\
             Aceh,6.1,10.0,2000.0,50.0,lama\n",
        )
        .unwrap();
        let log = log_in(dir.path());

        log.append(&record("Jawa Barat", 7.25)).unwrap();

        let table = log.read_all().unwrap();
        assert_eq!(
            table.columns,
            vec![
                LABEL_COLUMN,
                PREDICTION_COLUMN,
                "Upah",
                "PDRB",
                "AK",
                "Catatan"
            ]
        );
        assert_eq!(
            table.rows[0],
            vec!["Aceh", "6.1", "10.0", "2000.0", "50.0", "lama"]
        );
        assert_eq!(
            table.rows[1],
            vec!["Jawa Barat", "7.25", "15.2", "45000.0", "120.5", ""]
        );
    }

    #[test]
    fn test_new_fields_become_trailing_columns() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("predictions.csv");
        std::fs::write(&path, "AK,Nama Provinsi\n50.0,Aceh\n").unwrap();
        let log = log_in(dir.path());

        log.append(&record("Bali", 3.0)).unwrap();

        let table = log.read_all().unwrap();
        assert_eq!(
            table.columns,
            vec!["AK", LABEL_COLUMN, "PDRB", "Upah", PREDICTION_COLUMN]
        );
        assert_eq!(table.rows[0], vec!["50.0", "Aceh", "", "", ""]);
        assert_eq!(
            table.rows[1],
            vec!["120.5", "Bali", "45000.0", "15.2", "3.0"]
        );
    }

    #[test]
    fn test_unreadable_log_is_reported_and_left_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("predictions.csv");
        let corrupt = "AK,PDRB\n1.0,2.0,3.0\n";
        std::fs::write(&path, corrupt).unwrap();
        let log = log_in(dir.path());

        let result = log.append(&record("Bali", 3.0));

        assert!(matches!(result, Err(PredictionLogError::Read { .. })));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), corrupt);
    }

    #[test]
    fn test_concurrent_appends_are_serialised() {
        let dir = tempfile::tempdir().unwrap();
        let log = Arc::new(log_in(dir.path()));

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let log = Arc::clone(&log);
                std::thread::spawn(move || {
                    for j in 0..5 {
                        log.append(&record(&format!("P{}-{}", i, j), j as f64))
                            .unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let table = log.read_all().unwrap();
        assert_eq!(table.rows.len(), 40);
    }

    #[cfg(unix)]
    #[test]
    fn test_new_log_is_world_readable() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let log = log_in(dir.path());

        let path = log.append(&record("Aceh", 6.17)).unwrap();
        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o644);
    }

    #[cfg(unix)]
    #[test]
    fn test_append_keeps_existing_mode() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let log = log_in(dir.path());
        let path = log.append(&record("Aceh", 6.17)).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o664)).unwrap();

        log.append(&record("Bali", 4.8)).unwrap();

        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o664);
        assert_eq!(log.read_all().unwrap().rows.len(), 2);
    }

    #[test]
    fn test_folder_path_that_is_a_file_fails_to_create() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("Predictions");
        std::fs::write(&blocker, "not a folder").unwrap();

        let result = log_in(&blocker).append(&record("Aceh", 6.17));

        assert!(matches!(result, Err(PredictionLogError::CreateDir { .. })));
        assert_eq!(std::fs::read_to_string(&blocker).unwrap(), "not a folder");
    }

    #[test]
    fn test_read_missing_log_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let table = log_in(&dir.path().join("absent")).read_all().unwrap();
        assert!(table.rows.is_empty());
        assert!(table.columns.is_empty());
    }
}
