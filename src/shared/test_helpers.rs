use std::path::Path;
use std::sync::Arc;

use crate::core::config::{DatasetConfig, ModelConfig, PredictionLogConfig};
use crate::features::dataset::DatasetService;
use crate::features::predictions::PredictionService;
use crate::modules::dataset::Dataset;
use crate::modules::ml::{ModelContext, ModelError, Predictor};
use crate::modules::storage::PredictionLog;

const SAMPLE_COLUMNS: &[&str] = &[
    "ID_Provinsi",
    "Provinsi",
    "Tahun",
    "AK",
    "PDRB",
    "Pengangguran",
    "Upah",
];

const SAMPLE_ROWS: &[&[&str]] = &[
    &["11", "Aceh", "2022", "2500.5", "210000.0", "6.17", "12.1"],
    &["12", "Sumatera Utara", "2022", "7500.2", "955000.0", "6.16", "13.4"],
    &["31", "DKI Jakarta", "2022", "5200.8", "3186000.0", "7.18", "28.9"],
    &["32", "Jawa Barat", "2022", "24900.1", "2422000.0", "8.31", "15.2"],
    &["35", "Jawa Timur", "2022", "22600.4", "2730000.0", "5.49", "14.0"],
    &["51", "Bali", "2022", "2600.9", "252000.0", "4.80", "17.6"],
    &["94", "Papua", "2022", "1900.3", "250000.0", "2.83", "19.8"],
];

pub fn sample_dataset() -> Dataset {
    Dataset::from_parts(
        SAMPLE_COLUMNS.iter().map(|c| c.to_string()).collect(),
        SAMPLE_ROWS
            .iter()
            .map(|r| r.iter().map(|c| c.to_string()).collect())
            .collect(),
    )
    .unwrap()
}

pub fn sample_dataset_config() -> DatasetConfig {
    DatasetConfig {
        path: "datamodel.csv".into(),
        delimiter: b';',
        ignore_columns: vec![
            "ID_Provinsi".to_string(),
            "Provinsi".to_string(),
            "Tahun".to_string(),
        ],
        target_column: "Pengangguran".to_string(),
        preview_rows: 5,
    }
}

pub fn sample_context() -> ModelContext {
    ModelContext::train(
        &sample_dataset(),
        &sample_dataset_config(),
        &ModelConfig::default(),
    )
    .unwrap()
}

pub fn log_config(folder: &Path) -> PredictionLogConfig {
    PredictionLogConfig {
        folder: folder.to_path_buf(),
        file_name: "predictions.csv".to_string(),
    }
}

pub fn prediction_service(folder: &Path) -> Arc<PredictionService> {
    Arc::new(PredictionService::new(
        sample_context(),
        Arc::new(PredictionLog::new(&log_config(folder))),
    ))
}

pub fn dataset_service() -> Arc<DatasetService> {
    Arc::new(DatasetService::new(Arc::new(sample_dataset()), 5))
}

/// Predictor that always fails, for exercising the error path
pub struct FailingPredictor {
    pub n_features: usize,
}

impl Predictor for FailingPredictor {
    fn n_features(&self) -> usize {
        self.n_features
    }

    fn predict(&self, _rows: &[Vec<f64>]) -> Result<Vec<f64>, ModelError> {
        Err(ModelError::Predict("model unavailable".to_string()))
    }
}

/// Prediction service whose model always fails
pub fn failing_prediction_service(folder: &Path) -> Arc<PredictionService> {
    let mut context = sample_context();
    context.predictor = Arc::new(FailingPredictor {
        n_features: context.schema.n_features(),
    });
    Arc::new(PredictionService::new(
        context,
        Arc::new(PredictionLog::new(&log_config(folder))),
    ))
}
