use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use crate::core::error::{AppError, Result};
use crate::features::predictions::dtos::{
    FeatureValueDto, ModelInfoDto, PredictionHistoryDto, PredictionResponseDto,
};
use crate::modules::ml::{FeatureSchema, ModelContext, ModelError};
use crate::modules::storage::{LogTable, PredictionLog, PredictionRecord};
use crate::shared::format::format_grouped;

/// Result of a successful predict-and-log run
#[derive(Debug, Clone)]
pub struct PredictionOutcome {
    pub record: PredictionRecord,
    pub values: Vec<f64>,
    pub log_path: PathBuf,
}

impl PredictionOutcome {
    pub fn prediction(&self) -> f64 {
        self.record.prediction()
    }

    pub fn prediction_display(&self) -> String {
        format_prediction(self.record.prediction())
    }
}

/// Prediction as shown to the user, e.g. `1,234.57`
pub fn format_prediction(value: f64) -> String {
    format_grouped(value, 2)
}

/// Service running the prediction workflow against the startup model
pub struct PredictionService {
    context: ModelContext,
    log: Arc<PredictionLog>,
}

impl PredictionService {
    pub fn new(context: ModelContext, log: Arc<PredictionLog>) -> Self {
        Self { context, log }
    }

    pub fn schema(&self) -> &FeatureSchema {
        &self.context.schema
    }

    pub fn model_info(&self) -> ModelInfoDto {
        ModelInfoDto {
            model: "Decision Tree".to_string(),
            schema: self.context.schema.clone(),
            metrics: self.context.metrics,
            training_rows: self.context.n_samples,
            in_sample: true,
        }
    }

    /// Order named values by the model's feature columns.
    ///
    /// Every feature must be present and no unknown names are accepted.
    pub fn values_from_named(&self, named: &HashMap<String, f64>) -> Result<Vec<f64>> {
        let schema = self.schema();

        let unknown: Vec<&str> = named
            .keys()
            .filter(|k| !schema.features.contains(k))
            .map(String::as_str)
            .collect();
        if !unknown.is_empty() {
            return Err(AppError::Validation(format!(
                "Unknown feature(s): {}",
                unknown.join(", ")
            )));
        }

        schema
            .features
            .iter()
            .map(|name| {
                named
                    .get(name)
                    .copied()
                    .ok_or_else(|| AppError::Validation(format!("Missing feature: {}", name)))
            })
            .collect()
    }

    /// Run the model on a feature vector. Nothing is stored.
    pub fn predict(&self, values: &[f64], label: &str) -> Result<PredictionRecord> {
        let expected = self.context.predictor.n_features();
        if values.len() != expected {
            tracing::warn!(
                "Prediction rejected for '{}': {} values for {} features",
                label,
                values.len(),
                expected
            );
            return Err(AppError::Prediction(ModelError::ShapeMismatch {
                expected,
                found: values.len(),
            }));
        }

        if let Some(pos) = values.iter().position(|v| !v.is_finite()) {
            let name = self
                .schema()
                .features
                .get(pos)
                .map(String::as_str)
                .unwrap_or("?");
            return Err(AppError::Validation(format!(
                "Feature {} must be a finite number",
                name
            )));
        }

        let prediction = self.context.predictor.predict_one(values).map_err(|e| {
            tracing::warn!("Prediction failed for '{}': {}", label, e);
            AppError::Prediction(e)
        })?;

        Ok(PredictionRecord::new(
            &self.schema().features,
            values,
            prediction,
            label,
        ))
    }

    /// Append a predicted record to the log, returning the log file path.
    pub async fn store(&self, record: &PredictionRecord) -> Result<PathBuf> {
        let log = Arc::clone(&self.log);
        let to_write = record.clone();
        let log_path = tokio::task::spawn_blocking(move || log.append(&to_write))
            .await
            .map_err(|e| AppError::Internal(format!("Prediction log task failed: {}", e)))?
            .map_err(|e| {
                tracing::error!(
                    "Failed to save prediction for '{}' (prediction={}): {}",
                    record.label(),
                    record.prediction(),
                    e
                );
                AppError::Storage(e)
            })?;

        tracing::info!(
            "Prediction stored: province={:?}, prediction={}, path={}",
            record.label(),
            record.prediction(),
            log_path.display()
        );
        Ok(log_path)
    }

    /// Predict from a feature vector and append the record to the log.
    ///
    /// Nothing is written when the model fails; a log failure aborts the
    /// submission after the prediction was made.
    pub async fn predict_and_log(&self, values: Vec<f64>, label: &str) -> Result<PredictionOutcome> {
        let record = self.predict(&values, label)?;
        let log_path = self.store(&record).await?;

        Ok(PredictionOutcome {
            record,
            values,
            log_path,
        })
    }

    pub fn to_response(&self, outcome: &PredictionOutcome) -> PredictionResponseDto {
        PredictionResponseDto {
            province_name: outcome.record.label().to_string(),
            prediction: outcome.prediction(),
            prediction_display: outcome.prediction_display(),
            features: self
                .schema()
                .features
                .iter()
                .zip(&outcome.values)
                .map(|(name, value)| FeatureValueDto {
                    name: name.clone(),
                    value: *value,
                })
                .collect(),
            log_path: outcome.log_path.display().to_string(),
        }
    }

    /// Everything stored in the prediction log so far
    pub async fn history(&self) -> Result<PredictionHistoryDto> {
        let log = Arc::clone(&self.log);
        let LogTable { columns, rows } = tokio::task::spawn_blocking(move || log.read_all())
            .await
            .map_err(|e| AppError::Internal(format!("Prediction log task failed: {}", e)))??;

        Ok(PredictionHistoryDto {
            log_path: self.log.path().display().to_string(),
            columns,
            rows,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::storage::{LABEL_COLUMN, PREDICTION_COLUMN};
    use crate::shared::test_helpers::{
        failing_prediction_service, log_config, prediction_service,
    };

    fn read_log(folder: &std::path::Path) -> LogTable {
        PredictionLog::new(&log_config(folder)).read_all().unwrap()
    }

    #[tokio::test]
    async fn test_predict_and_log_appends_one_row() {
        let dir = tempfile::tempdir().unwrap();
        let service = prediction_service(dir.path());

        let outcome = service
            .predict_and_log(vec![24900.1, 2422000.0, 15.2], "Jawa Barat")
            .await
            .unwrap();

        assert!(outcome.prediction().is_finite());
        assert_eq!(outcome.log_path, dir.path().join("predictions.csv"));

        let table = read_log(dir.path());
        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.column("AK").unwrap(), vec!["24900.1"]);
        assert_eq!(table.column("PDRB").unwrap(), vec!["2422000.0"]);
        assert_eq!(table.column("Upah").unwrap(), vec!["15.2"]);
        assert_eq!(table.column(LABEL_COLUMN).unwrap(), vec!["Jawa Barat"]);
        let stored: f64 = table.column(PREDICTION_COLUMN).unwrap()[0].parse().unwrap();
        assert_eq!(stored, outcome.prediction());
    }

    #[tokio::test]
    async fn test_training_row_predicts_its_target() {
        let dir = tempfile::tempdir().unwrap();
        let service = prediction_service(dir.path());

        let outcome = service
            .predict_and_log(vec![24900.1, 2422000.0, 15.2], "Jawa Barat")
            .await
            .unwrap();
        assert!((outcome.prediction() - 8.31).abs() < 1e-9);
        assert_eq!(outcome.prediction_display(), "8.31");
    }

    #[tokio::test]
    async fn test_repeated_predictions_match() {
        let dir = tempfile::tempdir().unwrap();
        let service = prediction_service(dir.path());

        let first = service
            .predict_and_log(vec![3000.0, 500000.0, 16.0], "Bali")
            .await
            .unwrap();
        let second = service
            .predict_and_log(vec![3000.0, 500000.0, 16.0], "Bali")
            .await
            .unwrap();

        assert_eq!(first.prediction(), second.prediction());
        assert_eq!(read_log(dir.path()).rows.len(), 2);
    }

    #[tokio::test]
    async fn test_wrong_feature_count_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let service = prediction_service(dir.path());

        let result = service.predict_and_log(vec![1.0, 2.0], "Aceh").await;

        assert!(matches!(result, Err(AppError::Prediction(_))));
        assert!(!dir.path().join("predictions.csv").exists());
    }

    #[tokio::test]
    async fn test_model_failure_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let service = failing_prediction_service(dir.path());

        let result = service
            .predict_and_log(vec![1.0, 2.0, 3.0], "Aceh")
            .await;

        assert!(matches!(result, Err(AppError::Prediction(_))));
        assert!(!dir.path().join("predictions.csv").exists());
    }

    #[tokio::test]
    async fn test_non_finite_value_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let service = prediction_service(dir.path());

        let result = service
            .predict_and_log(vec![1.0, f64::NAN, 3.0], "Aceh")
            .await;

        match result {
            Err(AppError::Validation(msg)) => assert!(msg.contains("PDRB")),
            other => panic!("unexpected result: {:?}", other.map(|o| o.prediction())),
        }
        assert!(!dir.path().join("predictions.csv").exists());
    }

    #[tokio::test]
    async fn test_log_failure_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        // A regular file where the log folder should be
        let blocker = dir.path().join("Predictions");
        std::fs::write(&blocker, "not a folder").unwrap();
        let service = prediction_service(&blocker);

        let result = service
            .predict_and_log(vec![1.0, 2.0, 3.0], "Aceh")
            .await;

        assert!(matches!(result, Err(AppError::Storage(_))));
        assert_eq!(
            std::fs::read_to_string(&blocker).unwrap(),
            "not a folder"
        );
    }

    #[test]
    fn test_predict_alone_stores_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let service = prediction_service(dir.path());

        let record = service
            .predict(&[24900.1, 2422000.0, 15.2], "Jawa Barat")
            .unwrap();

        assert!((record.prediction() - 8.31).abs() < 1e-9);
        assert_eq!(record.label(), "Jawa Barat");
        assert!(!dir.path().join("predictions.csv").exists());
    }

    #[tokio::test]
    async fn test_store_failure_keeps_the_prediction() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("Predictions");
        std::fs::write(&blocker, "not a folder").unwrap();
        let service = prediction_service(&blocker);

        let record = service.predict(&[24900.1, 2422000.0, 15.2], "Jawa Barat").unwrap();
        let result = service.store(&record).await;

        assert!(matches!(result, Err(AppError::Storage(_))));
        assert_eq!(format_prediction(record.prediction()), "8.31");
    }

    #[test]
    fn test_format_prediction_groups_thousands() {
        assert_eq!(format_prediction(1234.567), "1,234.57");
        assert_eq!(format_prediction(-0.5), "-0.50");
    }

    #[tokio::test]
    async fn test_first_submission_creates_missing_folder() {
        let dir = tempfile::tempdir().unwrap();
        let folder = dir.path().join("General").join("Predictions");
        let service = prediction_service(&folder);

        service
            .predict_and_log(vec![1.0, 2.0, 3.0], "Papua")
            .await
            .unwrap();

        assert!(folder.is_dir());
        assert_eq!(read_log(&folder).rows.len(), 1);
    }

    #[test]
    fn test_values_from_named_orders_by_schema() {
        let dir = tempfile::tempdir().unwrap();
        let service = prediction_service(dir.path());

        let named = HashMap::from([
            ("Upah".to_string(), 15.2),
            ("AK".to_string(), 120.5),
            ("PDRB".to_string(), 45000.0),
        ]);
        assert_eq!(
            service.values_from_named(&named).unwrap(),
            vec![120.5, 45000.0, 15.2]
        );
    }

    #[test]
    fn test_values_from_named_rejects_missing_and_unknown() {
        let dir = tempfile::tempdir().unwrap();
        let service = prediction_service(dir.path());

        let missing = HashMap::from([("AK".to_string(), 1.0)]);
        assert!(matches!(
            service.values_from_named(&missing),
            Err(AppError::Validation(msg)) if msg.contains("PDRB")
        ));

        let unknown = HashMap::from([
            ("AK".to_string(), 1.0),
            ("PDRB".to_string(), 1.0),
            ("Upah".to_string(), 1.0),
            ("Gini".to_string(), 0.4),
        ]);
        assert!(matches!(
            service.values_from_named(&unknown),
            Err(AppError::Validation(msg)) if msg.contains("Gini")
        ));
    }

    #[tokio::test]
    async fn test_history_lists_logged_rows() {
        let dir = tempfile::tempdir().unwrap();
        let service = prediction_service(dir.path());

        assert!(service.history().await.unwrap().rows.is_empty());

        service
            .predict_and_log(vec![1.0, 2.0, 3.0], "Aceh")
            .await
            .unwrap();
        let history = service.history().await.unwrap();
        assert_eq!(history.rows.len(), 1);
        assert_eq!(history.columns.last().unwrap(), LABEL_COLUMN);
    }
}
