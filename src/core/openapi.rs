use utoipa::{Modify, OpenApi};

use crate::features::dataset::{dtos as dataset_dtos, handlers as dataset_handlers};
use crate::features::predictions::{dtos as predictions_dtos, handlers as predictions_handlers};
use crate::modules::dataset::ColumnSummary;
use crate::modules::ml::{FeatureSchema, ModelMetrics};
use crate::shared::types::{ApiResponse, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Predictions
        predictions_handlers::create_prediction,
        predictions_handlers::list_predictions,
        predictions_handlers::get_model_info,
        // Dataset
        dataset_handlers::get_preview,
        dataset_handlers::get_summary,
    ),
    components(
        schemas(
            Meta,
            // Predictions
            predictions_dtos::CreatePredictionDto,
            predictions_dtos::FeatureValueDto,
            predictions_dtos::PredictionResponseDto,
            predictions_dtos::PredictionHistoryDto,
            predictions_dtos::ModelInfoDto,
            FeatureSchema,
            ModelMetrics,
            ApiResponse<predictions_dtos::PredictionResponseDto>,
            ApiResponse<predictions_dtos::PredictionHistoryDto>,
            ApiResponse<predictions_dtos::ModelInfoDto>,
            // Dataset
            dataset_dtos::DatasetPreviewDto,
            ColumnSummary,
            ApiResponse<dataset_dtos::DatasetPreviewDto>,
            ApiResponse<Vec<ColumnSummary>>,
        )
    ),
    tags(
        (name = "predictions", description = "Unemployment rate prediction and prediction log"),
        (name = "dataset", description = "Training dataset preview and statistics"),
    ),
    info(
        title = "Prediksi Pengangguran API",
        version = "0.1.0",
        description = "API documentation for the unemployment rate predictor",
    )
)]
pub struct ApiDoc;

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
