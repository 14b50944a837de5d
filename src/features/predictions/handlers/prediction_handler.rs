use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::predictions::dtos::{
    CreatePredictionDto, ModelInfoDto, PredictionHistoryDto, PredictionResponseDto,
};
use crate::features::predictions::services::PredictionService;
use crate::shared::types::{ApiResponse, Meta};

/// Predict the unemployment rate and store the result
///
/// Runs the trained decision tree on the submitted feature values and appends
/// the prediction to the prediction log. Nothing is stored when the model
/// cannot produce a prediction.
#[utoipa::path(
    post,
    path = "/api/predictions",
    request_body = CreatePredictionDto,
    responses(
        (status = 201, description = "Prediction made and stored", body = ApiResponse<PredictionResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 422, description = "Model could not predict for the given values"),
        (status = 500, description = "Prediction could not be stored")
    ),
    tag = "predictions"
)]
pub async fn create_prediction(
    State(service): State<Arc<PredictionService>>,
    AppJson(dto): AppJson<CreatePredictionDto>,
) -> Result<(StatusCode, Json<ApiResponse<PredictionResponseDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let values = match (&dto.features, dto.values) {
        (Some(named), None) => service.values_from_named(named)?,
        (None, Some(values)) => values,
        _ => {
            return Err(AppError::Validation(
                "Provide exactly one of 'features' or 'values'".to_string(),
            ))
        }
    };

    let outcome = service.predict_and_log(values, &dto.province_name).await?;
    let message = format!(
        "Prediksi Tingkat Pengangguran: {}",
        outcome.prediction_display()
    );

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(service.to_response(&outcome)),
            Some(message),
            None,
        )),
    ))
}

/// Get the trained model's feature schema and in-sample metrics
#[utoipa::path(
    get,
    path = "/api/model",
    responses(
        (status = 200, description = "Model description", body = ApiResponse<ModelInfoDto>)
    ),
    tag = "predictions"
)]
pub async fn get_model_info(
    State(service): State<Arc<PredictionService>>,
) -> Json<ApiResponse<ModelInfoDto>> {
    Json(ApiResponse::success(Some(service.model_info()), None, None))
}

/// List every prediction stored in the log
#[utoipa::path(
    get,
    path = "/api/predictions",
    responses(
        (status = 200, description = "Prediction log contents", body = ApiResponse<PredictionHistoryDto>),
        (status = 500, description = "Prediction log could not be read")
    ),
    tag = "predictions"
)]
pub async fn list_predictions(
    State(service): State<Arc<PredictionService>>,
) -> Result<Json<ApiResponse<PredictionHistoryDto>>> {
    let history = service.history().await?;
    let total = history.rows.len() as i64;
    Ok(Json(ApiResponse::success(
        Some(history),
        None,
        Some(Meta { total }),
    )))
}
