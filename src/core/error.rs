use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::modules::ml::ModelError;
use crate::modules::storage::PredictionLogError;
use crate::shared::types::ApiResponse;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    /// The model could not produce a prediction for the submitted values
    #[error("Prediction error: {0}")]
    Prediction(#[from] ModelError),

    /// The prediction was made but could not be written to the log
    #[error("Storage error: {0}")]
    Storage(#[from] PredictionLogError),
}

impl AppError {
    /// Message suitable for showing to the user in a banner
    pub fn user_message(&self) -> String {
        match self {
            AppError::Storage(e) => format!("Terjadi kesalahan saat menyimpan file: {}", e),
            AppError::Internal(_) => "Terjadi kesalahan internal".to_string(),
            AppError::Prediction(e) => format!("Terjadi kesalahan: {}", e),
            AppError::Validation(msg) | AppError::BadRequest(msg) => {
                format!("Terjadi kesalahan: {}", msg)
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message, errors) = match self {
            AppError::Validation(ref msg) => (
                StatusCode::BAD_REQUEST,
                msg.clone(),
                Some(vec![msg.clone()]),
            ),
            AppError::BadRequest(ref msg) => (StatusCode::BAD_REQUEST, msg.clone(), None),
            AppError::Internal(ref msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                    None,
                )
            }
            AppError::Prediction(ref e) => {
                tracing::warn!("Prediction error: {}", e);
                (StatusCode::UNPROCESSABLE_ENTITY, e.to_string(), None)
            }
            AppError::Storage(ref e) => {
                tracing::error!("Storage error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Failed to save prediction: {}", e),
                    None,
                )
            }
        };

        let body = Json(ApiResponse::<()>::error(Some(message), errors));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
