use axum::{
    extract::{Query, State},
    Json,
};
use std::sync::Arc;

use crate::features::dataset::dtos::{DatasetPreviewDto, PreviewQueryParams};
use crate::features::dataset::services::DatasetService;
use crate::modules::dataset::ColumnSummary;
use crate::shared::types::{ApiResponse, Meta};

/// Get the first rows of the training dataset
#[utoipa::path(
    get,
    path = "/api/dataset/preview",
    tag = "dataset",
    params(PreviewQueryParams),
    responses(
        (status = 200, description = "Dataset preview", body = ApiResponse<DatasetPreviewDto>)
    )
)]
pub async fn get_preview(
    State(service): State<Arc<DatasetService>>,
    Query(params): Query<PreviewQueryParams>,
) -> Json<ApiResponse<DatasetPreviewDto>> {
    let preview = service.preview(params.rows);
    let total = preview.total_rows as i64;
    Json(ApiResponse::success(Some(preview), None, Some(Meta { total })))
}

/// Get summary statistics for every numeric dataset column
#[utoipa::path(
    get,
    path = "/api/dataset/summary",
    tag = "dataset",
    responses(
        (status = 200, description = "Per-column statistics", body = ApiResponse<Vec<ColumnSummary>>)
    )
)]
pub async fn get_summary(
    State(service): State<Arc<DatasetService>>,
) -> Json<ApiResponse<Vec<ColumnSummary>>> {
    Json(ApiResponse::success(
        Some(service.summary().to_vec()),
        None,
        None,
    ))
}
