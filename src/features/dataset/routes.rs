use axum::{routing::get, Router};
use std::sync::Arc;

use crate::features::dataset::handlers;
use crate::features::dataset::services::DatasetService;

/// Create routes for the dataset feature
pub fn routes(service: Arc<DatasetService>) -> Router {
    Router::new()
        .route("/api/dataset/preview", get(handlers::get_preview))
        .route("/api/dataset/summary", get(handlers::get_summary))
        .with_state(service)
}
