use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::predictions::handlers::{self, PageState};
use crate::features::predictions::services::PredictionService;

/// JSON routes for the prediction feature
pub fn api_routes(service: Arc<PredictionService>) -> Router {
    Router::new()
        .route(
            "/api/predictions",
            get(handlers::list_predictions).post(handlers::create_prediction),
        )
        .route("/api/model", get(handlers::get_model_info))
        .with_state(service)
}

/// Server-rendered form page
pub fn page_routes(state: PageState) -> Router {
    Router::new()
        .route("/", get(handlers::show_page).post(handlers::submit_form))
        .with_state(state)
}
