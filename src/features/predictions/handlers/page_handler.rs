//! Server-rendered prediction page
//!
//! The form posts back to the same page; the result of a submission is shown
//! as banners above the re-rendered form, which keeps the submitted values.

use std::collections::HashMap;
use std::sync::Arc;

use axum::{extract::State, response::Html};

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppForm;
use crate::features::dataset::DatasetService;
use crate::features::predictions::dtos::{BannerView, FieldView, MetricsView, PageView};
use crate::features::predictions::services::{format_prediction, PredictionService};
use crate::shared::constants::{
    FEATURE_LEGEND, FOOTER_TEXT, LABEL_FIELD, MAX_LABEL_LENGTH, PAGE_DESCRIPTION, PAGE_HEADER,
    PAGE_TITLE,
};
use crate::shared::templates::{render_template, INDEX_TEMPLATE};

/// Shared state for the page routes
#[derive(Clone)]
pub struct PageState {
    pub predictions: Arc<PredictionService>,
    pub dataset: Arc<DatasetService>,
}

const DEFAULT_FIELD_VALUE: &str = "0.00";

pub async fn show_page(State(state): State<PageState>) -> Result<Html<String>> {
    let fields = state
        .predictions
        .schema()
        .features
        .iter()
        .map(|name| FieldView {
            name: name.clone(),
            value: DEFAULT_FIELD_VALUE.to_string(),
        })
        .collect();

    render_page(&state, String::new(), fields, Vec::new())
}

pub async fn submit_form(
    State(state): State<PageState>,
    AppForm(fields): AppForm<Vec<(String, String)>>,
) -> Result<Html<String>> {
    let submitted: HashMap<String, String> = fields.into_iter().collect();
    let label = submitted.get(LABEL_FIELD).cloned().unwrap_or_default();

    // Blank or absent inputs fall back to the form default
    let form_fields: Vec<FieldView> = state
        .predictions
        .schema()
        .features
        .iter()
        .map(|name| FieldView {
            name: name.clone(),
            value: submitted
                .get(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| DEFAULT_FIELD_VALUE.to_string()),
        })
        .collect();

    let banners = match parse_submission(&form_fields, &label) {
        Err(e) => vec![BannerView::error(e.user_message())],
        Ok(values) => run_submission(&state.predictions, &values, &label).await,
    };

    render_page(&state, label, form_fields, banners)
}

/// Predict, then store. The prediction is shown even when storing it fails.
async fn run_submission(
    predictions: &PredictionService,
    values: &[f64],
    label: &str,
) -> Vec<BannerView> {
    let record = match predictions.predict(values, label) {
        Ok(record) => record,
        Err(e) => return vec![BannerView::error(e.user_message())],
    };

    let mut banners = vec![BannerView::success(
        "🎉 Prediksi Tingkat Pengangguran: ",
        format_prediction(record.prediction()),
    )];

    match predictions.store(&record).await {
        Ok(path) => banners.push(BannerView::info(format!(
            "📁 Hasil prediksi disimpan di file: {}",
            path.display()
        ))),
        Err(e) => {
            banners.push(BannerView::error(e.user_message()));
            if let AppError::Storage(cause) = &e {
                banners.push(BannerView::error(format!("Terjadi kesalahan: {}", cause)));
            }
        }
    }

    banners
}

fn parse_submission(fields: &[FieldView], label: &str) -> Result<Vec<f64>> {
    if label.chars().count() as u64 > MAX_LABEL_LENGTH {
        return Err(AppError::Validation(format!(
            "Nama Provinsi maksimal {} karakter",
            MAX_LABEL_LENGTH
        )));
    }

    fields
        .iter()
        .map(|field| {
            field.value.parse::<f64>().map_err(|_| {
                AppError::Validation(format!(
                    "Nilai {} tidak valid: '{}'",
                    field.name, field.value
                ))
            })
        })
        .collect()
}

fn render_page(
    state: &PageState,
    label: String,
    features: Vec<FieldView>,
    banners: Vec<BannerView>,
) -> Result<Html<String>> {
    let info = state.predictions.model_info();
    let summary = state.dataset.summary_table();

    let view = PageView {
        title: PAGE_TITLE,
        header: PAGE_HEADER,
        description: PAGE_DESCRIPTION,
        footer: FOOTER_TEXT,
        legend: FEATURE_LEGEND,
        label_field: LABEL_FIELD,
        label,
        features,
        metrics: MetricsView {
            mse: format!("{:.2}", info.metrics.mse),
            r2: format!("{:.2}", info.metrics.r2),
            n_samples: info.training_rows,
        },
        banners,
        preview: state.dataset.preview(None),
        summary_columns: summary.columns,
        stat_rows: summary.rows,
    };

    render_template(INDEX_TEMPLATE, &view)
        .map(Html)
        .map_err(|e| AppError::Internal(e.to_string()))
}
