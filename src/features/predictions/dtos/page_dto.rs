use serde::Serialize;

use crate::features::dataset::dtos::{DatasetPreviewDto, StatRowDto};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BannerKind {
    Success,
    Info,
    Error,
}

/// Notification shown above the form. `emphasis` is rendered in bold after `prefix`.
#[derive(Debug, Clone, Serialize)]
pub struct BannerView {
    pub kind: BannerKind,
    pub prefix: String,
    pub emphasis: Option<String>,
}

impl BannerView {
    pub fn success(prefix: impl Into<String>, emphasis: impl Into<String>) -> Self {
        Self {
            kind: BannerKind::Success,
            prefix: prefix.into(),
            emphasis: Some(emphasis.into()),
        }
    }

    pub fn info(text: impl Into<String>) -> Self {
        Self {
            kind: BannerKind::Info,
            prefix: text.into(),
            emphasis: None,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: BannerKind::Error,
            prefix: text.into(),
            emphasis: None,
        }
    }
}

/// One number input on the form
#[derive(Debug, Clone, Serialize)]
pub struct FieldView {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct MetricsView {
    pub mse: String,
    pub r2: String,
    pub n_samples: usize,
}

/// Everything the index template renders
#[derive(Debug, Clone, Serialize)]
pub struct PageView {
    pub title: &'static str,
    pub header: &'static str,
    pub description: &'static str,
    pub footer: &'static str,
    pub legend: &'static [&'static str],
    pub label_field: &'static str,
    pub label: String,
    pub features: Vec<FieldView>,
    pub metrics: MetricsView,
    pub banners: Vec<BannerView>,
    pub preview: DatasetPreviewDto,
    pub summary_columns: Vec<String>,
    pub stat_rows: Vec<StatRowDto>,
}
