pub mod page_dto;
pub mod prediction_dto;

pub use page_dto::{BannerKind, BannerView, FieldView, MetricsView, PageView};
pub use prediction_dto::{
    CreatePredictionDto, FeatureValueDto, ModelInfoDto, PredictionHistoryDto,
    PredictionResponseDto,
};
