pub mod dataset_dto;

pub use dataset_dto::{DatasetPreviewDto, PreviewQueryParams, StatRowDto, SummaryTableDto};
