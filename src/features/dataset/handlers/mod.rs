pub mod dataset_handler;

pub use dataset_handler::{__path_get_preview, __path_get_summary, get_preview, get_summary};
