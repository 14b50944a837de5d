pub mod page_handler;
pub mod prediction_handler;

pub use page_handler::{show_page, submit_form, PageState};
pub use prediction_handler::{
    __path_create_prediction, __path_get_model_info, __path_list_predictions, create_prediction,
    get_model_info, list_predictions,
};
