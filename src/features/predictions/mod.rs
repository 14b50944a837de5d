//! Unemployment rate prediction feature.
//!
//! Serves the prediction form and a JSON API over the decision tree trained at
//! startup. Every successful prediction is appended to the prediction log.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/` | Prediction form with dataset preview and statistics |
//! | POST | `/` | Submit the form, predict and store |
//! | POST | `/api/predictions` | Predict and store (JSON) |
//! | GET | `/api/predictions` | List stored predictions |
//! | GET | `/api/model` | Feature schema and evaluation metrics |

pub mod dtos;
pub mod handlers;
pub mod routes;
pub mod services;

pub use handlers::PageState;
pub use routes::{api_routes, page_routes};
pub use services::PredictionService;
