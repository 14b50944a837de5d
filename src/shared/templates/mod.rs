//! Page template management module.
//!
//! Pages use Jinja2 syntax and are rendered with a serializable context.

pub mod engine;

pub use engine::{render_template, TemplateError, INDEX_TEMPLATE};
