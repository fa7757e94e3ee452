use faintly_dom::MarkupError;
use faintly_template_core::TemplateError;
use thiserror::Error;

/// Any error surfaced by the `faintly` facade or binary.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Rendering failed: {0}")]
    Template(#[from] TemplateError),

    #[error("Invalid markup: {0}")]
    Markup(#[from] MarkupError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Usage(String),
}
