use faintly_dom::MarkupError;
use faintly_traits::SourceError;
use thiserror::Error;

/// Errors that can occur while resolving or rendering templates.
#[derive(Error, Debug)]
pub enum TemplateError {
    #[error("Failed to fetch template from {path}: {source}")]
    Fetch { path: String, source: SourceError },

    #[error("Failed to find template with id {id} in {path}")]
    NotFound { id: String, path: String },

    #[error("Invalid template markup in {path}: {source}")]
    Markup { path: String, source: MarkupError },

    #[error("No template path given and no blockName in the context")]
    MissingBlockName,

    #[error("Maximum include depth ({0}) exceeded")]
    IncludeDepthExceeded(usize),

    #[error("Template cache error: {0}")]
    Cache(String),

    #[error("Invalid renderer configuration: {0}")]
    Config(String),
}
