//! Shared abstractions for the Faintly workspace.

pub mod source;

pub use source::{InMemoryTemplateSource, SourceError, TemplateSource};
