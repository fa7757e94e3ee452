//! TemplateSource trait for abstracting template file loading.
//!
//! The renderer asks a source for the markup at a template path and never
//! touches the network or filesystem itself.

use async_trait::async_trait;
use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::RwLock;
use thiserror::Error;

/// Error type for template loading operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SourceError {
    #[error("Template not found: {0}")]
    NotFound(String),

    #[error("Failed to fetch '{path}': HTTP status {status}")]
    Http { path: String, status: u16 },

    #[error("Failed to fetch '{path}': {message}")]
    Network { path: String, message: String },

    #[error("I/O error: {0}")]
    Io(String),

    #[error("Template '{0}' is not valid UTF-8")]
    InvalidEncoding(String),
}

impl From<std::io::Error> for SourceError {
    fn from(err: std::io::Error) -> Self {
        SourceError::Io(err.to_string())
    }
}

/// A place template files are fetched from.
///
/// Paths are the site-absolute paths templates are addressed by, such as
/// `/blocks/cards/cards.html`.
///
/// # Implementations
///
/// - `InMemoryTemplateSource`: pre-populated markup, always available
/// - `FilesystemTemplateSource`: files under a root directory
/// - `HttpTemplateSource`: files served under a base URL
#[async_trait]
pub trait TemplateSource: Send + Sync + Debug {
    /// Fetch the markup stored at `path`.
    async fn fetch(&self, path: &str) -> Result<String, SourceError>;

    /// Returns a human-readable name for this source (for logging/debugging).
    fn name(&self) -> &'static str;
}

/// An in-memory template source.
///
/// Templates must be added before use. Every fetch is counted per path so
/// callers can check how often a file was actually requested.
#[derive(Debug, Default)]
pub struct InMemoryTemplateSource {
    templates: RwLock<HashMap<String, String>>,
    fetches: RwLock<HashMap<String, usize>>,
}

impl InMemoryTemplateSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) the markup stored at `path`.
    ///
    /// # Errors
    ///
    /// Returns `SourceError::Io` if the internal lock is poisoned.
    pub fn add(
        &self,
        path: impl Into<String>,
        markup: impl Into<String>,
    ) -> Result<(), SourceError> {
        let mut templates = self
            .templates
            .write()
            .map_err(|_| SourceError::Io("template store lock poisoned".to_string()))?;
        templates.insert(path.into(), markup.into());
        Ok(())
    }

    /// Builder-style [`add`](Self::add) for setting up fixtures.
    pub fn with_template(self, path: impl Into<String>, markup: impl Into<String>) -> Self {
        if let Ok(mut templates) = self.templates.write() {
            templates.insert(path.into(), markup.into());
        }
        self
    }

    /// Remove a template. Returns `None` if the lock is poisoned or the
    /// template doesn't exist.
    pub fn remove(&self, path: &str) -> Option<String> {
        self.templates.write().ok()?.remove(path)
    }

    /// How many times `path` has been fetched, including failed fetches.
    pub fn fetch_count(&self, path: &str) -> usize {
        self.fetches
            .read()
            .ok()
            .and_then(|fetches| fetches.get(path).copied())
            .unwrap_or(0)
    }

    /// The number of fetches across all paths.
    pub fn total_fetches(&self) -> usize {
        self.fetches
            .read()
            .map(|fetches| fetches.values().sum())
            .unwrap_or(0)
    }

    /// Get the number of templates in the store.
    ///
    /// Returns 0 if the lock is poisoned.
    pub fn len(&self) -> usize {
        self.templates.read().map(|t| t.len()).unwrap_or(0)
    }

    /// Returns `true` if the store is empty or the lock is poisoned.
    pub fn is_empty(&self) -> bool {
        self.templates.read().map(|t| t.is_empty()).unwrap_or(true)
    }
}

#[async_trait]
impl TemplateSource for InMemoryTemplateSource {
    async fn fetch(&self, path: &str) -> Result<String, SourceError> {
        if let Ok(mut fetches) = self.fetches.write() {
            *fetches.entry(path.to_string()).or_default() += 1;
        }
        let templates = self
            .templates
            .read()
            .map_err(|_| SourceError::Io("template store lock poisoned".to_string()))?;
        templates
            .get(path)
            .cloned()
            .ok_or_else(|| SourceError::NotFound(path.to_string()))
    }

    fn name(&self) -> &'static str {
        "InMemoryTemplateSource"
    }
}
