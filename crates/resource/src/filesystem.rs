//! Filesystem-based template source.
//!
//! Template paths are site-absolute (`/blocks/cards/cards.html`) and are
//! resolved under a root directory.
//!
//! # Security
//!
//! The source validates that all resolved paths remain within the root to
//! prevent directory traversal (e.g., `/../../etc/passwd`).

use async_trait::async_trait;
use faintly_traits::{SourceError, TemplateSource};
use log::debug;
use std::path::{Component, Path, PathBuf};

/// A template source that reads files under a root directory.
#[derive(Debug)]
pub struct FilesystemTemplateSource {
    root: PathBuf,
    /// Canonicalized root for containment checks
    canonical_root: Option<PathBuf>,
}

impl FilesystemTemplateSource {
    /// Creates a source rooted at `root`.
    ///
    /// The root is canonicalized up front; if that fails (the directory does
    /// not exist yet) only the lexical traversal check applies.
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        let root = root.as_ref().to_path_buf();
        let canonical_root = root.canonicalize().ok();
        Self {
            root,
            canonical_root,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Maps a template path onto the filesystem.
    ///
    /// Returns `None` for paths that contain `..` or escape the root.
    async fn resolve_path_safe(&self, path: &str) -> Option<PathBuf> {
        let relative = Path::new(path.trim_start_matches('/'));
        if relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir))
        {
            return None;
        }

        let full_path = self.root.join(relative);

        if let Ok(canonical) = tokio::fs::canonicalize(&full_path).await
            && let Some(ref root) = self.canonical_root
        {
            // Symlinks may still point outside the root.
            return canonical.starts_with(root).then_some(canonical);
        }

        Some(full_path)
    }
}

#[async_trait]
impl TemplateSource for FilesystemTemplateSource {
    async fn fetch(&self, path: &str) -> Result<String, SourceError> {
        let full_path = self
            .resolve_path_safe(path)
            .await
            .ok_or_else(|| SourceError::NotFound(format!("{} (path traversal blocked)", path)))?;

        debug!("Reading template {} from {}", path, full_path.display());
        let bytes = tokio::fs::read(&full_path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                SourceError::NotFound(path.to_string())
            } else {
                SourceError::Io(format!("{}: {}", path, e))
            }
        })?;
        String::from_utf8(bytes).map_err(|_| SourceError::InvalidEncoding(path.to_string()))
    }

    fn name(&self) -> &'static str {
        "FilesystemTemplateSource"
    }
}
