//! The shared template cache.

use crate::error::TemplateError;
use crate::template::Template;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, RwLock};

/// Parsed templates keyed by id, plus the set of files already fetched.
///
/// Entries are never evicted. A cache is meant to be owned by a long-lived
/// renderer and shared between renders; the per-path locks let concurrent
/// renders wait for a fetch already in flight instead of starting another.
#[derive(Default)]
pub struct TemplateCache {
    templates: RwLock<HashMap<String, Arc<Template>>>,
    fetched: RwLock<HashSet<String>>,
    path_locks: Mutex<HashMap<String, Arc<tokio::sync::Mutex<()>>>>,
}

impl std::fmt::Debug for TemplateCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TemplateCache")
            .field("templates", &self.len())
            .field(
                "fetched_paths",
                &self.fetched.read().map(|f| f.len()).unwrap_or(0),
            )
            .finish()
    }
}

impl TemplateCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &str) -> Result<Option<Arc<Template>>, TemplateError> {
        let templates = self
            .templates
            .read()
            .map_err(|_| TemplateError::Cache("Failed to acquire template lock".into()))?;
        Ok(templates.get(id).cloned())
    }

    /// True once a file's templates have been registered.
    pub fn is_fetched(&self, path: &str) -> Result<bool, TemplateError> {
        let fetched = self
            .fetched
            .read()
            .map_err(|_| TemplateError::Cache("Failed to acquire fetched-paths lock".into()))?;
        Ok(fetched.contains(path))
    }

    /// Registers the templates parsed from `path` and marks it fetched.
    /// Ids already present keep their existing template.
    pub fn register(&self, path: &str, templates: Vec<Template>) -> Result<(), TemplateError> {
        {
            let mut cache = self
                .templates
                .write()
                .map_err(|_| TemplateError::Cache("Failed to acquire template lock".into()))?;
            for template in templates {
                cache
                    .entry(template.id.clone())
                    .or_insert_with(|| Arc::new(template));
            }
        }
        let mut fetched = self
            .fetched
            .write()
            .map_err(|_| TemplateError::Cache("Failed to acquire fetched-paths lock".into()))?;
        fetched.insert(path.to_string());
        Ok(())
    }

    /// The lock serializing fetches of `path`.
    pub(crate) fn path_lock(
        &self,
        path: &str,
    ) -> Result<Arc<tokio::sync::Mutex<()>>, TemplateError> {
        let mut locks = self
            .path_locks
            .lock()
            .map_err(|_| TemplateError::Cache("Failed to acquire path lock table".into()))?;
        Ok(locks.entry(path.to_string()).or_default().clone())
    }

    /// The number of cached templates. Returns 0 if the lock is poisoned.
    pub fn len(&self) -> usize {
        self.templates.read().map(|c| c.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The ids of all cached templates, sorted.
    pub fn ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self
            .templates
            .read()
            .map(|c| c.keys().cloned().collect())
            .unwrap_or_default();
        ids.sort();
        ids
    }
}
