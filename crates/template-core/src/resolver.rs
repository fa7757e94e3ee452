//! Template lookup: cache first, then fetch, parse and register.

use crate::cache::TemplateCache;
use crate::error::TemplateError;
use crate::key::TemplateKey;
use crate::template::{Template, parse_template_file};
use faintly_traits::TemplateSource;
use log::debug;
use std::sync::Arc;

/// Resolves template keys against a source through a shared cache.
#[derive(Debug, Clone)]
pub struct TemplateResolver {
    source: Arc<dyn TemplateSource>,
    cache: Arc<TemplateCache>,
}

impl TemplateResolver {
    pub fn new(source: Arc<dyn TemplateSource>) -> Self {
        Self::with_cache(source, Arc::new(TemplateCache::new()))
    }

    pub fn with_cache(source: Arc<dyn TemplateSource>, cache: Arc<TemplateCache>) -> Self {
        Self { source, cache }
    }

    pub fn cache(&self) -> &Arc<TemplateCache> {
        &self.cache
    }

    pub fn source(&self) -> &Arc<dyn TemplateSource> {
        &self.source
    }

    /// Returns the template addressed by `key`.
    ///
    /// A file is fetched at most once: concurrent misses on the same path
    /// wait for the first fetch, and a fragment missing from a file that was
    /// already fetched is reported without fetching it again. A failed fetch
    /// is not remembered, so a later call retries it.
    pub async fn resolve(&self, key: &TemplateKey) -> Result<Arc<Template>, TemplateError> {
        let id = key.id();
        if let Some(template) = self.cache.get(&id)? {
            debug!("Template cache hit for {}", id);
            return Ok(template);
        }

        let lock = self.cache.path_lock(&key.path)?;
        let _guard = lock.lock().await;

        if let Some(template) = self.cache.get(&id)? {
            debug!("Template {} registered while waiting", id);
            return Ok(template);
        }

        if !self.cache.is_fetched(&key.path)? {
            debug!(
                "Template cache miss for {}, fetching {} via {}",
                id,
                key.path,
                self.source.name()
            );
            let markup = self
                .source
                .fetch(&key.path)
                .await
                .map_err(|source| TemplateError::Fetch {
                    path: key.path.clone(),
                    source,
                })?;
            let templates = parse_template_file(&key.path, &markup)?;
            self.cache.register(&key.path, templates)?;
        }

        self.cache
            .get(&id)?
            .ok_or_else(|| TemplateError::NotFound {
                id,
                path: key.path.clone(),
            })
    }
}
