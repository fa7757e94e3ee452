use crate::config::RenderConfig;
use crate::post_process::PostProcessor;
use crate::renderer::Renderer;
use faintly_template_core::{TemplateCache, TemplateError, TemplateResolver};
use faintly_traits::TemplateSource;
use std::sync::Arc;

/// Assembles a [`Renderer`].
///
/// ```ignore
/// let renderer = Renderer::builder()
///     .with_source(Arc::new(FilesystemTemplateSource::new("site")))
///     .with_code_base_path("/")
///     .build()?;
/// ```
#[derive(Debug, Default)]
pub struct RendererBuilder {
    source: Option<Arc<dyn TemplateSource>>,
    cache: Option<Arc<TemplateCache>>,
    config: RenderConfig,
    post_processors: Vec<Arc<dyn PostProcessor>>,
}

impl RendererBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Where template files are fetched from. Required.
    pub fn with_source(mut self, source: Arc<dyn TemplateSource>) -> Self {
        self.source = Some(source);
        self
    }

    /// Shares an existing cache instead of starting with an empty one.
    pub fn with_cache(mut self, cache: Arc<TemplateCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    pub fn with_config(mut self, config: RenderConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_code_base_path(mut self, path: impl Into<String>) -> Self {
        self.config.code_base_path = path.into();
        self
    }

    pub fn with_max_include_depth(mut self, depth: usize) -> Self {
        self.config.max_include_depth = depth;
        self
    }

    /// Disables the built-in block cell wrapping.
    pub fn without_text_wrapping(mut self) -> Self {
        self.config.wrap_text_nodes = false;
        self
    }

    /// Adds a post-processor. Processors run in the order they are added,
    /// after the built-in ones.
    pub fn with_post_processor(mut self, processor: impl PostProcessor + 'static) -> Self {
        self.post_processors.push(Arc::new(processor));
        self
    }

    pub fn build(self) -> Result<Renderer, TemplateError> {
        let source = self.source.ok_or_else(|| {
            TemplateError::Config("No template source has been configured".to_string())
        })?;
        let resolver = match self.cache {
            Some(cache) => TemplateResolver::with_cache(source, cache),
            None => TemplateResolver::new(source),
        };
        Ok(Renderer::from_parts(
            resolver,
            self.config,
            self.post_processors,
        ))
    }
}
