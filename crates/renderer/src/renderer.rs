//! The public rendering entry points.

use crate::builder::RendererBuilder;
use crate::config::RenderConfig;
use crate::post_process::{PostProcessor, WrapTextNodes, flatten_unwraps};
use crate::walker::Walker;
use faintly_dom::{Element, Fragment, Node};
use faintly_expr::Context;
use faintly_expr::context::{BLOCK, BLOCK_NAME, CODE_BASE_PATH};
use faintly_template_core::{Template, TemplateCache, TemplateError, TemplateKey, TemplateResolver};
use faintly_traits::TemplateSource;
use log::debug;
use std::sync::Arc;

/// Renders templates into elements.
///
/// A renderer owns the template cache, so it is meant to live as long as
/// the page (or process) and be shared by every render. Cloning is cheap
/// and clones share the cache.
#[derive(Debug, Clone)]
pub struct Renderer {
    resolver: TemplateResolver,
    config: RenderConfig,
    post_processors: Vec<Arc<dyn PostProcessor>>,
}

impl Renderer {
    /// A renderer with the default configuration and a fresh cache.
    pub fn new(source: Arc<dyn TemplateSource>) -> Self {
        Self::from_parts(TemplateResolver::new(source), RenderConfig::default(), Vec::new())
    }

    pub fn builder() -> RendererBuilder {
        RendererBuilder::new()
    }

    pub(crate) fn from_parts(
        resolver: TemplateResolver,
        config: RenderConfig,
        post_processors: Vec<Arc<dyn PostProcessor>>,
    ) -> Self {
        Self {
            resolver,
            config,
            post_processors,
        }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn cache(&self) -> &Arc<TemplateCache> {
        self.resolver.cache()
    }

    /// Finds the template the context addresses.
    ///
    /// The resolved location is written back to the context's `template`
    /// entry, so relative includes inside the template resolve against the
    /// file it came from.
    pub async fn resolve_template(
        &self,
        context: &mut Context,
    ) -> Result<Arc<Template>, TemplateError> {
        let key = TemplateKey::from_context(context, &self.config.code_base_path)?;
        context.set_template(key.path.clone(), key.name.clone());
        self.resolver.resolve(&key).await
    }

    /// Renders a template into a fresh list of nodes, then flattens unwrap
    /// markers and runs the post-processors.
    pub async fn render_template(
        &self,
        template: &Template,
        context: &mut Context,
    ) -> Result<Vec<Node>, TemplateError> {
        self.render_template_at_depth(template, context, 0).await
    }

    async fn render_template_at_depth(
        &self,
        template: &Template,
        context: &mut Context,
        depth: usize,
    ) -> Result<Vec<Node>, TemplateError> {
        debug!("Rendering template {} at include depth {}", template.id, depth);
        let walker = Walker::new(self, depth);
        let rendered = walker.render_nodes(template.content.clone(), context).await?;

        let mut nodes = flatten_unwraps(rendered);
        if self.config.wrap_text_nodes {
            WrapTextNodes.process(&mut nodes);
        }
        for processor in &self.post_processors {
            processor.process(&mut nodes);
        }
        Ok(nodes)
    }

    /// Renders the template addressed by an include's context.
    pub(crate) async fn render_include(
        &self,
        mut context: Context,
        depth: usize,
    ) -> Result<Vec<Node>, TemplateError> {
        if depth > self.config.max_include_depth {
            return Err(TemplateError::IncludeDepthExceeded(
                self.config.max_include_depth,
            ));
        }
        let template = self.resolve_template(&mut context).await?;
        self.render_template_at_depth(&template, &mut context, depth)
            .await
    }

    /// Resolves the context's template and returns the rendered nodes.
    pub async fn render(&self, mut context: Context) -> Result<Fragment, TemplateError> {
        let template = self.resolve_template(&mut context).await?;
        let nodes = self.render_template(&template, &mut context).await?;
        Ok(Fragment::new(nodes))
    }

    /// Replaces `element`'s children with the rendered template.
    ///
    /// On error the element is left untouched.
    pub async fn render_element(
        &self,
        element: &mut Element,
        context: Context,
    ) -> Result<(), TemplateError> {
        let rendered = self.render(context).await?;
        element.children = rendered.into_children();
        Ok(())
    }

    /// Renders a block element with its default template.
    ///
    /// Seeds `block` (a snapshot of the element as authored), `blockName`
    /// (from `data-block-name`) and, when missing, `codeBasePath`.
    pub async fn render_block(
        &self,
        block: &mut Element,
        mut context: Context,
    ) -> Result<(), TemplateError> {
        let block_name = block.data_attribute("blockName").map(str::to_string);
        debug!("Rendering block {:?}", block_name);

        context.insert(BLOCK, block.clone());
        context.insert(BLOCK_NAME, block_name);
        if context.code_base_path().is_none_or(str::is_empty) {
            context.insert(CODE_BASE_PATH, self.config.code_base_path.clone());
        }
        self.render_element(block, context).await
    }
}
