//! Depth-first rendering of template nodes.

use crate::directive::INCLUDE;
use crate::directive_handlers::{attributes, content, include, repeat, test, unwrap};
use crate::renderer::Renderer;
use crate::stage::{PIPELINE, Stage, StageOutcome};
use faintly_dom::{Element, Node};
use faintly_expr::{Context, resolve_expressions};
use faintly_template_core::TemplateError;
use futures::FutureExt;
use futures::future::BoxFuture;
use log::{trace, warn};

/// Walks template nodes and builds the rendered output.
///
/// The input nodes are copies of a cached template and are consumed; the
/// cached template itself is never touched.
pub(crate) struct Walker<'r> {
    pub(crate) renderer: &'r Renderer,
    /// How many includes deep this walk is.
    pub(crate) depth: usize,
}

impl<'r> Walker<'r> {
    pub(crate) fn new(renderer: &'r Renderer, depth: usize) -> Self {
        Self { renderer, depth }
    }

    /// Renders sibling nodes in document order.
    pub(crate) async fn render_nodes(
        &self,
        nodes: Vec<Node>,
        context: &mut Context,
    ) -> Result<Vec<Node>, TemplateError> {
        let mut out = Vec::with_capacity(nodes.len());
        for node in nodes {
            match node {
                Node::Element(el) => out.extend(self.render_element(el, context).await?),
                Node::Text(text) => {
                    context.set_current_node(Node::Text(text.clone()));
                    let interpolated = resolve_expressions(&text, context).await;
                    out.push(Node::Text(if interpolated.updated {
                        interpolated.text
                    } else {
                        text
                    }));
                }
                comment => out.push(comment),
            }
        }
        Ok(out)
    }

    /// Runs the directive pipeline on one element and then, unless a stage
    /// finalized it, renders its children.
    pub(crate) fn render_element<'a>(
        &'a self,
        mut el: Element,
        context: &'a mut Context,
    ) -> BoxFuture<'a, Result<Vec<Node>, TemplateError>> {
        async move {
            context.set_current_node(Node::Element(el.shallow_clone()));

            let mut finalized = false;
            for stage in PIPELINE {
                if finalized && stage == Stage::Include {
                    if el.remove_attribute(INCLUDE).is_some() {
                        warn!(
                            "Ignoring data-fly-include on <{}>: its content was already set",
                            el.name
                        );
                    }
                    continue;
                }
                match self.run_stage(stage, &mut el, context).await? {
                    StageOutcome::Continue => {}
                    StageOutcome::Removed => {
                        trace!("<{}> removed by {}", el.name, stage.name());
                        return Ok(Vec::new());
                    }
                    StageOutcome::Replaced(nodes) => return Ok(nodes),
                    StageOutcome::Finalized => finalized = true,
                }
            }

            if !finalized {
                let children = std::mem::take(&mut el.children);
                el.children = self.render_nodes(children, context).await?;
            }
            Ok(vec![Node::Element(el)])
        }
        .boxed()
    }

    async fn run_stage(
        &self,
        stage: Stage,
        el: &mut Element,
        context: &mut Context,
    ) -> Result<StageOutcome, TemplateError> {
        match stage {
            Stage::Test => Ok(test::handle_test(el, context).await),
            Stage::Repeat => repeat::handle_repeat(self, el, context).await,
            Stage::Attributes => Ok(attributes::handle_attributes(el, context).await),
            Stage::Content => Ok(content::handle_content(el, context).await),
            Stage::Include => include::handle_include(self, el, context).await,
            Stage::Unwrap => Ok(unwrap::handle_unwrap(el, context).await),
        }
    }
}
