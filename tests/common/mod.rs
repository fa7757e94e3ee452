#![allow(dead_code)]

pub mod fixtures;

use faintly::{Context, Element, InMemoryTemplateSource, Node, Renderer, parse_fragment};
use serde_json::Value;
use std::sync::Arc;

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// A renderer over an in-memory source holding `templates`.
///
/// Text wrapping stays on, as it is by default.
pub fn renderer_with(templates: &[(&str, &str)]) -> (Renderer, Arc<InMemoryTemplateSource>) {
    init_logger();
    let source = Arc::new(InMemoryTemplateSource::new());
    for (path, markup) in templates {
        source.add(*path, *markup).expect("in-memory source lock");
    }
    let renderer = Renderer::builder()
        .with_source(source.clone())
        .build()
        .expect("renderer with a source");
    (renderer, source)
}

/// A context built from a JSON object.
pub fn json_context(data: Value) -> Context {
    match data {
        Value::Object(map) => Context::from(map),
        other => panic!("context must be a JSON object, got {}", other),
    }
}

/// Renders the template the context addresses and returns its HTML.
pub async fn render_html(renderer: &Renderer, context: Context) -> Result<String, faintly::Error> {
    Ok(renderer.render(context).await?.to_html())
}

/// Parses `markup` and returns its first element.
pub fn first_element(markup: &str) -> Element {
    parse_fragment(markup)
        .expect("valid markup")
        .into_children()
        .into_iter()
        .find_map(|node| match node {
            Node::Element(el) => Some(el),
            _ => None,
        })
        .expect("markup holds an element")
}

/// Drops whitespace between tags so fixtures can be written indented.
pub fn squash(html: &str) -> String {
    html.lines().map(str::trim).collect::<Vec<_>>().join("")
}
