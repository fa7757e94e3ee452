//! Parsed template fragments.

use crate::error::TemplateError;
use crate::key::template_id;
use faintly_dom::{Element, Node, parse_fragment};
use log::{debug, warn};
use std::collections::HashSet;

/// The attribute naming a fragment within its file.
pub const NAME_ATTRIBUTE: &str = "data-fly-name";

/// One `<template>` of a template file, parsed once and never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    pub id: String,
    pub path: String,
    pub name: String,
    /// The template's content nodes.
    pub content: Vec<Node>,
}

impl Template {
    fn from_element(path: &str, element: Element) -> Self {
        let name = element
            .get_attribute(NAME_ATTRIBUTE)
            .unwrap_or_default()
            .to_string();
        Template {
            id: template_id(path, &name),
            path: path.to_string(),
            name,
            content: element.children,
        }
    }
}

/// Parses a template file and returns every `<template>` element in it, in
/// document order.
///
/// Templates nested inside another template's content belong to that
/// content and are not returned. When two templates share an id the first
/// one wins.
pub fn parse_template_file(path: &str, markup: &str) -> Result<Vec<Template>, TemplateError> {
    let fragment = parse_fragment(markup).map_err(|source| TemplateError::Markup {
        path: path.to_string(),
        source,
    })?;

    let mut elements = Vec::new();
    collect_templates(fragment.into_children(), &mut elements);

    let mut seen = HashSet::new();
    let mut templates = Vec::with_capacity(elements.len());
    for element in elements {
        let template = Template::from_element(path, element);
        if !seen.insert(template.id.clone()) {
            warn!(
                "Ignoring duplicate template '{}' in {}",
                template.name, path
            );
            continue;
        }
        templates.push(template);
    }

    debug!("Parsed {} template(s) from {}", templates.len(), path);
    Ok(templates)
}

fn collect_templates(nodes: Vec<Node>, out: &mut Vec<Element>) {
    for node in nodes {
        if let Node::Element(element) = node {
            if element.name == "template" {
                out.push(element);
            } else {
                collect_templates(element.children, out);
            }
        }
    }
}
