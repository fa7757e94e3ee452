//! Passes over a rendered fragment after all directives have run.

use crate::directive::UNWRAP;
use faintly_dom::{Element, Node};
use log::trace;
use std::fmt::Debug;

/// A transformation applied once to every rendered fragment.
pub trait PostProcessor: Send + Sync + Debug {
    fn process(&self, nodes: &mut Vec<Node>);

    /// Returns a human-readable name for this processor (for logging/debugging).
    fn name(&self) -> &'static str;
}

/// Replaces every element still marked with `data-fly-unwrap` by its
/// children, at any depth.
pub fn flatten_unwraps(nodes: Vec<Node>) -> Vec<Node> {
    let mut out = Vec::with_capacity(nodes.len());
    for node in nodes {
        match node {
            Node::Element(mut el) => {
                el.children = flatten_unwraps(std::mem::take(&mut el.children));
                if el.has_attribute(UNWRAP) {
                    trace!("Unwrapping <{}>", el.name);
                    out.append(&mut el.children);
                } else {
                    out.push(Node::Element(el));
                }
            }
            other => out.push(other),
        }
    }
    out
}

/// Tags that already give a block cell's content a proper wrapper.
const CELL_WRAPPERS: &[&str] = &[
    "p", "pre", "ul", "ol", "picture", "table", "h1", "h2", "h3", "h4", "h5", "h6",
];

/// Wraps loose content of block cells in a `<p>`.
///
/// A cell is a `div` directly inside a top-level `div`. When a non-empty
/// cell does not start with a wrapper element (or starts with a `picture`
/// that has company), its children move into a new `<p>`, together with
/// the cell's `class`, `data-aue*` and `data-richtext*` attributes.
#[derive(Debug, Default, Clone, Copy)]
pub struct WrapTextNodes;

impl WrapTextNodes {
    fn needs_wrapper(cell: &Element) -> bool {
        if cell.children.is_empty() {
            return false;
        }
        match cell.first_element_child() {
            None => true,
            Some(first) if !CELL_WRAPPERS.contains(&first.name.as_str()) => true,
            Some(first) if first.name == "picture" => {
                cell.element_children().count() > 1 || !cell.text_content().trim().is_empty()
            }
            Some(_) => false,
        }
    }

    fn wrap(cell: &mut Element) {
        let mut wrapper = Element::new("p");
        let moved: Vec<String> = cell
            .attributes
            .names()
            .filter(|name| {
                *name == "class" || name.starts_with("data-aue") || name.starts_with("data-richtext")
            })
            .map(str::to_string)
            .collect();
        for name in moved {
            if let Some(value) = cell.remove_attribute(&name) {
                wrapper.set_attribute(name, value);
            }
        }
        wrapper.children = std::mem::take(&mut cell.children);
        cell.children.push(Node::Element(wrapper));
    }
}

impl PostProcessor for WrapTextNodes {
    fn process(&self, nodes: &mut Vec<Node>) {
        let rows = nodes
            .iter_mut()
            .filter_map(Node::as_element_mut)
            .filter(|el| el.name == "div");
        for row in rows {
            let cells = row
                .children
                .iter_mut()
                .filter_map(Node::as_element_mut)
                .filter(|el| el.name == "div");
            for cell in cells {
                if Self::needs_wrapper(cell) {
                    Self::wrap(cell);
                }
            }
        }
    }

    fn name(&self) -> &'static str {
        "WrapTextNodes"
    }
}
