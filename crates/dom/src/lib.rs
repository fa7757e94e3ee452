//! An owned HTML node tree for the Faintly template engine.
//!
//! Templates are parsed into [`Node`] trees with [`parse_fragment`] and
//! written back out with [`nodes_to_html`]. The tree is deliberately small:
//! elements, text and comments, with attributes kept in source order.

pub mod error;
pub mod node;
mod parser;
mod serialize;

// --- Public API ---
pub use error::{Location, MarkupError};
pub use node::{
    Attribute, Attributes, Element, Fragment, Node, RAW_TEXT_ELEMENTS, VOID_ELEMENTS,
    dataset_attribute_name, is_raw_text_element, is_void_element,
};
pub use parser::parse_fragment;
pub use serialize::nodes_to_html;
