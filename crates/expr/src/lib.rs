//! Data access for Faintly templates.
//!
//! A [`Context`] maps names to [`Value`]s. Templates read it through dotted
//! property paths (`card.cardHeading`) and `${...}` placeholders embedded
//! in text and attribute values. Values may be [`Resolver`]s, functions
//! that are invoked and awaited when a path walks through them.

pub mod ast;
pub mod context;
pub mod engine;
mod parser;
pub mod resolver;
pub mod value;

// --- Public API ---
pub use ast::{Interpolation, PropertyPath, TextSegment};
pub use context::Context;
pub use engine::{Interpolated, resolve_expression, resolve_expressions, resolve_path};
pub use parser::parse_interpolation;
pub use resolver::{Invocation, Resolver};
pub use value::{Collection, Value};
