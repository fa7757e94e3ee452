//! # Faintly
//!
//! Asynchronous HTML templating driven by `data-fly-*` attributes.
//!
//! Templates are ordinary HTML files holding `<template>` elements. A
//! [`Renderer`] fetches them through a [`TemplateSource`], caches every
//! fragment, and renders a fragment against a [`Context`] whose values may
//! be computed lazily by async [`Resolver`]s.
//!
//! ```ignore
//! let renderer = Renderer::builder()
//!     .with_source(Arc::new(FilesystemTemplateSource::new("site")))
//!     .build()?;
//! renderer.render_block(&mut block, Context::new()).await?;
//! ```
//!
//! The member crates are re-exported here so embedders only need this one.

pub mod cli;
pub mod error;

pub use error::Error;

pub use faintly_dom::{Attribute, Attributes, Element, Fragment, MarkupError, Node, parse_fragment};
pub use faintly_expr::{
    Collection, Context, Interpolated, Invocation, Resolver, Value, resolve_expression,
    resolve_expressions,
};
pub use faintly_renderer::{
    DEFAULT_MAX_INCLUDE_DEPTH, PostProcessor, RenderConfig, Renderer, RendererBuilder,
    WrapTextNodes, flatten_unwraps,
};
pub use faintly_resource::{FilesystemTemplateSource, HttpTemplateSource};
pub use faintly_template_core::{
    Template, TemplateCache, TemplateError, TemplateKey, TemplateResolver, template_id,
};
pub use faintly_traits::{InMemoryTemplateSource, SourceError, TemplateSource};

/// The member crates, for anything not re-exported above.
pub mod crates {
    pub use faintly_dom as dom;
    pub use faintly_expr as expr;
    pub use faintly_renderer as renderer;
    pub use faintly_resource as resource;
    pub use faintly_template_core as template_core;
    pub use faintly_traits as traits;
}
