//! # Faintly Renderer
//!
//! Renders HTML templates driven by `data-fly-*` attributes. Each element
//! runs through a fixed directive pipeline:
//!
//! 1. `data-fly-test` / `data-fly-not`: keep or drop the element
//! 2. `data-fly-repeat`: clone the element per collection entry
//! 3. `data-fly-attributes` and `${...}` in attribute values
//! 4. `data-fly-content`: replace the children with a value
//! 5. `data-fly-include`: replace the children with another fragment
//! 6. `data-fly-unwrap`: mark the element to be replaced by its children
//!
//! Text nodes are interpolated as they are met. After a template has
//! rendered, unwrap markers are flattened and post-processors run.
//!
//! Expressions are resolved asynchronously, so context values may be
//! [`Resolver`](faintly_expr::Resolver)s that load data on demand.

pub mod builder;
pub mod config;
pub mod directive;
mod directive_handlers;
pub mod post_process;
pub mod renderer;
pub mod stage;
mod walker;

pub use builder::RendererBuilder;
pub use config::{DEFAULT_MAX_INCLUDE_DEPTH, RenderConfig};
pub use directive::{
    ATTRIBUTES, CONTENT, DEFAULT_REPEAT_NAME, INCLUDE, NOT, PREFIX, REPEAT, TEST, UNWRAP,
};
pub use post_process::{PostProcessor, WrapTextNodes, flatten_unwraps};
pub use renderer::Renderer;
pub use stage::{PIPELINE, Stage, StageOutcome};
