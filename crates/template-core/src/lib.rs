//! Template identification, parsing and caching.
//!
//! A template file is an HTML document holding one or more `<template>`
//! elements, each optionally named with `data-fly-name`. Files are fetched
//! through a [`TemplateSource`](faintly_traits::TemplateSource), parsed
//! once, and every fragment is cached under an id derived from its file
//! path and name.
//!
//! ## Key Abstractions
//!
//! - **`TemplateKey`**: a (path, name) pair and its derived id
//! - **`Template`**: an immutable parsed fragment
//! - **`TemplateCache`**: shared, never-evicting storage with per-path fetch locks
//! - **`TemplateResolver`**: cache-then-fetch lookup

pub mod cache;
pub mod error;
pub mod key;
pub mod resolver;
pub mod template;

pub use cache::TemplateCache;
pub use error::TemplateError;
pub use key::{TemplateKey, default_template_path, template_id};
pub use resolver::TemplateResolver;
pub use template::{NAME_ATTRIBUTE, Template, parse_template_file};
