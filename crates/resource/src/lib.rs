//! Template sources for the Faintly template engine.
//!
//! This crate provides platform-specific implementations of the
//! `TemplateSource` trait from faintly-traits.
//!
//! ## Available Sources
//!
//! - [`FilesystemTemplateSource`]: Reads templates under a root directory
//! - [`HttpTemplateSource`]: Fetches templates relative to a base URL
//!
//! ## Re-exports
//!
//! For convenience, we also re-export the in-memory source from faintly-traits:
//! - [`InMemoryTemplateSource`]: Pre-populated in-memory storage

mod filesystem;
mod http;

pub use filesystem::FilesystemTemplateSource;
pub use http::HttpTemplateSource;

pub use faintly_traits::InMemoryTemplateSource;
