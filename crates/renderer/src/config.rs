use serde::{Deserialize, Serialize};

/// The include depth allowed unless configured otherwise.
pub const DEFAULT_MAX_INCLUDE_DEPTH: usize = 64;

/// Settings for a [`Renderer`](crate::Renderer).
///
/// Deserializes from camelCase JSON; missing fields keep their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RenderConfig {
    /// Used when the context carries no `codeBasePath`.
    pub code_base_path: String,
    /// How deeply `data-fly-include` may nest before rendering fails.
    pub max_include_depth: usize,
    /// Whether the built-in [`WrapTextNodes`](crate::WrapTextNodes)
    /// post-processor runs.
    pub wrap_text_nodes: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            code_base_path: String::new(),
            max_include_depth: DEFAULT_MAX_INCLUDE_DEPTH,
            wrap_text_nodes: true,
        }
    }
}
