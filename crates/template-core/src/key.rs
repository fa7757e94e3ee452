//! Template addressing.

use crate::error::TemplateError;
use faintly_expr::Context;

const TEMPLATE_ID_PREFIX: &str = "faintly-template-";

/// Derives the cache identifier of the fragment `name` in the file `path`.
///
/// The id is `faintly-template-<path>#<name>`, lower-cased, with every
/// character outside `[0-9a-z]` replaced by `-`. Characters outside the
/// basic multilingual plane become two dashes, one per UTF-16 unit.
pub fn template_id(path: &str, name: &str) -> String {
    let raw = format!("{}{}#{}", TEMPLATE_ID_PREFIX, path, name).to_lowercase();
    let mut id = String::with_capacity(raw.len());
    for ch in raw.chars() {
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() {
            id.push(ch);
        } else {
            id.extend(std::iter::repeat_n('-', ch.len_utf16()));
        }
    }
    id
}

/// The file a block's templates live in when no path is given.
pub fn default_template_path(code_base_path: &str, block_name: &str) -> String {
    format!("{}/blocks/{}/{}.html", code_base_path, block_name, block_name)
}

/// Identifies one fragment: a file path plus the fragment's `data-fly-name`
/// (empty for the file's default fragment).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TemplateKey {
    pub path: String,
    pub name: String,
}

impl TemplateKey {
    pub fn new(path: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            name: name.into(),
        }
    }

    pub fn id(&self) -> String {
        template_id(&self.path, &self.name)
    }

    /// Reads the key from `template.path` / `template.name` in the context.
    ///
    /// A missing or empty path falls back to the block's default file under
    /// `codeBasePath` (or `default_code_base_path` when the context has
    /// none), which needs a `blockName`.
    pub fn from_context(
        context: &Context,
        default_code_base_path: &str,
    ) -> Result<Self, TemplateError> {
        let name = context.template_name().unwrap_or_default();
        if let Some(path) = context.template_path().filter(|p| !p.is_empty()) {
            return Ok(Self::new(path, name));
        }

        let block_name = context
            .block_name()
            .ok_or(TemplateError::MissingBlockName)?;
        let code_base_path = context
            .code_base_path()
            .unwrap_or(default_code_base_path);
        Ok(Self::new(
            default_template_path(code_base_path, block_name),
            name,
        ))
    }
}
