//! The render context passed down the template tree.

use crate::value::Value;
use faintly_dom::Node;
use indexmap::IndexMap;
use std::sync::Arc;

pub const BLOCK: &str = "block";
pub const BLOCK_NAME: &str = "blockName";
pub const CODE_BASE_PATH: &str = "codeBasePath";
pub const TEMPLATE: &str = "template";
pub const CURRENT_NODE: &str = "currentNode";

const TEMPLATE_PATH: &str = "path";
const TEMPLATE_NAME: &str = "name";

/// An ordered mapping of names to values.
///
/// Directives that open a scope (`repeat`, `include`) work on a clone, so
/// bindings they add never leak back out. Test results stored under a
/// qualified name are written to the context in place and stay visible to
/// the rest of the enclosing scope.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Context {
    entries: IndexMap<String, Value>,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.entries.insert(key.into(), value.into())
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.entries.shift_remove(key)
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The whole context as a map value, used as the receiver of resolvers
    /// stored at the top level.
    pub fn to_value(&self) -> Value {
        Value::from(self.entries.clone())
    }

    // --- Well-known entries ---

    pub fn block_name(&self) -> Option<&str> {
        self.get(BLOCK_NAME).and_then(Value::as_str)
    }

    pub fn code_base_path(&self) -> Option<&str> {
        self.get(CODE_BASE_PATH).and_then(Value::as_str)
    }

    pub fn template_path(&self) -> Option<&str> {
        self.template_field(TEMPLATE_PATH)
    }

    pub fn template_name(&self) -> Option<&str> {
        self.template_field(TEMPLATE_NAME)
    }

    fn template_field(&self, field: &str) -> Option<&str> {
        self.get(TEMPLATE)?
            .as_map()?
            .get(field)
            .and_then(Value::as_str)
    }

    /// Replaces the `template` entry with `{ path, name }`.
    pub fn set_template(&mut self, path: impl Into<String>, name: impl Into<String>) {
        let template: Value = [
            (TEMPLATE_PATH, Value::String(path.into())),
            (TEMPLATE_NAME, Value::String(name.into())),
        ]
        .into_iter()
        .collect();
        self.insert(TEMPLATE, template);
    }

    /// Stores the node being rendered. Scopes cloned from this context
    /// share it rather than copying it.
    pub fn set_current_node(&mut self, node: impl Into<Arc<Node>>) {
        self.insert(CURRENT_NODE, Value::Node(node.into()));
    }

    pub fn current_node(&self) -> Option<&Arc<Node>> {
        match self.get(CURRENT_NODE)? {
            Value::Node(node) => Some(node),
            _ => None,
        }
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Context {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Context {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl From<IndexMap<String, Value>> for Context {
    fn from(entries: IndexMap<String, Value>) -> Self {
        Context { entries }
    }
}

impl From<serde_json::Map<String, serde_json::Value>> for Context {
    fn from(map: serde_json::Map<String, serde_json::Value>) -> Self {
        map.into_iter().collect()
    }
}
