//! The values a render context can hold.

use crate::resolver::Resolver;
use faintly_dom::{Element, Node};
use indexmap::IndexMap;
use itertools::Itertools;
use std::fmt;
use std::sync::Arc;

/// A context value.
///
/// `Null` stands in for both JSON `null` and "nothing there"; path
/// resolution treats it as absent.
///
/// Lists, maps and nodes sit behind an `Arc`. Contexts are cloned for every
/// scope and repeat item, and those clones share the data instead of
/// copying it.
#[derive(Debug, Clone, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    List(Arc<Vec<Value>>),
    Map(Arc<IndexMap<String, Value>>),
    Node(Arc<Node>),
    Nodes(Arc<Vec<Node>>),
    Resolver(Resolver),
}

/// Something `data-fly-repeat` can iterate.
#[derive(Debug, Clone, PartialEq)]
pub enum Collection {
    /// Lists and node lists; keys are the stringified positions.
    Indexed(Vec<Value>),
    /// Maps, iterated in insertion order.
    Keyed(Vec<(String, Value)>),
}

impl Collection {
    pub fn len(&self) -> usize {
        match self {
            Collection::Indexed(items) => items.len(),
            Collection::Keyed(entries) => entries.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Flattens the collection into `(key, item)` pairs in iteration order.
    pub fn into_entries(self) -> Vec<(String, Value)> {
        match self {
            Collection::Indexed(items) => items
                .into_iter()
                .enumerate()
                .map(|(i, item)| (i.to_string(), item))
                .collect(),
            Collection::Keyed(entries) => entries,
        }
    }
}

impl Value {
    pub fn is_absent(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Truthiness as the directives see it. Containers, nodes and
    /// resolvers are always truthy, even when empty.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Number(n) => *n != 0.0 && !n.is_nan(),
            Value::String(s) => !s.is_empty(),
            Value::List(_)
            | Value::Map(_)
            | Value::Node(_)
            | Value::Nodes(_)
            | Value::Resolver(_) => true,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&IndexMap<String, Value>> {
        match self {
            Value::Map(map) => Some(&**map),
            _ => None,
        }
    }

    pub fn as_resolver(&self) -> Option<&Resolver> {
        match self {
            Value::Resolver(r) => Some(r),
            _ => None,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::List(_) => "list",
            Value::Map(_) => "map",
            Value::Node(_) => "node",
            Value::Nodes(_) => "node list",
            Value::Resolver(_) => "resolver",
        }
    }

    /// Reads a member of this value by name.
    ///
    /// Maps are looked up by key. Lists, node lists and strings answer
    /// `length` and numeric indexes. Nodes expose a small DOM-like surface:
    /// `textContent`, `tagName`, `children`, `childNodes`,
    /// `firstElementChild`, `innerHTML`, `outerHTML` and `dataset`.
    pub fn member(&self, key: &str) -> Option<Value> {
        match self {
            Value::Map(map) => map.get(key).cloned(),
            Value::List(items) => match key {
                "length" => Some(Value::from(items.len())),
                _ => index(key).and_then(|i| items.get(i).cloned()),
            },
            Value::Nodes(nodes) => match key {
                "length" => Some(Value::from(nodes.len())),
                _ => index(key).and_then(|i| nodes.get(i).cloned().map(Value::from)),
            },
            Value::String(s) => match key {
                "length" => Some(Value::from(s.chars().count())),
                _ => index(key)
                    .and_then(|i| s.chars().nth(i))
                    .map(|ch| Value::String(ch.to_string())),
            },
            Value::Node(node) => node_member(node, key),
            _ => None,
        }
    }

    /// Converts the value into something `data-fly-repeat` can iterate.
    /// Scalars, strings and single nodes are not collections.
    pub fn into_collection(self) -> Option<Collection> {
        match self {
            Value::List(items) => Some(Collection::Indexed(Arc::unwrap_or_clone(items))),
            Value::Nodes(nodes) => Some(Collection::Indexed(
                nodes.iter().cloned().map(Value::from).collect(),
            )),
            Value::Map(map) => Some(Collection::Keyed(
                map.iter().map(|(k, v)| (k.clone(), v.clone())).collect(),
            )),
            _ => None,
        }
    }
}

fn index(key: &str) -> Option<usize> {
    if key.is_empty() || !key.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    key.parse().ok()
}

fn node_member(node: &Node, key: &str) -> Option<Value> {
    if key == "textContent" {
        return Some(Value::String(node.text_content()));
    }
    let el = node.as_element()?;
    match key {
        "tagName" => Some(Value::String(el.name.to_ascii_uppercase())),
        "children" => Some(Value::from(
            el.element_children()
                .cloned()
                .map(Node::Element)
                .collect::<Vec<_>>(),
        )),
        "childNodes" => Some(Value::from(el.children.clone())),
        "firstElementChild" => el.first_element_child().cloned().map(Value::from),
        "innerHTML" => Some(Value::String(el.inner_html())),
        "outerHTML" => Some(Value::String(el.to_html())),
        "dataset" => Some(Value::from(dataset(el))),
        _ => None,
    }
}

/// The `data-*` attributes of an element keyed the way the DOM's
/// `dataset` keys them (`data-block-name` becomes `blockName`).
fn dataset(el: &Element) -> IndexMap<String, Value> {
    el.attributes
        .iter()
        .filter_map(|attr| {
            let rest = attr.name.strip_prefix("data-")?;
            let mut key = String::with_capacity(rest.len());
            let mut upper = false;
            for ch in rest.chars() {
                if ch == '-' {
                    upper = true;
                } else if upper {
                    key.push(ch.to_ascii_uppercase());
                    upper = false;
                } else {
                    key.push(ch);
                }
            }
            Some((key, Value::String(attr.value.clone())))
        })
        .collect()
}

fn format_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        let sign = if n > 0.0 { "" } else { "-" };
        format!("{}Infinity", sign)
    } else if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

/// The text a value turns into when interpolated or written as content.
/// Absent values and resolvers produce nothing; lists are comma joined;
/// nodes produce their text content.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null | Value::Resolver(_) => Ok(()),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Number(n) => f.write_str(&format_number(*n)),
            Value::String(s) => f.write_str(s),
            Value::List(items) => write!(f, "{}", items.iter().join(",")),
            Value::Map(_) => f.write_str("[object Object]"),
            Value::Node(node) => f.write_str(&node.text_content()),
            Value::Nodes(nodes) => {
                write!(f, "{}", nodes.iter().map(Node::text_content).join(""))
            }
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Map(a), Value::Map(b)) => a == b,
            (Value::Node(a), Value::Node(b)) => a == b,
            (Value::Nodes(a), Value::Nodes(b)) => a == b,
            (Value::Resolver(a), Value::Resolver(b)) => a.ptr_eq(b),
            _ => false,
        }
    }
}

// --- Conversions ---

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n as f64)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(n.into())
    }
}

impl From<usize> for Value {
    fn from(n: usize) -> Self {
        Value::Number(n as f64)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(Arc::new(items))
    }
}

impl From<IndexMap<String, Value>> for Value {
    fn from(map: IndexMap<String, Value>) -> Self {
        Value::Map(Arc::new(map))
    }
}

impl From<Node> for Value {
    fn from(node: Node) -> Self {
        Value::Node(Arc::new(node))
    }
}

impl From<Arc<Node>> for Value {
    fn from(node: Arc<Node>) -> Self {
        Value::Node(node)
    }
}

impl From<Element> for Value {
    fn from(el: Element) -> Self {
        Value::from(Node::Element(el))
    }
}

impl From<Vec<Node>> for Value {
    fn from(nodes: Vec<Node>) -> Self {
        Value::Nodes(Arc::new(nodes))
    }
}

impl From<Resolver> for Value {
    fn from(resolver: Resolver) -> Self {
        Value::Resolver(resolver)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Value {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Value::Map(Arc::new(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        ))
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => Value::Number(n.as_f64().unwrap_or(f64::NAN)),
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::from(items.into_iter().map(Value::from).collect::<Vec<_>>())
            }
            serde_json::Value::Object(map) => Value::from(
                map.into_iter()
                    .map(|(k, v)| (k, Value::from(v)))
                    .collect::<IndexMap<_, _>>(),
            ),
        }
    }
}
