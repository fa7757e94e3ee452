//! Asynchronous evaluation of property paths and interpolated strings.

use crate::ast::{PropertyPath, TextSegment};
use crate::context::Context;
use crate::parser::parse_interpolation;
use crate::resolver::{Invocation, Resolver};
use crate::value::Value;
use futures::future::join_all;
use log::trace;

/// The result of interpolating a string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interpolated {
    /// False when the string contained no placeholders; `text` is then the
    /// input unchanged and callers should leave the original alone.
    pub updated: bool,
    pub text: String,
}

/// Resolves a dotted expression against `context`.
pub async fn resolve_expression(expression: &str, context: &Context) -> Option<Value> {
    resolve_path(&PropertyPath::parse(expression), context).await
}

/// Walks `path` segment by segment.
///
/// Returns `None` as soon as a segment is missing or a value along the way
/// is null. Resolvers met on the way are invoked with their receiver and a
/// copy of the context, and the walk continues from their result.
pub async fn resolve_path(path: &PropertyPath, context: &Context) -> Option<Value> {
    let mut segments = path.segments.iter();
    let first = segments.next()?;

    let mut value = match context.get(first)? {
        Value::Resolver(resolver) => invoke(resolver, context.to_value(), context).await,
        other => other.clone(),
    };

    for segment in segments {
        if value.is_absent() {
            return None;
        }
        value = match value.member(segment)? {
            Value::Resolver(resolver) => invoke(&resolver, value, context).await,
            other => other,
        };
    }

    if value.is_absent() { None } else { Some(value) }
}

async fn invoke(resolver: &Resolver, receiver: Value, context: &Context) -> Value {
    resolver
        .invoke(Invocation {
            receiver,
            context: context.clone(),
        })
        .await
}

/// Replaces every `${...}` placeholder in `text`.
///
/// All placeholders are resolved concurrently and substituted back in
/// their original order. An escaped `\${...}` is emitted literally without
/// its backslash.
///
/// A missing or null value interpolates as empty text, not as the word
/// `undefined` a JavaScript template literal would print. The string still
/// counts as updated.
pub async fn resolve_expressions(text: &str, context: &Context) -> Interpolated {
    let interpolation = parse_interpolation(text);
    if !interpolation.has_placeholders() {
        return Interpolated {
            updated: false,
            text: text.to_string(),
        };
    }

    let resolved = join_all(
        interpolation
            .expressions()
            .map(|path| resolve_path(path, context)),
    )
    .await;
    trace!("Interpolating {} expression(s) in {:?}", resolved.len(), text);

    let mut values = resolved.into_iter();
    let mut out = String::with_capacity(text.len());
    for segment in &interpolation.segments {
        match segment {
            TextSegment::Literal(literal) | TextSegment::Escaped(literal) => out.push_str(literal),
            TextSegment::Expression(_) => {
                if let Some(Some(value)) = values.next() {
                    out.push_str(&value.to_string());
                }
            }
        }
    }

    Interpolated {
        updated: true,
        text: out,
    }
}
