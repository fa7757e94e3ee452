//! Functions stored in a context.
//!
//! When path resolution reaches a resolver it calls it with the value the
//! resolver was read from and a copy of the current context, awaits the
//! result and continues walking the path from there.

use crate::context::Context;
use crate::value::Value;
use futures::FutureExt;
use futures::future::BoxFuture;
use std::fmt;
use std::future::Future;
use std::sync::Arc;

/// What a resolver is called with.
#[derive(Debug, Clone)]
pub struct Invocation {
    /// The value the resolver was read from. For a resolver stored at the
    /// top level of the context this is the whole context as a map.
    pub receiver: Value,
    pub context: Context,
}

type ResolverFn = dyn Fn(Invocation) -> BoxFuture<'static, Value> + Send + Sync;

/// A shareable, possibly asynchronous function from an [`Invocation`] to a
/// [`Value`].
#[derive(Clone)]
pub struct Resolver(Arc<ResolverFn>);

impl Resolver {
    /// Wraps an async function.
    pub fn new<F, Fut>(f: F) -> Self
    where
        F: Fn(Invocation) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Value> + Send + 'static,
    {
        Resolver(Arc::new(move |invocation| f(invocation).boxed()))
    }

    /// Wraps a function that produces its value immediately.
    pub fn sync<F>(f: F) -> Self
    where
        F: Fn(Invocation) -> Value + Send + Sync + 'static,
    {
        Resolver(Arc::new(move |invocation| {
            futures::future::ready(f(invocation)).boxed()
        }))
    }

    /// A resolver that ignores its invocation and returns `value`.
    pub fn constant(value: impl Into<Value>) -> Self {
        let value = value.into();
        Self::sync(move |_| value.clone())
    }

    pub async fn invoke(&self, invocation: Invocation) -> Value {
        (self.0)(invocation).await
    }

    /// True if both handles point at the same function.
    pub fn ptr_eq(&self, other: &Resolver) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Resolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Resolver(..)")
    }
}
