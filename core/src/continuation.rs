//! Continuation - The Callback a Producer Invokes
//!
//! A continuation is the only suspension point of a chain: the producer
//! calls it now, later, more than once or never. Each call builds the rest
//! of the chain from the results accumulated up to that producer.

use crate::field::FieldName;
use crate::results::ContinuationArgs;
use std::fmt;
use std::sync::Arc;

/// Cheaply cloneable callable handed to a producer under its field name.
pub struct Continuation<V, N> {
    inner: Arc<dyn Fn(ContinuationArgs<V>) -> N + Send + Sync>,
}

impl<V, N> Continuation<V, N> {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(ContinuationArgs<V>) -> N + Send + Sync + 'static,
    {
        Self { inner: Arc::new(f) }
    }

    /// Resume the chain with the given arguments.
    pub fn call(&self, args: impl Into<ContinuationArgs<V>>) -> N {
        (self.inner)(args.into())
    }

    /// Resume the chain with a single argument.
    pub fn call_one(&self, value: V) -> N {
        (self.inner)(ContinuationArgs::one(value))
    }

    /// True when both handles point at the same continuation.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl<V, N> Clone for Continuation<V, N> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<V, N> fmt::Debug for Continuation<V, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Continuation").finish_non_exhaustive()
    }
}

/// Renderer capability: decorate a node with a named continuation.
///
/// Implementations must clone-and-extend. The receiver stays as it was so a
/// bound node can be reused by later traversals.
pub trait Attach<V>: Sized {
    fn attach(&self, field: &FieldName, continuation: Continuation<V, Self>) -> Self;
}
