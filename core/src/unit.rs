//! ProducerUnit - One Step of a Chain
//!
//! A unit is either a node built up front or a factory that builds the node
//! when the chain reaches it, from the results produced before it.

use crate::results::ResultsSequence;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Lazily builds a bound node from the results accumulated so far.
pub type Factory<V, N> = Arc<dyn Fn(&ResultsSequence<V>) -> N + Send + Sync>;

pub enum ProducerUnit<V: Clone, N> {
    /// An externally constructed node, used as-is.
    Bound(N),
    /// Invoked once per traversal, at the moment the chain reaches it.
    Factory(Factory<V, N>),
}

/// Which variant a unit is, without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnitKind {
    Bound,
    Factory,
}

impl<V: Clone, N> ProducerUnit<V, N> {
    pub fn bound(node: N) -> Self {
        ProducerUnit::Bound(node)
    }

    pub fn factory<F>(f: F) -> Self
    where
        F: Fn(&ResultsSequence<V>) -> N + Send + Sync + 'static,
    {
        ProducerUnit::Factory(Arc::new(f))
    }

    pub fn kind(&self) -> UnitKind {
        match self {
            ProducerUnit::Bound(_) => UnitKind::Bound,
            ProducerUnit::Factory(_) => UnitKind::Factory,
        }
    }
}

impl<V: Clone, N: Clone> ProducerUnit<V, N> {
    /// Turn this unit into a bound node. Factories see exactly the results
    /// produced by the units before them.
    pub fn resolve(&self, accumulated: &ResultsSequence<V>) -> N {
        match self {
            ProducerUnit::Bound(node) => node.clone(),
            ProducerUnit::Factory(factory) => factory(accumulated),
        }
    }
}

impl<V: Clone, N: Clone> Clone for ProducerUnit<V, N> {
    fn clone(&self) -> Self {
        match self {
            ProducerUnit::Bound(node) => ProducerUnit::Bound(node.clone()),
            ProducerUnit::Factory(factory) => ProducerUnit::Factory(Arc::clone(factory)),
        }
    }
}

impl<V: Clone, N: fmt::Debug> fmt::Debug for ProducerUnit<V, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProducerUnit::Bound(node) => f.debug_tuple("Bound").field(node).finish(),
            ProducerUnit::Factory(_) => f.write_str("Factory(..)"),
        }
    }
}
