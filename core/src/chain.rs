//! # Chain: Sequential Continuation Aggregation
//!
//! A `Composer` turns an ordered list of producer units into one nested
//! chain. Node *i* wraps unit *i*; when unit *i* fires its continuation the
//! chain for units *i+1..n* is built on the spot, and after the last unit the
//! aggregator receives every result in unit order.
//!
//! ## Design Philosophy
//!
//! * **Nothing runs ahead**: unit *i+1* is not resolved until unit *i* has
//!   called back. Factories can therefore depend on earlier results.
//! * **Append, never mutate**: every continuation owns its own prefix. A
//!   unit calling back twice starts two independent downstream chains.
//! * **Fresh per build**: no chain node survives from one `build` to the next.
//!
//! ## Example
//!
//! ```rust,ignore
//! let root = Composer::new()
//!     .bound(echo("spaghetti"))
//!     .factory(|results| echo_after(results))
//!     .aggregator(|results| summary(results))
//!     .build();
//! ```

use crate::config::ComposerConfig;
use crate::continuation::{Attach, Continuation};
use crate::field::FieldName;
use crate::results::{ContinuationArgs, Mapper, Produced, ResultsSequence};
use crate::schematic::{Node, NodeKind, Schematic};
use crate::unit::ProducerUnit;
use std::sync::Arc;

/// The terminal function receiving the complete, ordered results.
pub type Aggregator<V, N> = Arc<dyn Fn(ResultsSequence<V>) -> N + Send + Sync>;

/// A unit plus the field its continuation is attached under, when it differs
/// from the composer-wide one.
struct Slot<V: Clone, N> {
    unit: ProducerUnit<V, N>,
    field: Option<FieldName>,
}

impl<V: Clone, N: Clone> Clone for Slot<V, N> {
    fn clone(&self) -> Self {
        Self {
            unit: self.unit.clone(),
            field: self.field.clone(),
        }
    }
}

/// Everything a traversal needs, shared by all continuations of one build.
struct Plan<V: Clone, N> {
    name: String,
    slots: Vec<Slot<V, N>>,
    aggregator: Aggregator<V, N>,
    field: FieldName,
    mapper: Option<Mapper<V>>,
    /// The `Chain` span of the build; continuations re-enter it when they fire.
    span: tracing::Span,
}

/// Build the chain for the units from `position` on, given the results of
/// every unit before it.
fn advance<V, N>(plan: &Arc<Plan<V, N>>, position: usize, accumulated: ResultsSequence<V>) -> N
where
    V: Clone + Send + Sync + 'static,
    N: Attach<V> + Clone + Send + Sync + 'static,
{
    let Some(slot) = plan.slots.get(position) else {
        tracing::debug!(
            cascade.composer = %plan.name,
            results = accumulated.len(),
            "Invoking aggregator"
        );
        return (plan.aggregator)(accumulated);
    };

    let node = slot.unit.resolve(&accumulated);
    let field = slot.field.as_ref().unwrap_or(&plan.field);
    tracing::trace!(
        cascade.composer = %plan.name,
        position,
        kind = ?slot.unit.kind(),
        field = %field,
        "Resolved producer unit"
    );

    let next = Arc::clone(plan);
    let continuation = Continuation::new(move |args: ContinuationArgs<V>| {
        next.span.in_scope(|| {
            let arity = args.len();
            let result = match &next.mapper {
                Some(mapper) => mapper(args),
                None => Produced::from_args(args),
            };
            tracing::trace!(cascade.composer = %next.name, position, arity, "Continuation fired");
            advance(&next, position + 1, accumulated.appended(result))
        })
    });

    node.attach(field, continuation)
}

/// Build a chain directly from its parts.
///
/// Returns `None` only when `aggregator` is absent: a composer without an
/// aggregator has nothing observable to produce.
pub fn compose<V, N, I>(
    units: I,
    aggregator: Option<Aggregator<V, N>>,
    field: FieldName,
    mapper: Option<Mapper<V>>,
) -> Option<N>
where
    V: Clone + Send + Sync + 'static,
    N: Attach<V> + Clone + Send + Sync + 'static,
    I: IntoIterator<Item = ProducerUnit<V, N>>,
{
    let mut composer = Composer::new().field(field).units(units);
    composer.aggregator = aggregator;
    composer.mapper = mapper;
    composer.build()
}

/// Builder for a continuation chain.
///
/// The composer itself is plain configuration; [`Composer::build`] can be
/// called any number of times and each call produces a brand-new chain.
pub struct Composer<V: Clone, N> {
    name: String,
    slots: Vec<Slot<V, N>>,
    aggregator: Option<Aggregator<V, N>>,
    field: FieldName,
    mapper: Option<Mapper<V>>,
}

impl<V, N> Default for Composer<V, N>
where
    V: Clone + Send + Sync + 'static,
    N: Attach<V> + Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<V, N> Composer<V, N>
where
    V: Clone + Send + Sync + 'static,
    N: Attach<V> + Clone + Send + Sync + 'static,
{
    pub fn new() -> Self {
        Self::from_config(&ComposerConfig::default())
    }

    pub fn from_config(config: &ComposerConfig) -> Self {
        Self {
            name: config.name.clone(),
            slots: Vec::new(),
            aggregator: None,
            field: config.continuation_field.clone(),
            mapper: None,
        }
    }

    /// Label used in spans and schematics.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Field name every continuation is attached under (unless overridden
    /// per unit).
    pub fn field(mut self, field: impl Into<FieldName>) -> Self {
        self.field = field.into();
        self
    }

    /// Replace the default collapse rule for continuation arguments.
    pub fn mapper<F>(mut self, mapper: F) -> Self
    where
        F: Fn(ContinuationArgs<V>) -> Produced<V> + Send + Sync + 'static,
    {
        self.mapper = Some(Arc::new(mapper));
        self
    }

    pub fn unit(mut self, unit: ProducerUnit<V, N>) -> Self {
        self.slots.push(Slot { unit, field: None });
        self
    }

    /// Add a unit whose continuation is attached under `field` instead of the
    /// composer-wide name.
    pub fn unit_with_field(mut self, unit: ProducerUnit<V, N>, field: impl Into<FieldName>) -> Self {
        self.slots.push(Slot {
            unit,
            field: Some(field.into()),
        });
        self
    }

    pub fn units<I>(mut self, units: I) -> Self
    where
        I: IntoIterator<Item = ProducerUnit<V, N>>,
    {
        self.slots
            .extend(units.into_iter().map(|unit| Slot { unit, field: None }));
        self
    }

    pub fn bound(self, node: N) -> Self {
        self.unit(ProducerUnit::Bound(node))
    }

    pub fn factory<F>(self, factory: F) -> Self
    where
        F: Fn(&ResultsSequence<V>) -> N + Send + Sync + 'static,
    {
        self.unit(ProducerUnit::factory(factory))
    }

    pub fn aggregator<F>(mut self, aggregator: F) -> Self
    where
        F: Fn(ResultsSequence<V>) -> N + Send + Sync + 'static,
    {
        self.aggregator = Some(Arc::new(aggregator));
        self
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn has_aggregator(&self) -> bool {
        self.aggregator.is_some()
    }

    /// Build a fresh chain and return its root node.
    ///
    /// With no units the aggregator runs immediately on an empty sequence and
    /// its output is returned. Without an aggregator nothing is built.
    pub fn build(&self) -> Option<N> {
        let span = tracing::debug_span!(
            "Chain",
            cascade.composer = %self.name,
            cascade.units = self.slots.len(),
            cascade.field = %self.field
        );
        let _enter = span.enter();

        let Some(aggregator) = self.aggregator.clone() else {
            tracing::debug!("No aggregator configured; chain produces nothing");
            return None;
        };

        let plan = Arc::new(Plan {
            name: self.name.clone(),
            slots: self.slots.clone(),
            aggregator,
            field: self.field.clone(),
            mapper: self.mapper.clone(),
            span: span.clone(),
        });

        Some(advance(&plan, 0, ResultsSequence::new()))
    }

    /// Describe the chain without running any of it.
    pub fn schematic(&self) -> Schematic {
        let mut schematic = Schematic::new(self.name.clone(), self.field.clone());
        schematic.push(Node::new(NodeKind::Ingress, self.name.clone()), None);

        let mut via = None;
        for (position, slot) in self.slots.iter().enumerate() {
            let field = slot.field.clone().unwrap_or_else(|| self.field.clone());
            schematic.push(
                Node::producer(slot.unit.kind(), position, field.clone()),
                via.take(),
            );
            via = Some(field);
        }

        if self.aggregator.is_some() {
            schematic.push(Node::new(NodeKind::Aggregator, "aggregator"), via);
        }
        schematic
    }
}
