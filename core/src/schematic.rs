use crate::field::FieldName;
use crate::unit::UnitKind;
use serde::{Deserialize, Serialize};

/// The Static Analysis View of a Composer.
///
/// `Schematic` is the graph representation extracted from the Composer
/// builder. It is used for documentation and debugging; producing one never
/// runs a factory or the aggregator.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Schematic {
    pub name: String,
    pub field: FieldName,
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

impl Schematic {
    pub fn new(name: impl Into<String>, field: FieldName) -> Self {
        Self {
            name: name.into(),
            field,
            ..Default::default()
        }
    }

    /// Append a node, linking it from the previous one through `via`.
    pub fn push(&mut self, node: Node, via: Option<FieldName>) {
        if let Some(last) = self.nodes.last() {
            self.edges.push(Edge {
                from: last.id.clone(),
                to: node.id.clone(),
                label: via,
            });
        }
        self.nodes.push(node);
    }

    /// Number of producer nodes (excludes ingress and aggregator).
    pub fn producer_count(&self) -> usize {
        self.nodes
            .iter()
            .filter(|n| matches!(n.kind, NodeKind::Bound | NodeKind::Factory))
            .count()
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    pub id: String, // Uuid
    pub kind: NodeKind,
    pub label: String,
    pub position: Option<usize>,
    pub field: Option<FieldName>,
}

impl Node {
    pub fn new(kind: NodeKind, label: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            kind,
            label: label.into(),
            position: None,
            field: None,
        }
    }

    pub fn producer(kind: UnitKind, position: usize, field: FieldName) -> Self {
        let kind = match kind {
            UnitKind::Bound => NodeKind::Bound,
            UnitKind::Factory => NodeKind::Factory,
        };
        Self {
            position: Some(position),
            field: Some(field),
            ..Self::new(kind, format!("unit[{position}]"))
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeKind {
    Ingress,    // build() entry
    Bound,      // Pre-built producer
    Factory,    // Lazily built producer
    Aggregator, // Terminal function
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Edge {
    pub from: String,
    pub to: String,
    pub label: Option<FieldName>, // the continuation field control flows through
}
