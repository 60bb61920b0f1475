//! The schema node and its child relations.

use std::collections::BTreeMap;

use jst_core::types::SmallVec8;

use super::graph::NodeId;
use super::relation::{Edge, Relation};

/// `items` holds either one schema for every element or a positional tuple.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Items {
    Single(NodeId),
    Tuple(Vec<NodeId>),
}

impl Items {
    /// Number of schemas held.
    pub fn len(&self) -> usize {
        match self {
            Self::Single(_) => 1,
            Self::Tuple(ids) => ids.len(),
        }
    }

    /// An empty tuple is indistinguishable from absent `items`.
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Tuple(ids) if ids.is_empty())
    }
}

/// One schema object.
///
/// Graph shape lives in `properties`, `items`, `any_of`, `all_of` and
/// `one_of`. Everything else is descriptive and never followed.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    pub title: Option<String>,
    pub description: Option<String>,
    /// The `type` keyword; a single type is a one-element vector.
    pub types: Vec<String>,
    pub properties: BTreeMap<String, NodeId>,
    pub items: Option<Items>,
    pub any_of: Vec<NodeId>,
    pub all_of: Vec<NodeId>,
    pub one_of: Vec<NodeId>,
    /// Keywords with no graph meaning, kept verbatim.
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    pub fn with_type(mut self, ty: impl Into<String>) -> Self {
        self.types.push(ty.into());
        self
    }

    pub fn with_property(mut self, name: impl Into<String>, child: NodeId) -> Self {
        self.properties.insert(name.into(), child);
        self
    }

    pub fn with_items(mut self, items: Items) -> Self {
        self.items = Some(items);
        self
    }

    pub fn with_any_of(mut self, child: NodeId) -> Self {
        self.any_of.push(child);
        self
    }

    pub fn with_all_of(mut self, child: NodeId) -> Self {
        self.all_of.push(child);
        self
    }

    pub fn with_one_of(mut self, child: NodeId) -> Self {
        self.one_of.push(child);
        self
    }

    /// Outgoing edges in traversal order: `anyOf`, `allOf`, `oneOf`,
    /// `items`, then `properties` by sorted key.
    pub fn edges(&self) -> SmallVec8<Edge> {
        let mut edges = SmallVec8::new();
        let groups: [(&Vec<NodeId>, fn(usize) -> Relation); 3] = [
            (&self.any_of, Relation::AnyOf),
            (&self.all_of, Relation::AllOf),
            (&self.one_of, Relation::OneOf),
        ];
        for (members, relation) in groups {
            edges.extend(
                members
                    .iter()
                    .enumerate()
                    .map(|(i, &target)| Edge::new(relation(i), target)),
            );
        }

        match &self.items {
            Some(Items::Single(target)) => edges.push(Edge::new(Relation::Items, *target)),
            // A one-element tuple is content only; it contributes no edge.
            Some(Items::Tuple(members)) if members.len() > 1 => {
                edges.extend(
                    members
                        .iter()
                        .enumerate()
                        .map(|(i, &target)| Edge::new(Relation::TupleItem(i), target)),
                );
            }
            _ => {}
        }

        edges.extend(
            self.properties
                .iter()
                .map(|(name, &target)| Edge::new(Relation::Property(name.clone()), target)),
        );
        edges
    }
}
