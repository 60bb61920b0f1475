//! Labeled parent→child edges.

use std::fmt;

use super::graph::NodeId;

/// Which keyword (and key or position) links a parent to a child.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Relation {
    AnyOf(usize),
    AllOf(usize),
    OneOf(usize),
    /// Single-schema `items`.
    Items,
    /// Member of a tuple-form `items`.
    TupleItem(usize),
    Property(String),
}

impl fmt::Display for Relation {
    /// JSON-pointer style fragment, e.g. `anyOf/0` or `properties/foo`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AnyOf(i) => write!(f, "anyOf/{i}"),
            Self::AllOf(i) => write!(f, "allOf/{i}"),
            Self::OneOf(i) => write!(f, "oneOf/{i}"),
            Self::Items => f.write_str("items"),
            Self::TupleItem(i) => write!(f, "items/{i}"),
            Self::Property(name) => write!(f, "properties/{name}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    pub relation: Relation,
    pub target: NodeId,
}

impl Edge {
    pub fn new(relation: Relation, target: NodeId) -> Self {
        Self { relation, target }
    }
}
