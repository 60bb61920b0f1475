//! Arena holding every schema node of one document graph.

use std::fmt;
use std::ops::{Index, IndexMut};

use jst_core::types::SmallVec8;
use serde::{Deserialize, Serialize};

use super::node::Schema;
use super::relation::Edge;

/// Stable identity of one schema node instance.
///
/// Ids are issued by [`SchemaGraph::add`] and never reused, so identity is
/// independent of content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(u32);

impl NodeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }

    pub fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Owner of all nodes in a schema document graph.
///
/// Nodes are only ever appended. Cycles and shared subtrees are expressed by
/// storing the same [`NodeId`] in more than one relation.
#[derive(Debug, Clone, Default)]
pub struct SchemaGraph {
    nodes: Vec<Schema>,
}

impl SchemaGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a node and return its identity.
    ///
    /// # Panics
    /// Panics if the graph already holds `u32::MAX` nodes.
    pub fn add(&mut self, schema: Schema) -> NodeId {
        let id = u32::try_from(self.nodes.len()).expect("schema graph exceeds u32::MAX nodes");
        self.nodes.push(schema);
        NodeId(id)
    }

    pub fn get(&self, id: NodeId) -> Option<&Schema> {
        self.nodes.get(id.index())
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Schema> {
        self.nodes.get_mut(id.index())
    }

    pub fn contains(&self, id: NodeId) -> bool {
        id.index() < self.nodes.len()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All issued ids, in allocation order.
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.nodes.len()).map(|i| NodeId(i as u32))
    }

    /// Outgoing edges of `id` in traversal order; empty for an unknown id.
    pub fn edges(&self, id: NodeId) -> SmallVec8<Edge> {
        self.get(id).map(Schema::edges).unwrap_or_default()
    }
}

impl Index<NodeId> for SchemaGraph {
    type Output = Schema;

    fn index(&self, id: NodeId) -> &Schema {
        &self.nodes[id.index()]
    }
}

impl IndexMut<NodeId> for SchemaGraph {
    fn index_mut(&mut self, id: NodeId) -> &mut Schema {
        &mut self.nodes[id.index()]
    }
}
