//! Cycle-guarded deep comparison.

use std::collections::BTreeMap;

use jst_core::types::FxHashSet;

use crate::schema::{Items, NodeId, Schema, SchemaGraph};

/// Compares nodes by content, recursing through every relation.
///
/// Each pair of nodes met during one comparison is assumed equal while its
/// own fields are checked. Meeting an assumed pair again closes a cycle on
/// both sides, and that branch is taken as equal. Any mismatch makes the
/// whole comparison false, so a true answer means the assumed pairs form a
/// bisimulation. Those pairs are kept as proven for later calls on the same
/// checker, and every pair is examined at most once per call, so shared
/// subtrees cost linear time.
#[derive(Debug)]
pub struct EquivalenceChecker<'a> {
    left: &'a SchemaGraph,
    right: &'a SchemaGraph,
    assumed: FxHashSet<(NodeId, NodeId)>,
    proven: FxHashSet<(NodeId, NodeId)>,
}

impl<'a> EquivalenceChecker<'a> {
    pub fn new(left: &'a SchemaGraph, right: &'a SchemaGraph) -> Self {
        Self {
            left,
            right,
            assumed: FxHashSet::default(),
            proven: FxHashSet::default(),
        }
    }

    /// Checker for two nodes of the same graph.
    pub fn within(graph: &'a SchemaGraph) -> Self {
        Self::new(graph, graph)
    }

    /// Whether `a` (in the left graph) and `b` (in the right graph) have the
    /// same content. Ids unknown to their graph are never equivalent.
    ///
    /// Both graphs must stay unchanged for the life of the checker.
    pub fn equivalent(&mut self, a: NodeId, b: NodeId) -> bool {
        let same = self.compare(a, b);
        if same {
            self.proven.extend(self.assumed.drain());
        } else {
            self.assumed.clear();
        }
        same
    }

    fn compare(&mut self, a: NodeId, b: NodeId) -> bool {
        if a == b && std::ptr::eq(self.left, self.right) {
            return true;
        }
        if self.proven.contains(&(a, b)) || !self.assumed.insert((a, b)) {
            return true;
        }

        let (left, right) = (self.left, self.right);
        let (Some(sa), Some(sb)) = (left.get(a), right.get(b)) else {
            return false;
        };
        self.schemas(sa, sb)
    }

    fn schemas(&mut self, a: &Schema, b: &Schema) -> bool {
        super::text(&a.title) == super::text(&b.title)
            && super::text(&a.description) == super::text(&b.description)
            && a.types == b.types
            && a.extra == b.extra
            && self.maps(&a.properties, &b.properties)
            && self.items(&a.items, &b.items)
            && self.lists(&a.any_of, &b.any_of)
            && self.lists(&a.all_of, &b.all_of)
            && self.lists(&a.one_of, &b.one_of)
    }

    fn maps(&mut self, a: &BTreeMap<String, NodeId>, b: &BTreeMap<String, NodeId>) -> bool {
        a.len() == b.len()
            && a
                .iter()
                .all(|(name, &x)| b.get(name).is_some_and(|&y| self.compare(x, y)))
    }

    fn lists(&mut self, a: &[NodeId], b: &[NodeId]) -> bool {
        a.len() == b.len() && a.iter().zip(b).all(|(&x, &y)| self.compare(x, y))
    }

    fn items(&mut self, a: &Option<Items>, b: &Option<Items>) -> bool {
        match (super::items(a), super::items(b)) {
            (None, None) => true,
            (Some(Items::Single(x)), Some(Items::Single(y))) => self.compare(*x, *y),
            (Some(Items::Tuple(xs)), Some(Items::Tuple(ys))) => self.lists(xs, ys),
            _ => false,
        }
    }
}

/// Deep structural equality of two nodes of one graph.
pub fn equivalent(graph: &SchemaGraph, a: NodeId, b: NodeId) -> bool {
    EquivalenceChecker::within(graph).equivalent(a, b)
}

/// Deep structural equality of nodes living in different graphs.
pub fn equivalent_across(left: &SchemaGraph, a: NodeId, right: &SchemaGraph, b: NodeId) -> bool {
    EquivalenceChecker::new(left, right).equivalent(a, b)
}
