//! Partition of a graph's reachable nodes into equivalence classes.

use jst_core::types::{FxHashMap, FxHashSet, SmallVec};

use crate::schema::{NodeId, SchemaGraph};

use super::{EquivalenceChecker, Fingerprint, Fingerprinter};

/// Dense identifier of one equivalence class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClassId(u32);

/// Class of every node reachable from a root, as of construction time.
///
/// Nodes are bucketed by [`Fingerprint`], then each one is compared with the
/// first member of every class already in its bucket. Fingerprints of
/// equivalent nodes always agree, so the checker has the final word.
#[derive(Debug, Clone, Default)]
pub struct EquivalenceClasses {
    class_of: FxHashMap<NodeId, ClassId>,
    count: u32,
}

impl EquivalenceClasses {
    /// Classify every node reachable from `root` through traversal edges.
    pub fn reachable(graph: &SchemaGraph, root: NodeId) -> Self {
        let mut fingerprints = Fingerprinter::new(graph);
        let mut checker = EquivalenceChecker::within(graph);
        let mut buckets: FxHashMap<Fingerprint, SmallVec<[(NodeId, ClassId); 1]>> =
            FxHashMap::default();
        let mut classes = Self::default();
        let mut seen = FxHashSet::default();
        let mut pending = vec![root];

        while let Some(id) = pending.pop() {
            if !graph.contains(id) || !seen.insert(id) {
                continue;
            }
            let bucket = buckets.entry(fingerprints.fingerprint(id)).or_default();
            let found = bucket
                .iter()
                .find(|&&(first, _)| checker.equivalent(first, id))
                .map(|&(_, class)| class);
            let class = match found {
                Some(class) => class,
                None => {
                    let class = ClassId(classes.count);
                    classes.count += 1;
                    bucket.push((id, class));
                    class
                }
            };
            classes.class_of.insert(id, class);
            pending.extend(graph.edges(id).into_iter().map(|edge| edge.target));
        }
        classes
    }

    pub fn class_of(&self, id: NodeId) -> Option<ClassId> {
        self.class_of.get(&id).copied()
    }

    /// Whether both nodes were classified and share a class.
    pub fn same_class(&self, a: NodeId, b: NodeId) -> bool {
        matches!((self.class_of(a), self.class_of(b)), (Some(x), Some(y)) if x == y)
    }

    /// Number of distinct classes.
    pub fn len(&self) -> usize {
        self.count as usize
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Number of classified nodes.
    pub fn nodes(&self) -> usize {
        self.class_of.len()
    }
}
