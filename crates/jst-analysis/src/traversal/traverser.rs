//! Depth-first, post-order traversal of a schema graph.
//!
//! Bookkeeping for one run:
//! - `ancestors`: identities on the current path. A child already on the
//!   path is a cycle back-edge and is pruned.
//! - `finished`: identities already handed to the mutator. A node reached
//!   again through another parent is not handed over twice.
//! - `claimed` (unique mode only): equivalence classes, computed over the
//!   graph as it was when the run started, that already have a node in
//!   progress or finished. A class is claimed when its first node is
//!   entered, so a later member is skipped together with its subtree even
//!   while the claiming node is still on the path.

use serde::Serialize;
use tracing::{debug, trace};

use jst_core::types::{FxHashMap, FxHashSet};

use crate::equivalence::{local_fingerprint, ClassId, EquivalenceClasses};
use crate::schema::{NodeId, SchemaGraph};

use super::ledger::Ledger;
use super::mutator::{Mutator, NodeMut};
use super::options::TraverseOptions;

/// Counters for one traversal run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TraversalStats {
    /// Node entries, including ones whose mutator call then failed.
    pub entered: usize,
    /// Successful mutator invocations.
    pub mutated: usize,
    pub cycles_pruned: usize,
    pub duplicates_skipped: usize,
    pub revisits_skipped: usize,
    pub max_depth: usize,
}

/// Outcome of a successful run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Traversal {
    pub ledger: Ledger,
    pub stats: TraversalStats,
}

impl Traversal {
    /// Number of mutator invocations.
    pub fn calls(&self) -> usize {
        self.ledger.len()
    }
}

/// Runs a [`Mutator`] over every logical node reachable from a root.
#[derive(Debug, Clone, Copy, Default)]
pub struct Traverser {
    options: TraverseOptions,
}

impl Traverser {
    pub fn new(options: TraverseOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> TraverseOptions {
        self.options
    }

    /// Walk the graph from `root`, children before parents, calling
    /// `mutator` once per logical node.
    ///
    /// The first mutator error aborts the walk and is returned as is.
    /// Mutations applied before it stay in the graph.
    ///
    /// # Panics
    /// Panics if `root` was not issued by `graph`.
    pub fn traverse<M: Mutator>(
        &self,
        graph: &mut SchemaGraph,
        root: NodeId,
        mutator: &mut M,
    ) -> Result<Traversal, M::Error> {
        let mut ledger = Ledger::new();
        let stats = self.traverse_into(graph, root, mutator, &mut ledger)?;
        Ok(Traversal { ledger, stats })
    }

    /// Same walk as [`traverse`](Self::traverse), recording into a caller
    /// owned ledger that stays readable after a failure.
    ///
    /// # Panics
    /// Panics if `root` was not issued by `graph`.
    pub fn traverse_into<M: Mutator>(
        &self,
        graph: &mut SchemaGraph,
        root: NodeId,
        mutator: &mut M,
        ledger: &mut Ledger,
    ) -> Result<TraversalStats, M::Error> {
        assert!(graph.contains(root), "traversal root {root} is not in the graph");

        let span = tracing::debug_span!(
            "traverse",
            root = %root,
            unique_only = self.options.unique_only,
        );
        let _guard = span.enter();

        let classes = self.options.unique_only.then(|| {
            let classes = EquivalenceClasses::reachable(graph, root);
            debug!(nodes = classes.nodes(), classes = classes.len(), "equivalence classes built");
            classes
        });

        let mut walk = Walk {
            graph,
            mutator,
            ledger,
            classes,
            ancestors: FxHashSet::default(),
            finished: FxHashSet::default(),
            claimed: FxHashMap::default(),
            depth: 0,
            stats: TraversalStats::default(),
        };
        walk.visit(root)?;

        let stats = walk.stats;
        debug!(
            entered = stats.entered,
            mutated = stats.mutated,
            cycles_pruned = stats.cycles_pruned,
            duplicates_skipped = stats.duplicates_skipped,
            revisits_skipped = stats.revisits_skipped,
            max_depth = stats.max_depth,
            "traversal complete"
        );
        Ok(stats)
    }
}

struct Walk<'a, M> {
    graph: &'a mut SchemaGraph,
    mutator: &'a mut M,
    ledger: &'a mut Ledger,
    classes: Option<EquivalenceClasses>,
    ancestors: FxHashSet<NodeId>,
    finished: FxHashSet<NodeId>,
    claimed: FxHashMap<ClassId, NodeId>,
    depth: usize,
    stats: TraversalStats,
}

impl<M: Mutator> Walk<'_, M> {
    fn class_of(&self, id: NodeId) -> Option<ClassId> {
        self.classes.as_ref().and_then(|classes| classes.class_of(id))
    }

    fn visit(&mut self, id: NodeId) -> Result<(), M::Error> {
        self.depth += 1;
        self.stats.entered += 1;
        self.stats.max_depth = self.stats.max_depth.max(self.depth);
        self.ancestors.insert(id);
        if let Some(class) = self.class_of(id) {
            self.claimed.entry(class).or_insert(id);
        }

        let result = self.descend(id).and_then(|()| self.apply(id));

        self.ancestors.remove(&id);
        self.depth -= 1;
        result
    }

    fn descend(&mut self, id: NodeId) -> Result<(), M::Error> {
        for edge in self.graph.edges(id) {
            let child = edge.target;
            if self.ancestors.contains(&child) {
                self.stats.cycles_pruned += 1;
                trace!(node = %id, child = %child, relation = %edge.relation, "cycle pruned");
                continue;
            }
            if self.finished.contains(&child) {
                self.stats.revisits_skipped += 1;
                trace!(node = %id, child = %child, relation = %edge.relation, "already visited");
                continue;
            }
            if let Some(class) = self.class_of(child) {
                if let Some(representative) = self.claimed.get(&class) {
                    self.stats.duplicates_skipped += 1;
                    trace!(
                        node = %child,
                        representative = %representative,
                        relation = %edge.relation,
                        "duplicate skipped"
                    );
                    continue;
                }
            }
            self.visit(child)?;
        }
        Ok(())
    }

    fn apply(&mut self, id: NodeId) -> Result<(), M::Error> {
        let depth = self.depth;
        let before = local_fingerprint(self.graph, id);
        if let Err(err) = self.mutator.on_schema(NodeMut::new(self.graph, id, depth)) {
            debug!(node = %id, depth, "mutator failed; aborting traversal");
            return Err(err);
        }
        let after = local_fingerprint(self.graph, id);

        self.ledger.record(id, depth, before, after);
        self.stats.mutated += 1;
        self.finished.insert(id);
        Ok(())
    }
}
