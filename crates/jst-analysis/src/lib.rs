//! # jst-analysis
//!
//! Traversal engine for recursive JSON-schema graphs.
//!
//! A [`SchemaGraph`] owns every node of a document; nodes reference each
//! other by [`NodeId`], so cycles and shared subtrees are ordinary. The
//! [`Traverser`] walks a graph post-order, breaks cycles, optionally
//! collapses structurally equivalent nodes, and hands each logical node to a
//! caller-supplied [`Mutator`].

pub mod equivalence;
pub mod schema;
pub mod traversal;

pub use equivalence::{
    equivalent, equivalent_across, fingerprint, local_fingerprint, ClassId, EquivalenceChecker,
    EquivalenceClasses, Fingerprint, Fingerprinter,
};
pub use schema::{Edge, Items, NodeId, Relation, Schema, SchemaGraph};
pub use traversal::{
    from_fn, noop, Deadline, Ledger, LedgerEntry, Mutator, NodeMut, Traversal, TraversalStats,
    TraverseOptions, Traverser,
};
