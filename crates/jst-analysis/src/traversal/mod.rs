//! Post-order schema traversal with cycle breaking and optional structural
//! deduplication.

pub mod ledger;
pub mod mutator;
pub mod options;
pub mod traverser;

pub use ledger::{Ledger, LedgerEntry};
pub use mutator::{from_fn, noop, Deadline, FnMutator, Mutator, NodeMut, Noop};
pub use options::TraverseOptions;
pub use traverser::{Traversal, TraversalStats, Traverser};
