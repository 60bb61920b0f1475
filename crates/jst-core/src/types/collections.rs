//! Re-exports of performance-oriented collection types.

pub use rustc_hash::{FxHashMap, FxHashSet};
pub use smallvec::SmallVec;

/// SmallVec sized for a schema node's outgoing edges (usually <8).
pub type SmallVec8<T> = SmallVec<[T; 8]>;
