//! Structural equivalence of schema nodes.
//!
//! Three facilities share one notion of "same content":
//! - [`EquivalenceChecker`]: cycle-guarded pairwise deep comparison.
//! - [`fingerprint`]: a content digest that equivalent nodes always share.
//! - [`EquivalenceClasses`]: reachable nodes grouped by fingerprint and
//!   confirmed with the checker, the basis of unique-mode deduplication.
//!
//! Both ignore storage identity and treat absent optional fields as equal to
//! explicitly empty ones.

pub mod checker;
pub mod classes;
pub mod fingerprint;

pub use checker::{equivalent, equivalent_across, EquivalenceChecker};
pub use classes::{ClassId, EquivalenceClasses};
pub use fingerprint::{fingerprint, local_fingerprint, Fingerprint, Fingerprinter, UNFOLD_DEPTH};

use crate::schema::Items;

/// `None` and `Some("")` are the same descriptive value.
pub(crate) fn text(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("")
}

/// An empty tuple is the same as absent `items`.
pub(crate) fn items(value: &Option<Items>) -> Option<&Items> {
    value.as_ref().filter(|items| !items.is_empty())
}
