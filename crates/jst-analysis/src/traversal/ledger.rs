//! Ordered record of mutator invocations.

use serde::Serialize;

use crate::equivalence::Fingerprint;
use crate::schema::NodeId;

/// One mutator invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LedgerEntry {
    /// 0-based invocation index within the run.
    pub sequence: usize,
    pub node: NodeId,
    pub depth: usize,
    /// Local fingerprint (own fields and child links) before the callback ran.
    pub before: Fingerprint,
    /// Local fingerprint after the callback returned.
    pub after: Fingerprint,
}

impl LedgerEntry {
    pub fn changed(&self) -> bool {
        self.before != self.after
    }
}

/// Invocation log of one traversal, in call order.
///
/// Only successful invocations are recorded, so after a failed run the
/// ledger stops just short of the failing call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Ledger {
    entries: Vec<LedgerEntry>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record(
        &mut self,
        node: NodeId,
        depth: usize,
        before: Fingerprint,
        after: Fingerprint,
    ) {
        let sequence = self.entries.len();
        self.entries.push(LedgerEntry {
            sequence,
            node,
            depth,
            before,
            after,
        });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[LedgerEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, LedgerEntry> {
        self.entries.iter()
    }

    /// Invoked nodes in call order.
    pub fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.entries.iter().map(|entry| entry.node)
    }

    /// Number of invocations that changed the node's content.
    pub fn changed_count(&self) -> usize {
        self.entries.iter().filter(|entry| entry.changed()).count()
    }
}

impl<'a> IntoIterator for &'a Ledger {
    type Item = &'a LedgerEntry;
    type IntoIter = std::slice::Iter<'a, LedgerEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::equivalence::local_fingerprint;
    use crate::schema::{Schema, SchemaGraph};

    #[test]
    fn records_in_order_with_sequence() {
        let mut graph = SchemaGraph::new();
        let a = graph.add(Schema::new());
        let b = graph.add(Schema::titled("b"));
        let fa = local_fingerprint(&graph, a);
        let fb = local_fingerprint(&graph, b);

        let mut ledger = Ledger::new();
        ledger.record(a, 2, fa, fa);
        ledger.record(b, 1, fa, fb);

        assert_eq!(ledger.len(), 2);
        assert_eq!(ledger.nodes().collect::<Vec<_>>(), vec![a, b]);
        assert_eq!(ledger.entries()[1].sequence, 1);
        assert!(!ledger.entries()[0].changed());
        assert_eq!(ledger.changed_count(), 1);
    }

    #[test]
    fn serializes_as_entry_list() {
        let mut graph = SchemaGraph::new();
        let a = graph.add(Schema::new());
        let fa = local_fingerprint(&graph, a);
        let mut ledger = Ledger::new();
        ledger.record(a, 1, fa, fa);

        let value = serde_json::to_value(&ledger).unwrap();
        let entry = &value[0];
        assert_eq!(entry["sequence"], 0);
        assert_eq!(entry["node"], a.raw());
        assert_eq!(entry["before"], fa.to_string());
    }
}
