//! Content fingerprints via xxh3-128.
//!
//! A fingerprint digests a node's own fields together with its children's
//! fingerprints, unfolded [`UNFOLD_DEPTH`] levels down. Equivalent nodes
//! unfold identically, so they always share a fingerprint, cycles included.
//! The converse holds only up to hash collisions and for differences within
//! the unfolding depth: fingerprints are bucket keys, and equality is
//! confirmed with [`EquivalenceChecker`](super::EquivalenceChecker).
//!
//! [`Fingerprinter`] memoizes per `(node, depth)`, so a shared subtree is
//! digested once per depth no matter how many paths reach it.

use std::fmt;

use jst_core::types::{FxHashMap, SmallVec8};
use serde::{Serialize, Serializer};
use xxhash_rust::xxh3::Xxh3;

use crate::schema::{Items, NodeId, Schema, SchemaGraph};

/// Levels of descendants folded into a fingerprint.
pub const UNFOLD_DEPTH: u8 = 32;

const TAG_NODE: u8 = 0x01;
const TAG_MISSING: u8 = 0x02;
const TAG_NO_ITEMS: u8 = 0x03;
const TAG_SINGLE: u8 = 0x04;
const TAG_TUPLE: u8 = 0x05;

/// 128-bit structural digest of a node's content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Fingerprint(u128);

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032x}", self.0)
    }
}

impl Serialize for Fingerprint {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Memoizing fingerprint calculator over one unchanging graph.
#[derive(Debug)]
pub struct Fingerprinter<'g> {
    graph: &'g SchemaGraph,
    memo: FxHashMap<(NodeId, u8), Fingerprint>,
}

impl<'g> Fingerprinter<'g> {
    pub fn new(graph: &'g SchemaGraph) -> Self {
        Self {
            graph,
            memo: FxHashMap::default(),
        }
    }

    pub fn fingerprint(&mut self, id: NodeId) -> Fingerprint {
        self.unfold(id, UNFOLD_DEPTH)
    }

    fn unfold(&mut self, id: NodeId, depth: u8) -> Fingerprint {
        if let Some(&fp) = self.memo.get(&(id, depth)) {
            return fp;
        }
        let graph = self.graph;
        let mut hasher = Xxh3::new();
        match graph.get(id) {
            None => hasher.update(&[TAG_MISSING]),
            Some(schema) => {
                write_shape(&mut hasher, schema);
                if depth > 0 {
                    for child in content_children(schema) {
                        let digest = self.unfold(child, depth - 1);
                        hasher.update(&digest.0.to_le_bytes());
                    }
                }
            }
        }
        let fp = Fingerprint(hasher.digest128());
        self.memo.insert((id, depth), fp);
        fp
    }
}

/// Fingerprint of the current content of `id` and its descendants.
pub fn fingerprint(graph: &SchemaGraph, id: NodeId) -> Fingerprint {
    Fingerprinter::new(graph).fingerprint(id)
}

/// Digest of `id`'s own fields and the identities of its children.
///
/// Constant cost per node. Changes when the node's fields change or when a
/// relation is re-pointed, but not when a descendant's content changes.
pub fn local_fingerprint(graph: &SchemaGraph, id: NodeId) -> Fingerprint {
    let mut hasher = Xxh3::new();
    match graph.get(id) {
        None => hasher.update(&[TAG_MISSING]),
        Some(schema) => {
            write_shape(&mut hasher, schema);
            for child in content_children(schema) {
                hasher.update(&child.raw().to_le_bytes());
            }
        }
    }
    Fingerprint(hasher.digest128())
}

/// Length-prefixed encoding of everything but the children's content,
/// normalized the same way the equivalence checker compares.
fn write_shape(hasher: &mut Xxh3, schema: &Schema) {
    hasher.update(&[TAG_NODE]);
    write_text(hasher, super::text(&schema.title));
    write_text(hasher, super::text(&schema.description));

    write_len(hasher, schema.types.len());
    for ty in &schema.types {
        write_text(hasher, ty);
    }

    write_len(hasher, schema.properties.len());
    for name in schema.properties.keys() {
        write_text(hasher, name);
    }

    match super::items(&schema.items) {
        None => hasher.update(&[TAG_NO_ITEMS]),
        Some(Items::Single(_)) => hasher.update(&[TAG_SINGLE]),
        Some(Items::Tuple(members)) => {
            hasher.update(&[TAG_TUPLE]);
            write_len(hasher, members.len());
        }
    }

    write_len(hasher, schema.any_of.len());
    write_len(hasher, schema.all_of.len());
    write_len(hasher, schema.one_of.len());

    // serde_json maps are key-sorted, so `to_string` is canonical.
    write_len(hasher, schema.extra.len());
    for (keyword, value) in &schema.extra {
        write_text(hasher, keyword);
        write_text(hasher, &value.to_string());
    }
}

/// Every child that takes part in content, in a fixed order matching
/// [`write_shape`]. Unlike traversal edges, this includes one-element tuples.
fn content_children(schema: &Schema) -> SmallVec8<NodeId> {
    let mut children: SmallVec8<NodeId> = schema.properties.values().copied().collect();
    match super::items(&schema.items) {
        Some(Items::Single(child)) => children.push(*child),
        Some(Items::Tuple(members)) => children.extend(members.iter().copied()),
        None => {}
    }
    children.extend(schema.any_of.iter().copied());
    children.extend(schema.all_of.iter().copied());
    children.extend(schema.one_of.iter().copied());
    children
}

fn write_len(hasher: &mut Xxh3, n: usize) {
    hasher.update(&(n as u64).to_le_bytes());
}

fn write_text(hasher: &mut Xxh3, s: &str) {
    write_len(hasher, s.len());
    hasher.update(s.as_bytes());
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn deterministic_fingerprint() {
        let mut graph = SchemaGraph::new();
        let a = graph.read_value(&json!({"title": "a", "items": {}})).unwrap();
        assert_eq!(fingerprint(&graph, a), fingerprint(&graph, a));
    }

    #[test]
    fn equal_content_equal_fingerprint() {
        let mut graph = SchemaGraph::new();
        let a = graph
            .read_value(&json!({"properties": {"x": {}, "y": {"title": "t"}}}))
            .unwrap();
        let b = graph
            .read_value(&json!({"properties": {"y": {"title": "t"}, "x": {"title": ""}}}))
            .unwrap();
        assert_eq!(fingerprint(&graph, a), fingerprint(&graph, b));
    }

    #[test]
    fn title_change_changes_fingerprint() {
        let mut graph = SchemaGraph::new();
        let a = graph.read_value(&json!({"title": "a"})).unwrap();
        let before = fingerprint(&graph, a);
        graph[a].title = Some("b".into());
        assert_ne!(before, fingerprint(&graph, a));
    }

    #[test]
    fn descendant_change_changes_fingerprint_but_not_local() {
        let mut graph = SchemaGraph::new();
        let root = graph
            .read_value(&json!({"properties": {"a": {"items": {"title": "x"}}}}))
            .unwrap();
        let deep_before = fingerprint(&graph, root);
        let local_before = local_fingerprint(&graph, root);

        let a = graph[root].properties["a"];
        let Some(Items::Single(leaf)) = graph[a].items else {
            panic!("expected single items");
        };
        graph[leaf].title = Some("y".into());

        assert_ne!(deep_before, fingerprint(&graph, root));
        assert_eq!(local_before, local_fingerprint(&graph, root));
    }

    #[test]
    fn local_fingerprint_tracks_relinking() {
        let mut graph = SchemaGraph::new();
        let x = graph.add(Schema::new());
        let y = graph.add(Schema::new());
        let root = graph.add(Schema::new().with_any_of(x));
        let before = local_fingerprint(&graph, root);
        graph[root].any_of[0] = y;
        assert_ne!(before, local_fingerprint(&graph, root));
    }

    #[test]
    fn field_boundaries_are_unambiguous() {
        let mut graph = SchemaGraph::new();
        let a = graph.add(Schema {
            title: Some("ab".into()),
            description: Some("c".into()),
            ..Schema::default()
        });
        let b = graph.add(Schema {
            title: Some("a".into()),
            description: Some("bc".into()),
            ..Schema::default()
        });
        assert_ne!(fingerprint(&graph, a), fingerprint(&graph, b));
    }

    #[test]
    fn unrolled_cycle_shares_fingerprint_with_self_loop() {
        let mut graph = SchemaGraph::new();
        let a = graph.add(Schema::titled("n"));
        graph[a].properties.insert("next".into(), a);
        let b = graph.add(Schema::titled("n"));
        let c = graph.add(Schema::titled("n").with_property("next", b));
        graph[b].properties.insert("next".into(), c);

        let mut fingerprints = Fingerprinter::new(&graph);
        let fa = fingerprints.fingerprint(a);
        assert_eq!(fa, fingerprints.fingerprint(b));
        assert_eq!(fa, fingerprints.fingerprint(c));
    }

    #[test]
    fn distinct_cycles_differ() {
        let mut graph = SchemaGraph::new();
        let a = graph.add(Schema::titled("a"));
        let b = graph.add(Schema::titled("b").with_any_of(a));
        graph[a].properties.insert("b".into(), b);
        assert_ne!(fingerprint(&graph, a), fingerprint(&graph, b));
    }

    #[test]
    fn displays_as_hex() {
        let mut graph = SchemaGraph::new();
        let a = graph.add(Schema::new());
        let shown = fingerprint(&graph, a).to_string();
        assert_eq!(shown.len(), 32);
        assert!(shown.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
