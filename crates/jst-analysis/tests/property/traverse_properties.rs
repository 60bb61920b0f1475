use std::collections::HashSet;

use jst_analysis::{
    equivalent, fingerprint, noop, EquivalenceChecker, EquivalenceClasses, NodeId, SchemaGraph,
    TraverseOptions, Traverser,
};
use proptest::prelude::*;
use serde_json::{json, Map, Value};

/// Acyclic schema documents. Tuple `items` are empty or hold at least two
/// members, so every node read from a document is a traversal child.
fn schema_doc() -> impl Strategy<Value = Value> {
    let leaf = prop::option::of("[ab]").prop_map(|title| match title {
        Some(t) => json!({ "title": t }),
        None => json!({}),
    });
    leaf.prop_recursive(4, 48, 3, |inner| {
        (
            prop::option::of("[ab]"),
            prop::collection::btree_map("[pq]", inner.clone(), 0..3),
            prop::collection::vec(inner.clone(), 0..3),
            prop::collection::vec(inner.clone(), 0..2),
            prop_oneof![
                Just(None),
                inner.clone().prop_map(Some),
                prop::collection::vec(inner, 2..4).prop_map(|m| Some(Value::Array(m))),
            ],
        )
            .prop_map(|(title, properties, any_of, all_of, items)| {
                let mut doc = Map::new();
                if let Some(t) = title {
                    doc.insert("title".into(), Value::String(t));
                }
                if !properties.is_empty() {
                    doc.insert("properties".into(), Value::Object(properties.into_iter().collect()));
                }
                if !any_of.is_empty() {
                    doc.insert("anyOf".into(), Value::Array(any_of));
                }
                if !all_of.is_empty() {
                    doc.insert("allOf".into(), Value::Array(all_of));
                }
                if let Some(items) = items {
                    doc.insert("items".into(), items);
                }
                Value::Object(doc)
            })
    })
}

fn read(doc: &Value) -> (SchemaGraph, NodeId) {
    let mut graph = SchemaGraph::new();
    let root = graph.read_value(doc).unwrap();
    (graph, root)
}

/// Reads `doc`, then adds a `back` property on node `from` pointing at node
/// `to` for each pair, indices taken modulo the node count.
fn read_cyclic(doc: &Value, links: &[(usize, usize)]) -> (SchemaGraph, NodeId) {
    let (mut graph, root) = read(doc);
    let ids: Vec<NodeId> = graph.node_ids().collect();
    for &(from, to) in links {
        let (from, to) = (ids[from % ids.len()], ids[to % ids.len()]);
        graph[from].properties.insert(format!("back{}", to.raw()), to);
    }
    (graph, root)
}

/// Class count by pairwise comparison against one representative per class.
fn brute_force_classes(graph: &SchemaGraph) -> usize {
    let mut representatives: Vec<NodeId> = Vec::new();
    for id in graph.node_ids() {
        if !representatives.iter().any(|&r| equivalent(graph, r, id)) {
            representatives.push(id);
        }
    }
    representatives.len()
}

proptest! {
    #[test]
    fn non_unique_calls_every_node_once(doc in schema_doc()) {
        let (mut graph, root) = read(&doc);
        let traversal = Traverser::default().traverse(&mut graph, root, &mut noop()).unwrap();
        prop_assert_eq!(traversal.calls(), graph.len());
        let distinct: HashSet<NodeId> = traversal.ledger.nodes().collect();
        prop_assert_eq!(distinct.len(), graph.len());
    }

    #[test]
    fn calls_are_post_order(doc in schema_doc(), unique in any::<bool>()) {
        let (mut graph, root) = read(&doc);
        let traversal = Traverser::new(TraverseOptions { unique_only: unique })
            .traverse(&mut graph, root, &mut noop())
            .unwrap();
        let called: Vec<NodeId> = traversal.ledger.nodes().collect();
        for (position, &node) in called.iter().enumerate() {
            for edge in graph.edges(node) {
                if let Some(child) = called.iter().position(|&n| n == edge.target) {
                    prop_assert!(child < position);
                }
            }
        }
        prop_assert_eq!(called.last().copied(), Some(root));
    }

    #[test]
    fn unique_calls_once_per_equivalence_class(doc in schema_doc()) {
        let (mut graph, root) = read(&doc);
        let classes: HashSet<_> = graph.node_ids().map(|id| fingerprint(&graph, id)).collect();
        let traversal = Traverser::new(TraverseOptions::unique())
            .traverse(&mut graph, root, &mut noop())
            .unwrap();
        prop_assert_eq!(traversal.calls(), classes.len());
        let called: HashSet<_> = traversal.ledger.nodes().map(|id| fingerprint(&graph, id)).collect();
        prop_assert_eq!(called, classes);
    }

    #[test]
    fn cyclic_graphs_call_every_node_once(
        doc in schema_doc(),
        links in prop::collection::vec((0..64usize, 0..64usize), 0..6),
    ) {
        let (mut graph, root) = read_cyclic(&doc, &links);
        let traversal = Traverser::default().traverse(&mut graph, root, &mut noop()).unwrap();
        let distinct: HashSet<NodeId> = traversal.ledger.nodes().collect();
        prop_assert_eq!(traversal.calls(), graph.len());
        prop_assert_eq!(distinct.len(), graph.len());
    }

    #[test]
    fn cyclic_unique_calls_once_per_equivalence_class(
        doc in schema_doc(),
        links in prop::collection::vec((0..64usize, 0..64usize), 0..6),
    ) {
        let (mut graph, root) = read_cyclic(&doc, &links);
        let expected = brute_force_classes(&graph);
        prop_assert_eq!(EquivalenceClasses::reachable(&graph, root).len(), expected);

        let traversal = Traverser::new(TraverseOptions::unique())
            .traverse(&mut graph, root, &mut noop())
            .unwrap();
        prop_assert_eq!(traversal.calls(), expected);

        let called: Vec<NodeId> = traversal.ledger.nodes().collect();
        let mut checker = EquivalenceChecker::within(&graph);
        for (i, &a) in called.iter().enumerate() {
            for &b in &called[i + 1..] {
                prop_assert!(!checker.equivalent(a, b), "{} and {} are equivalent", a, b);
            }
        }
    }

    #[test]
    fn runs_are_deterministic(doc in schema_doc(), unique in any::<bool>()) {
        let options = TraverseOptions { unique_only: unique };
        let (mut first, first_root) = read(&doc);
        let (mut second, second_root) = read(&doc);
        let a = Traverser::new(options).traverse(&mut first, first_root, &mut noop()).unwrap();
        let b = Traverser::new(options).traverse(&mut second, second_root, &mut noop()).unwrap();
        prop_assert_eq!(a, b);
    }

    #[test]
    fn reread_copies_are_equivalent(doc in schema_doc()) {
        let mut graph = SchemaGraph::new();
        let a = graph.read_value(&doc).unwrap();
        let b = graph.read_value(&doc).unwrap();
        prop_assert!(equivalent(&graph, a, a));
        prop_assert!(equivalent(&graph, a, b));
        prop_assert_eq!(fingerprint(&graph, a), fingerprint(&graph, b));
    }

    #[test]
    fn equivalence_agrees_with_canonical_form(x in schema_doc(), y in schema_doc(), z in schema_doc()) {
        let mut graph = SchemaGraph::new();
        let a = graph.read_value(&x).unwrap();
        let b = graph.read_value(&y).unwrap();
        let c = graph.read_value(&z).unwrap();

        let same_text = graph.write_string(a).unwrap() == graph.write_string(b).unwrap();
        prop_assert_eq!(equivalent(&graph, a, b), same_text);
        prop_assert_eq!(equivalent(&graph, a, b), equivalent(&graph, b, a));
        prop_assert_eq!(equivalent(&graph, a, b), fingerprint(&graph, a) == fingerprint(&graph, b));
        if equivalent(&graph, a, b) && equivalent(&graph, b, c) {
            prop_assert!(equivalent(&graph, a, c));
        }
    }
}
