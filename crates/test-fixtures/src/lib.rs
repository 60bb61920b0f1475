//! Test fixture loader for jst schema documents.
//!
//! Fixtures live in `test-fixtures/schemas/` at the workspace root. Each is
//! a plain JSON schema document; graphs with shared or cyclic nodes are
//! built in code on top of them.

use std::path::PathBuf;

use jst_analysis::{NodeId, SchemaGraph};
use serde::de::DeserializeOwned;

/// Every schema fixture shipped with the workspace.
pub const SCHEMA_FIXTURES: &[&str] = &[
    "schemas/cycle_basic.json",
    "schemas/cycle_chained.json",
    "schemas/cycle_media_res.json",
    "schemas/cycle_different_branch.json",
    "schemas/cycle_multiple.json",
    "schemas/memoization.json",
];

/// Root directory of the test-fixtures folder.
fn fixtures_root() -> PathBuf {
    // Works from any crate in the workspace: walk up to find test-fixtures.
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".to_string());
    let mut path = PathBuf::from(&manifest_dir);
    while !path.join("test-fixtures").join("schemas").exists() {
        if !path.pop() {
            panic!("Could not find test-fixtures directory from CARGO_MANIFEST_DIR={manifest_dir}");
        }
    }
    path.join("test-fixtures")
}

/// Load and deserialize a JSON fixture file.
///
/// # Panics
/// Panics if the file doesn't exist or can't be deserialized.
pub fn load_fixture<T: DeserializeOwned>(relative_path: &str) -> T {
    let path = fixture_path(relative_path);
    let content = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", path.display(), e));
    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse fixture {}: {}", path.display(), e))
}

/// Load a fixture file as raw JSON Value.
pub fn load_fixture_value(relative_path: &str) -> serde_json::Value {
    load_fixture(relative_path)
}

/// Read a schema fixture into `graph`, returning its root.
///
/// # Panics
/// Panics if the fixture is not a valid schema document.
pub fn load_schema(graph: &mut SchemaGraph, relative_path: &str) -> NodeId {
    let value = load_fixture_value(relative_path);
    graph
        .read_value(&value)
        .unwrap_or_else(|e| panic!("Fixture {relative_path} is not a schema: {e}"))
}

/// Read a schema fixture into a fresh graph.
pub fn schema_graph(relative_path: &str) -> (SchemaGraph, NodeId) {
    let mut graph = SchemaGraph::new();
    let root = load_schema(&mut graph, relative_path);
    (graph, root)
}

/// Get the absolute path to a fixture file.
pub fn fixture_path(relative_path: &str) -> PathBuf {
    fixtures_root().join(relative_path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixtures_root_exists() {
        assert!(fixtures_root().exists(), "test-fixtures directory not found");
    }

    #[test]
    fn all_schema_fixtures_read() {
        for fixture in SCHEMA_FIXTURES {
            assert!(fixture_path(fixture).exists(), "Missing fixture: {fixture}");
            let (graph, root) = schema_graph(fixture);
            assert!(graph.contains(root));
        }
    }
}
