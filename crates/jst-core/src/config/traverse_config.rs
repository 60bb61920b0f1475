//! Traversal configuration.

use serde::{Deserialize, Serialize};

/// Configuration for the schema traverser.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct TraverseConfig {
    /// Collapse structurally equivalent nodes into one mutator call. Default: false.
    pub unique_only: Option<bool>,
}

impl TraverseConfig {
    /// Returns the effective unique-only policy, defaulting to false.
    pub fn effective_unique_only(&self) -> bool {
        self.unique_only.unwrap_or(false)
    }
}
