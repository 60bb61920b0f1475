//! Traversal policy.

use jst_core::config::TraverseConfig;
use jst_core::JstConfig;

/// Policy for one traversal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TraverseOptions {
    /// Collapse structurally equivalent nodes into one logical visit.
    pub unique_only: bool,
}

impl TraverseOptions {
    /// Options with deduplication enabled.
    pub fn unique() -> Self {
        Self { unique_only: true }
    }
}

impl From<&TraverseConfig> for TraverseOptions {
    fn from(config: &TraverseConfig) -> Self {
        Self {
            unique_only: config.effective_unique_only(),
        }
    }
}

impl From<&JstConfig> for TraverseOptions {
    fn from(config: &JstConfig) -> Self {
        Self::from(&config.traverse)
    }
}
