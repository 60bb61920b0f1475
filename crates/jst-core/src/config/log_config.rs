//! Logging configuration.

use serde::{Deserialize, Serialize};

/// Default filter directive when neither `JST_LOG` nor config supplies one.
pub const DEFAULT_FILTER: &str = "jst_analysis=info,jst_core=info";

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct LogConfig {
    /// `EnvFilter` directive string, e.g. `jst_analysis=debug`.
    pub filter: Option<String>,
}

impl LogConfig {
    pub fn effective_filter(&self) -> &str {
        self.filter.as_deref().unwrap_or(DEFAULT_FILTER)
    }
}
