//! Top-level jst configuration with layered resolution.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;
use tracing_subscriber::EnvFilter;

use super::{LogConfig, TraverseConfig};
use crate::errors::{ConfigError, JstErrorCode};

/// Project config file name looked up in the root passed to [`JstConfig::load`].
pub const PROJECT_CONFIG_FILE: &str = "jst.toml";

/// Environment variable overriding `traverse.unique_only`.
pub const ENV_UNIQUE_ONLY: &str = "JST_TRAVERSE_UNIQUE_ONLY";

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. Explicit overrides (applied via `apply_overrides`)
/// 2. Environment variables (`JST_*`)
/// 3. Project config (`jst.toml` in project root)
/// 4. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct JstConfig {
    pub traverse: TraverseConfig,
    pub log: LogConfig,
}

/// Caller-supplied overrides, applied last.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub unique_only: Option<bool>,
    pub log_filter: Option<String>,
}

impl JstConfig {
    /// Load configuration with layered resolution rooted at `root`.
    pub fn load(root: &Path, overrides: Option<&ConfigOverrides>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        let project_config_path = root.join(PROJECT_CONFIG_FILE);
        if project_config_path.exists() {
            Self::merge_toml_file(&mut config, &project_config_path)?;
        }

        Self::apply_env_overrides(&mut config);

        if let Some(overrides) = overrides {
            Self::apply_overrides(&mut config, overrides);
        }

        if let Err(e) = Self::validate(&config) {
            warn!(code = e.error_code(), error = %e, "rejecting jst configuration");
            return Err(e);
        }
        Ok(config)
    }

    /// Load configuration from a TOML string (for testing).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })?;
        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate the configuration values.
    pub fn validate(config: &JstConfig) -> Result<(), ConfigError> {
        if let Some(ref filter) = config.log.filter {
            if let Err(e) = EnvFilter::try_new(filter) {
                return Err(ConfigError::ValidationFailed {
                    field: "log.filter".to_string(),
                    message: e.to_string(),
                });
            }
        }
        Ok(())
    }

    /// Merge a TOML file into the existing config.
    /// Unknown keys are silently ignored.
    fn merge_toml_file(config: &mut JstConfig, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let file_config: JstConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`; only `Some` values in `other` win.
    fn merge(base: &mut JstConfig, other: &JstConfig) {
        if other.traverse.unique_only.is_some() {
            base.traverse.unique_only = other.traverse.unique_only;
        }
        if other.log.filter.is_some() {
            base.log.filter = other.log.filter.clone();
        }
    }

    fn apply_env_overrides(config: &mut JstConfig) {
        if let Ok(val) = std::env::var(ENV_UNIQUE_ONLY) {
            match parse_flag(&val) {
                Some(v) => config.traverse.unique_only = Some(v),
                None => warn!(
                    variable = ENV_UNIQUE_ONLY,
                    value = %val,
                    "ignoring unparsable boolean environment override"
                ),
            }
        }
    }

    fn apply_overrides(config: &mut JstConfig, overrides: &ConfigOverrides) {
        if overrides.unique_only.is_some() {
            config.traverse.unique_only = overrides.unique_only;
        }
        if overrides.log_filter.is_some() {
            config.log.filter = overrides.log_filter.clone();
        }
    }
}

/// Lenient boolean parsing for environment flags.
fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}
