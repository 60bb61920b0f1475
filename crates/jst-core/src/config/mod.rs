//! Configuration system for jst.
//! TOML-based, layered resolution: overrides > env > project > defaults.

pub mod jst_config;
pub mod log_config;
pub mod traverse_config;

pub use jst_config::{ConfigOverrides, JstConfig};
pub use log_config::LogConfig;
pub use traverse_config::TraverseConfig;
