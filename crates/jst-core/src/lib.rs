//! # jst-core
//!
//! Foundation crate for the jst schema traversal engine.
//! Defines errors, config, tracing setup, and shared collection types.
//! `jst-analysis` depends on this.

pub mod config;
pub mod errors;
pub mod tracing;
pub mod types;

pub use config::JstConfig;
pub use errors::{ConfigError, JstErrorCode, MutationError, SchemaError};
