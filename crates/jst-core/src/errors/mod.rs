//! Error handling for jst.
//! One error enum per subsystem, `thiserror` only.

pub mod config_error;
pub mod error_code;
pub mod mutation_error;
pub mod schema_error;

pub use config_error::ConfigError;
pub use error_code::JstErrorCode;
pub use mutation_error::MutationError;
pub use schema_error::SchemaError;
