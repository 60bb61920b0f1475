//! Stable error codes for structured logging.

/// Every jst error enum implements this to expose a stable code string
/// that survives message rewording.
pub trait JstErrorCode {
    /// Returns the error code string (e.g. "CONFIG_ERROR").
    fn error_code(&self) -> &'static str;

    /// Returns `[ERROR_CODE] message`.
    fn tagged(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const SCHEMA_ERROR: &str = "SCHEMA_ERROR";
pub const CYCLIC_SCHEMA: &str = "CYCLIC_SCHEMA";
pub const MUTATION_REJECTED: &str = "MUTATION_REJECTED";
pub const DEADLINE_EXCEEDED: &str = "DEADLINE_EXCEEDED";
