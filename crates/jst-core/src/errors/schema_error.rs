//! Errors raised by the JSON bridge when reading or writing schema graphs.

use super::error_code::{self, JstErrorCode};

#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    #[error("Schema at {pointer} is not a JSON object")]
    NotAnObject { pointer: String },

    #[error("Keyword {keyword} at {pointer} must be {expected}")]
    InvalidKeyword {
        pointer: String,
        keyword: String,
        expected: &'static str,
    },

    #[error("Schema node {node} is its own ancestor and cannot be written as a tree")]
    Cyclic { node: u32 },

    #[error("Schema node {node} does not belong to this graph")]
    UnknownNode { node: u32 },

    #[error("Malformed JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl JstErrorCode for SchemaError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Cyclic { .. } => error_code::CYCLIC_SCHEMA,
            _ => error_code::SCHEMA_ERROR,
        }
    }
}
