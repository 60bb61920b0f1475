//! Ready-made failure type for schema mutators.
//!
//! The traverser returns whatever error a mutator produces, unchanged.
//! Mutators that have no error type of their own can use this one.

use super::error_code::{self, JstErrorCode};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MutationError {
    #[error("Mutation rejected for node {node}: {reason}")]
    Rejected { node: u32, reason: String },

    #[error("Mutation deadline of {budget_ms}ms exceeded")]
    DeadlineExceeded { budget_ms: u64 },
}

impl MutationError {
    /// Shorthand for a `Rejected` error.
    pub fn rejected(node: u32, reason: impl Into<String>) -> Self {
        Self::Rejected {
            node,
            reason: reason.into(),
        }
    }
}

impl JstErrorCode for MutationError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Rejected { .. } => error_code::MUTATION_REJECTED,
            Self::DeadlineExceeded { .. } => error_code::DEADLINE_EXCEEDED,
        }
    }
}
