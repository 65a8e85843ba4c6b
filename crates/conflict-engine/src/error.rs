//! Error types for conflict-engine operations.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConflictError {
    /// A start or end value did not match the format its event kind requires.
    /// Aborts the whole detection request.
    #[error("Invalid {field} for event '{id}': '{value}' (expected {expected})")]
    Parse {
        id: String,
        field: &'static str,
        value: String,
        expected: &'static str,
    },
}

pub type Result<T> = std::result::Result<T, ConflictError>;
