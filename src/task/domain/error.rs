//! Error types for task domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing task domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The time-to-live must be at least one second.
    #[error("task time-to-live must be at least one second")]
    ZeroTtl,

    /// The time-to-live does not fit the timestamp range.
    #[error("task time-to-live of {0} seconds is out of range")]
    TtlOutOfRange(u64),

    /// The pending-task ceiling must be at least one.
    #[error("max pending tasks per relay must be at least one")]
    ZeroPendingLimit,

    /// The configuration payload could not be encoded.
    #[error("failed to encode configuration payload: {0}")]
    PayloadEncoding(String),
}

/// Error returned while parsing task types.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task type: {0}")]
pub struct ParseTaskTypeError(pub String);

/// Error returned while parsing result types.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown result type: {0}")]
pub struct ParseResultTypeError(pub String);
