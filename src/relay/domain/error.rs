//! Error types for relay domain validation.

use thiserror::Error;

/// Errors returned while constructing relay domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RelayDomainError {
    /// The relay identifier is empty after trimming.
    #[error("relay identifier must not be empty")]
    EmptyRelayId,

    /// The relay identifier contains whitespace or path separators.
    #[error("relay identifier '{0}' contains whitespace or '/'")]
    InvalidRelayId(String),

    /// The relay identifier exceeds the certificate common-name limit.
    #[error("relay identifier exceeds {max} characters: {value}")]
    RelayIdTooLong {
        /// Maximum permitted length.
        max: usize,
        /// Rejected value.
        value: String,
    },
}
