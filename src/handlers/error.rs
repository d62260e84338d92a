//! Handler error taxonomy and its transport classification.

use crate::authorization::AuthorizationError;
use crate::relay::ports::RelayRepositoryError;
use crate::task::{domain::TaskDomainError, ports::TaskRepositoryError, services::ConfigTaskError};
use thiserror::Error;

/// Result type for handler operations.
pub type HandlerResult<T> = Result<T, HandlerError>;

/// Transport-neutral classification of a [`HandlerError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The request was malformed.
    BadRequest,
    /// The caller's site identity was missing or foreign.
    Forbidden,
    /// The referenced relay or task does not exist.
    NotFound,
    /// The relay's queue is full.
    TooManyRequests,
    /// An infrastructure failure.
    Internal,
}

impl ErrorKind {
    /// Returns the HTTP status code a transport layer would use.
    #[must_use]
    pub const fn status_code(self) -> u16 {
        match self {
            Self::BadRequest => 400,
            Self::Forbidden => 403,
            Self::NotFound => 404,
            Self::TooManyRequests => 429,
            Self::Internal => 500,
        }
    }
}

/// Errors surfaced by handlers.
#[derive(Debug, Error)]
pub enum HandlerError {
    /// Site-CN authorization failed.
    #[error(transparent)]
    Unauthorized(#[from] AuthorizationError),

    /// The request could not be parsed.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The relay is not registered.
    #[error("relay not found: {0}")]
    RelayNotFound(String),

    /// The task does not exist or has expired.
    #[error("task {task_id} not found for relay {relay_id}")]
    TaskNotFound {
        /// Relay that was searched.
        relay_id: String,
        /// Task identifier as presented by the caller.
        task_id: String,
    },

    /// The relay already holds the maximum number of pending tasks.
    #[error("relay {relay_id} already has {limit} pending tasks")]
    QueueFull {
        /// Relay whose queue is full.
        relay_id: String,
        /// Configured pending-task ceiling.
        limit: usize,
    },

    /// Task payload could not be built.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),

    /// Relay registry failure.
    #[error(transparent)]
    Relays(#[from] RelayRepositoryError),

    /// Task repository failure.
    #[error(transparent)]
    Tasks(TaskRepositoryError),
}

impl HandlerError {
    /// Classifies the error for the transport layer.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Unauthorized(_) => ErrorKind::Forbidden,
            Self::InvalidRequest(_) => ErrorKind::BadRequest,
            Self::RelayNotFound(_) | Self::TaskNotFound { .. } => ErrorKind::NotFound,
            Self::QueueFull { .. } => ErrorKind::TooManyRequests,
            Self::Domain(_) | Self::Relays(_) | Self::Tasks(_) => ErrorKind::Internal,
        }
    }
}

impl From<TaskRepositoryError> for HandlerError {
    fn from(err: TaskRepositoryError) -> Self {
        match err {
            TaskRepositoryError::NotFound { relay_id, task_id } => Self::TaskNotFound {
                relay_id: relay_id.to_string(),
                task_id: task_id.to_string(),
            },
            TaskRepositoryError::CapacityExceeded { relay_id, limit } => Self::QueueFull {
                relay_id: relay_id.to_string(),
                limit,
            },
            other => Self::Tasks(other),
        }
    }
}

impl From<ConfigTaskError> for HandlerError {
    fn from(err: ConfigTaskError) -> Self {
        match err {
            ConfigTaskError::RelayNotFound(relay_id) => Self::RelayNotFound(relay_id.to_string()),
            ConfigTaskError::Domain(inner) => inner.into(),
            ConfigTaskError::Relays(inner) => inner.into(),
            ConfigTaskError::Tasks(inner) => inner.into(),
        }
    }
}
