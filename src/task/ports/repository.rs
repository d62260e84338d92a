//! Repository port for per-relay task queues and their results.

use crate::relay::domain::RelayId;
use crate::task::domain::{ResultType, Task, TaskId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Per-relay task queue contract.
///
/// Implementations must never return a task older than the configured
/// time-to-live, and must count only live, result-less tasks against the
/// per-relay pending ceiling. Relay identifiers are trusted: callers check
/// them against the relay registry first.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Appends a task to its relay's queue.
    ///
    /// The admission check and the append happen atomically with respect to
    /// other operations on the same relay.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::CapacityExceeded`] when the relay
    /// already holds the maximum number of pending tasks, or
    /// [`TaskRepositoryError::DuplicateTask`] when the identifier is taken.
    async fn store_task(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Returns all live tasks of a relay in creation order, pending and
    /// resolved alike.
    ///
    /// Unknown relays yield an empty list.
    async fn get_tasks(&self, relay_id: &RelayId) -> TaskRepositoryResult<Vec<Task>>;

    /// Finds a live task of a relay.
    ///
    /// Returns `None` when the task is absent or expired.
    async fn get_task(
        &self,
        relay_id: &RelayId,
        task_id: TaskId,
    ) -> TaskRepositoryResult<Option<Task>>;

    /// Records the relay's result for a task and returns the updated task.
    ///
    /// A second call replaces the earlier result.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when no live task with that
    /// identifier exists under the relay.
    async fn update_result(
        &self,
        relay_id: &RelayId,
        task_id: TaskId,
        result_type: ResultType,
        result_payload: String,
    ) -> TaskRepositoryResult<Task>;

    /// Drops every expired task and returns how many were removed.
    async fn evict_expired(&self) -> TaskRepositoryResult<usize>;

    /// Drops a relay's whole queue and returns how many tasks were removed.
    async fn remove_relay_tasks(&self, relay_id: &RelayId) -> TaskRepositoryResult<usize>;
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// A task with the same identifier already exists.
    #[error("duplicate task identifier: {0}")]
    DuplicateTask(TaskId),

    /// The relay's queue already holds the maximum number of pending tasks.
    #[error("relay {relay_id} already has {limit} pending tasks")]
    CapacityExceeded {
        /// Relay whose queue is full.
        relay_id: RelayId,
        /// Configured pending-task ceiling.
        limit: usize,
    },

    /// No live task with that identifier exists under the relay.
    #[error("task {task_id} not found for relay {relay_id}")]
    NotFound {
        /// Relay that was searched.
        relay_id: RelayId,
        /// Missing task.
        task_id: TaskId,
    },

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
