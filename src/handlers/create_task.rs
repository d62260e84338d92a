//! Enqueues an arbitrary task for one relay.

use super::{HandlerError, HandlerResult, lookup};
use crate::authorization::AuthorizedSite;
use crate::relay::ports::RelayRepository;
use crate::task::{
    domain::{Task, TaskType},
    ports::TaskRepository,
    services::still_registered,
};
use mockable::Clock;
use std::sync::Arc;

/// Request body for [`CreateTaskHandler`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    /// Wire name of the task type, e.g. `FETCH_AD_HOC`.
    pub task_type: String,
    /// Opaque payload interpreted by the relay.
    pub payload: String,
}

impl CreateTaskRequest {
    /// Creates a request.
    #[must_use]
    pub fn new(task_type: impl Into<String>, payload: impl Into<String>) -> Self {
        Self {
            task_type: task_type.into(),
            payload: payload.into(),
        }
    }
}

/// Creates a task for a registered relay.
#[derive(Clone)]
pub struct CreateTaskHandler<R, T, C>
where
    R: RelayRepository,
    T: TaskRepository,
    C: Clock + Send + Sync,
{
    relays: Arc<R>,
    tasks: Arc<T>,
    clock: Arc<C>,
}

impl<R, T, C> CreateTaskHandler<R, T, C>
where
    R: RelayRepository,
    T: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates the handler.
    #[must_use]
    pub const fn new(relays: Arc<R>, tasks: Arc<T>, clock: Arc<C>) -> Self {
        Self {
            relays,
            tasks,
            clock,
        }
    }

    /// Validates the request and appends the task to the relay's queue.
    ///
    /// # Errors
    ///
    /// Returns [`HandlerError::RelayNotFound`] for unregistered relays,
    /// including a relay unregistered while the task was being stored,
    /// [`HandlerError::InvalidRequest`] for unknown task types, and
    /// [`HandlerError::QueueFull`] when the relay has no pending capacity.
    pub async fn process(
        &self,
        _site: &AuthorizedSite,
        raw_relay_id: &str,
        request: CreateTaskRequest,
    ) -> HandlerResult<Task> {
        let CreateTaskRequest {
            task_type: raw_task_type,
            payload,
        } = request;
        let relay_id = lookup::registered_relay(&*self.relays, raw_relay_id).await?;
        let task_type = TaskType::try_from(raw_task_type.as_str())
            .map_err(|err| HandlerError::InvalidRequest(err.to_string()))?;

        let task = Task::new(relay_id, task_type, payload, &*self.clock);
        self.tasks.store_task(&task).await?;
        if !still_registered(&*self.relays, &*self.tasks, task.relay_id()).await? {
            return Err(HandlerError::RelayNotFound(task.relay_id().to_string()));
        }
        tracing::info!(
            relay_id = %task.relay_id(),
            task_id = %task.id(),
            task_type = task_type.as_str(),
            "created relay task"
        );
        Ok(task)
    }
}
