//! Records a relay's result for a task.

use super::{HandlerError, HandlerResult, lookup};
use crate::authorization::AuthorizedSite;
use crate::relay::ports::RelayRepository;
use crate::task::{
    domain::{ResultType, Task},
    ports::TaskRepository,
};
use std::sync::Arc;

/// Request body for [`UpdateTaskHandler`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateTaskRequest {
    /// Wire name of the result type, `OK` or `ERROR`.
    pub result_type: String,
    /// Result payload reported by the relay.
    pub result_payload: String,
}

impl UpdateTaskRequest {
    /// Creates a request.
    #[must_use]
    pub fn new(result_type: impl Into<String>, result_payload: impl Into<String>) -> Self {
        Self {
            result_type: result_type.into(),
            result_payload: result_payload.into(),
        }
    }
}

/// Attaches a result to a live task.
#[derive(Clone)]
pub struct UpdateTaskHandler<R, T>
where
    R: RelayRepository,
    T: TaskRepository,
{
    relays: Arc<R>,
    tasks: Arc<T>,
}

impl<R, T> UpdateTaskHandler<R, T>
where
    R: RelayRepository,
    T: TaskRepository,
{
    /// Creates the handler.
    #[must_use]
    pub const fn new(relays: Arc<R>, tasks: Arc<T>) -> Self {
        Self { relays, tasks }
    }

    /// Records the result and returns the updated task.
    ///
    /// A repeated update replaces the earlier result.
    ///
    /// # Errors
    ///
    /// Returns [`HandlerError::RelayNotFound`] for unregistered relays,
    /// [`HandlerError::TaskNotFound`] for unknown, expired, or malformed
    /// task identifiers, and [`HandlerError::InvalidRequest`] for a malformed
    /// relay identifier or result type.
    pub async fn process(
        &self,
        _site: &AuthorizedSite,
        raw_relay_id: &str,
        raw_task_id: &str,
        request: UpdateTaskRequest,
    ) -> HandlerResult<Task> {
        let UpdateTaskRequest {
            result_type: raw_result_type,
            result_payload,
        } = request;
        let relay_id = lookup::registered_relay(&*self.relays, raw_relay_id).await?;
        let task_id = lookup::parse_task_id(&relay_id, raw_task_id)?;
        let result_type = ResultType::try_from(raw_result_type.as_str())
            .map_err(|err| HandlerError::InvalidRequest(err.to_string()))?;

        Ok(self
            .tasks
            .update_result(&relay_id, task_id, result_type, result_payload)
            .await?)
    }
}
