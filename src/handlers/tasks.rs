//! Read handlers polled by relays.

use super::{HandlerError, HandlerResult, lookup};
use crate::authorization::AuthorizedSite;
use crate::relay::ports::RelayRepository;
use crate::task::{domain::Task, ports::TaskRepository};
use std::sync::Arc;

/// Lists the live tasks of a relay.
#[derive(Clone)]
pub struct GetRelayTasksHandler<R, T>
where
    R: RelayRepository,
    T: TaskRepository,
{
    relays: Arc<R>,
    tasks: Arc<T>,
}

impl<R, T> GetRelayTasksHandler<R, T>
where
    R: RelayRepository,
    T: TaskRepository,
{
    /// Creates the handler.
    #[must_use]
    pub const fn new(relays: Arc<R>, tasks: Arc<T>) -> Self {
        Self { relays, tasks }
    }

    /// Returns the relay's live tasks in creation order, resolved ones
    /// included.
    ///
    /// # Errors
    ///
    /// Returns [`HandlerError::RelayNotFound`] for unregistered relays and
    /// [`HandlerError::InvalidRequest`] for malformed identifiers.
    pub async fn process(
        &self,
        _site: &AuthorizedSite,
        raw_relay_id: &str,
    ) -> HandlerResult<Vec<Task>> {
        let relay_id = lookup::registered_relay(&*self.relays, raw_relay_id).await?;
        Ok(self.tasks.get_tasks(&relay_id).await?)
    }
}

/// Fetches one task of a relay.
#[derive(Clone)]
pub struct GetRelayTaskHandler<R, T>
where
    R: RelayRepository,
    T: TaskRepository,
{
    relays: Arc<R>,
    tasks: Arc<T>,
}

impl<R, T> GetRelayTaskHandler<R, T>
where
    R: RelayRepository,
    T: TaskRepository,
{
    /// Creates the handler.
    #[must_use]
    pub const fn new(relays: Arc<R>, tasks: Arc<T>) -> Self {
        Self { relays, tasks }
    }

    /// Returns a live task of the relay.
    ///
    /// # Errors
    ///
    /// Returns [`HandlerError::RelayNotFound`] for unregistered relays,
    /// [`HandlerError::TaskNotFound`] for unknown, expired, or malformed
    /// task identifiers, and [`HandlerError::InvalidRequest`] for a malformed
    /// relay identifier.
    pub async fn process(
        &self,
        _site: &AuthorizedSite,
        raw_relay_id: &str,
        raw_task_id: &str,
    ) -> HandlerResult<Task> {
        let relay_id = lookup::registered_relay(&*self.relays, raw_relay_id).await?;
        let task_id = lookup::parse_task_id(&relay_id, raw_task_id)?;
        self.tasks
            .get_task(&relay_id, task_id)
            .await?
            .ok_or_else(|| HandlerError::TaskNotFound {
                relay_id: relay_id.to_string(),
                task_id: task_id.to_string(),
            })
    }
}
