//! Builds and enqueues configuration-activation tasks.

use crate::relay::{
    domain::RelayId,
    ports::{RelayRepository, RelayRepositoryError},
};
use crate::task::{
    domain::{ActivateConfigPayload, ConfigSerial, Task, TaskDomainError, TaskType},
    ports::{TaskRepository, TaskRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Service-level errors for configuration distribution.
#[derive(Debug, Error)]
pub enum ConfigTaskError {
    /// The relay is not registered.
    #[error("relay not found: {0}")]
    RelayNotFound(RelayId),
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
    /// Relay registry operation failed.
    #[error(transparent)]
    Relays(#[from] RelayRepositoryError),
    /// Task repository operation failed.
    #[error(transparent)]
    Tasks(#[from] TaskRepositoryError),
}

/// Result type for configuration distribution.
pub type ConfigTaskResult<T> = Result<T, ConfigTaskError>;

/// Creates `ACTIVATE_CONFIG` tasks for one or all registered relays.
#[derive(Clone)]
pub struct ConfigTaskFactory<R, T, C>
where
    R: RelayRepository,
    T: TaskRepository,
    C: Clock + Send + Sync,
{
    relays: Arc<R>,
    tasks: Arc<T>,
    clock: Arc<C>,
}

impl<R, T, C> ConfigTaskFactory<R, T, C>
where
    R: RelayRepository,
    T: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a factory.
    #[must_use]
    pub const fn new(relays: Arc<R>, tasks: Arc<T>, clock: Arc<C>) -> Self {
        Self {
            relays,
            tasks,
            clock,
        }
    }

    /// Enqueues one `ACTIVATE_CONFIG` task for every registered relay.
    ///
    /// All tasks of one call share a fresh [`ConfigSerial`]. Distribution is
    /// not transactional: a relay whose queue is full is skipped and the
    /// remaining relays still receive their task. Only the tasks actually
    /// stored are returned.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigTaskError`] when the registry cannot be listed or the
    /// task repository fails for a reason other than a full queue.
    pub async fn create_for_all_relays(&self) -> ConfigTaskResult<Vec<Task>> {
        let payload = ActivateConfigPayload::new(ConfigSerial::new()).encode()?;
        let relays = self.relays.list_all().await?;
        let mut created = Vec::with_capacity(relays.len());

        for relay in relays {
            let task = Task::new(
                relay.id().clone(),
                TaskType::ActivateConfig,
                payload.clone(),
                &*self.clock,
            );
            match self.tasks.store_task(&task).await {
                Ok(()) => {
                    if still_registered(&*self.relays, &*self.tasks, relay.id()).await? {
                        created.push(task);
                    }
                }
                Err(TaskRepositoryError::CapacityExceeded { relay_id, limit }) => {
                    tracing::warn!(
                        %relay_id,
                        limit,
                        "skipping configuration task, relay queue is full"
                    );
                }
                Err(err) => return Err(err.into()),
            }
        }

        Ok(created)
    }

    /// Enqueues an `ACTIVATE_CONFIG` task for a single relay.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigTaskError::RelayNotFound`] when the relay is not
    /// registered, or repository errors including a full queue.
    pub async fn create_for_relay(&self, relay_id: &RelayId) -> ConfigTaskResult<Task> {
        if !self.relays.contains(relay_id).await? {
            return Err(ConfigTaskError::RelayNotFound(relay_id.clone()));
        }
        let payload = ActivateConfigPayload::new(ConfigSerial::new()).encode()?;
        let task = Task::new(
            relay_id.clone(),
            TaskType::ActivateConfig,
            payload,
            &*self.clock,
        );
        self.tasks.store_task(&task).await?;
        if !still_registered(&*self.relays, &*self.tasks, relay_id).await? {
            return Err(ConfigTaskError::RelayNotFound(relay_id.clone()));
        }
        Ok(task)
    }
}

/// Re-checks registration after a task was stored for `relay_id`.
///
/// Membership is checked before storing, so an unregistration can land in
/// between and leave a queue behind for a removed relay. When the relay is
/// gone its queue is dropped and `false` is returned.
pub(crate) async fn still_registered<R, T>(
    relays: &R,
    tasks: &T,
    relay_id: &RelayId,
) -> ConfigTaskResult<bool>
where
    R: RelayRepository + ?Sized,
    T: TaskRepository + ?Sized,
{
    if relays.contains(relay_id).await? {
        return Ok(true);
    }
    let dropped = tasks.remove_relay_tasks(relay_id).await?;
    tracing::warn!(
        %relay_id,
        dropped,
        "relay was unregistered while a task was stored, dropping its queue"
    );
    Ok(false)
}
