//! Pushes configuration to every registered relay.

use super::HandlerResult;
use crate::authorization::AuthorizedSite;
use crate::relay::ports::RelayRepository;
use crate::task::{domain::Task, ports::TaskRepository, services::ConfigTaskFactory};
use mockable::Clock;

/// Outcome of a configuration push.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivateConfigResponse {
    /// Tasks that were enqueued. Relays with a full queue are absent.
    pub tasks: Vec<Task>,
}

/// Creates an `ACTIVATE_CONFIG` task for every relay.
#[derive(Clone)]
pub struct ActivateConfigHandler<R, T, C>
where
    R: RelayRepository,
    T: TaskRepository,
    C: Clock + Send + Sync,
{
    factory: ConfigTaskFactory<R, T, C>,
}

impl<R, T, C> ActivateConfigHandler<R, T, C>
where
    R: RelayRepository,
    T: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates the handler.
    #[must_use]
    pub const fn new(factory: ConfigTaskFactory<R, T, C>) -> Self {
        Self { factory }
    }

    /// Distributes a new configuration serial.
    ///
    /// # Errors
    ///
    /// Returns infrastructure errors from the repositories. Full relay queues
    /// are skipped, not reported as errors.
    pub async fn process(&self, site: &AuthorizedSite) -> HandlerResult<ActivateConfigResponse> {
        let tasks = self.factory.create_for_all_relays().await?;
        tracing::info!(
            site_cn = %site.site_cn(),
            tasks_created = tasks.len(),
            "activated configuration on relays"
        );
        Ok(ActivateConfigResponse { tasks })
    }
}
