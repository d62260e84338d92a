//! Application context owning the process-wide repositories.
//!
//! [`RelayDispatchApp`] constructs the relay registry and task repository
//! once, hands out handlers wired to them, and runs the lifespan hooks that
//! start and stop the background jobs.

use crate::authorization::{AuthorizedSite, SiteAuthorizer};
use crate::config::RelayDispatchConfig;
use crate::handlers::{
    ActivateConfigHandler, CreateTaskHandler, GetRelayTaskHandler, GetRelayTasksHandler,
    GetVersionHandler, HandlerResult, RegisterRelayHandler, UnregisterRelayHandler,
    UpdateTaskHandler,
};
use crate::relay::{adapters::memory::InMemoryRelayRepository, ports::SiteConfigSource};
use crate::startup::{ConfigSeedJob, RetryPolicy, SeedOutcome, StartupScheduler};
use crate::task::{
    adapters::memory::InMemoryTaskRepository,
    services::{ConfigTaskFactory, TaskEvictionSweeper},
};
use mockable::{Clock, DefaultClock};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

/// Task repository type used by the application.
pub type AppTaskRepository<C> = InMemoryTaskRepository<C>;

/// Owning context for one relay dispatch process.
pub struct RelayDispatchApp<S, C = DefaultClock>
where
    S: SiteConfigSource + 'static,
    C: Clock + Send + Sync + 'static,
{
    authorizer: SiteAuthorizer,
    relays: Arc<InMemoryRelayRepository>,
    tasks: Arc<AppTaskRepository<C>>,
    source: Arc<S>,
    clock: Arc<C>,
    retry_policy: RetryPolicy,
    eviction_interval: Duration,
    scheduler: StartupScheduler,
    sweeper: Option<JoinHandle<()>>,
}

impl<S> RelayDispatchApp<S, DefaultClock>
where
    S: SiteConfigSource + 'static,
{
    /// Creates the application driven by the system clock.
    #[must_use]
    pub fn new(config: &RelayDispatchConfig, source: Arc<S>) -> Self {
        Self::with_clock(config, source, Arc::new(DefaultClock))
    }
}

impl<S, C> RelayDispatchApp<S, C>
where
    S: SiteConfigSource + 'static,
    C: Clock + Send + Sync + 'static,
{
    /// Creates the application driven by the given clock.
    #[must_use]
    pub fn with_clock(config: &RelayDispatchConfig, source: Arc<S>, clock: Arc<C>) -> Self {
        Self {
            authorizer: SiteAuthorizer::new(config.site_cn.clone()),
            relays: Arc::new(InMemoryRelayRepository::new()),
            tasks: Arc::new(InMemoryTaskRepository::with_clock(
                config.queue_policy,
                Arc::clone(&clock),
            )),
            source,
            clock,
            retry_policy: config.retry_policy,
            eviction_interval: config.eviction_interval,
            scheduler: StartupScheduler::new(),
            sweeper: None,
        }
    }

    /// Lifespan start hook.
    ///
    /// Spawns the eviction sweeper and, when the edition supports relays,
    /// the configuration seeding job. Returns immediately. Must run inside a
    /// Tokio runtime.
    pub fn start(&mut self, relays_supported: bool) {
        if self.sweeper.is_none() {
            let sweeper =
                TaskEvictionSweeper::new(Arc::clone(&self.tasks), self.eviction_interval);
            self.sweeper = Some(sweeper.spawn());
        }
        let job = ConfigSeedJob::new(
            Arc::clone(&self.relays),
            Arc::clone(&self.tasks),
            Arc::clone(&self.source),
            Arc::clone(&self.clock),
            self.retry_policy,
        );
        let scheduled = self.scheduler.schedule(job, relays_supported);
        tracing::info!(
            relays_supported,
            seeding_scheduled = scheduled,
            "relay dispatch started"
        );
    }

    /// Waits for the seeding job started by [`Self::start`].
    ///
    /// Returns `None` when no job was scheduled.
    pub async fn wait_for_seeding(&mut self) -> Option<SeedOutcome> {
        self.scheduler.join().await
    }

    /// Lifespan stop hook. Cancels the seeding job and the sweeper.
    pub fn shutdown(&mut self) {
        self.scheduler.abort();
        if let Some(sweeper) = self.sweeper.take() {
            sweeper.abort();
        }
        tracing::info!("relay dispatch stopped");
    }

    /// Checks the site identity presented with a request.
    ///
    /// # Errors
    ///
    /// Returns [`HandlerError::Unauthorized`](crate::handlers::HandlerError::Unauthorized)
    /// when the identity is missing or foreign.
    pub fn authorize(&self, presented_site_cn: Option<&str>) -> HandlerResult<AuthorizedSite> {
        Ok(self.authorizer.authorize(presented_site_cn)?)
    }

    /// Returns the relay registry.
    #[must_use]
    pub fn relays(&self) -> Arc<InMemoryRelayRepository> {
        Arc::clone(&self.relays)
    }

    /// Returns the task repository.
    #[must_use]
    pub fn tasks(&self) -> Arc<AppTaskRepository<C>> {
        Arc::clone(&self.tasks)
    }

    /// Returns the configuration task factory.
    #[must_use]
    pub fn config_task_factory(
        &self,
    ) -> ConfigTaskFactory<InMemoryRelayRepository, AppTaskRepository<C>, C> {
        ConfigTaskFactory::new(self.relays(), self.tasks(), Arc::clone(&self.clock))
    }

    /// Handler listing a relay's tasks.
    #[must_use]
    pub fn get_relay_tasks_handler(
        &self,
    ) -> GetRelayTasksHandler<InMemoryRelayRepository, AppTaskRepository<C>> {
        GetRelayTasksHandler::new(self.relays(), self.tasks())
    }

    /// Handler fetching one task.
    #[must_use]
    pub fn get_relay_task_handler(
        &self,
    ) -> GetRelayTaskHandler<InMemoryRelayRepository, AppTaskRepository<C>> {
        GetRelayTaskHandler::new(self.relays(), self.tasks())
    }

    /// Handler creating tasks.
    #[must_use]
    pub fn create_task_handler(
        &self,
    ) -> CreateTaskHandler<InMemoryRelayRepository, AppTaskRepository<C>, C> {
        CreateTaskHandler::new(self.relays(), self.tasks(), Arc::clone(&self.clock))
    }

    /// Handler recording task results.
    #[must_use]
    pub fn update_task_handler(
        &self,
    ) -> UpdateTaskHandler<InMemoryRelayRepository, AppTaskRepository<C>> {
        UpdateTaskHandler::new(self.relays(), self.tasks())
    }

    /// Handler pushing configuration to all relays.
    #[must_use]
    pub fn activate_config_handler(
        &self,
    ) -> ActivateConfigHandler<InMemoryRelayRepository, AppTaskRepository<C>, C> {
        ActivateConfigHandler::new(self.config_task_factory())
    }

    /// Handler reporting the component version.
    #[must_use]
    pub fn get_version_handler(&self) -> GetVersionHandler {
        GetVersionHandler::default()
    }

    /// Handler registering relays.
    #[must_use]
    pub fn register_relay_handler(&self) -> RegisterRelayHandler<InMemoryRelayRepository, C> {
        RegisterRelayHandler::new(self.relays(), Arc::clone(&self.clock))
    }

    /// Handler removing relays.
    #[must_use]
    pub fn unregister_relay_handler(
        &self,
    ) -> UnregisterRelayHandler<InMemoryRelayRepository, AppTaskRepository<C>> {
        UnregisterRelayHandler::new(self.relays(), self.tasks())
    }
}

impl<S, C> Drop for RelayDispatchApp<S, C>
where
    S: SiteConfigSource + 'static,
    C: Clock + Send + Sync + 'static,
{
    fn drop(&mut self) {
        self.scheduler.abort();
        if let Some(sweeper) = self.sweeper.take() {
            sweeper.abort();
        }
    }
}
