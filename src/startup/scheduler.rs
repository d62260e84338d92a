//! Owns the handle of the background seeding job.

use super::{ConfigSeedJob, SeedOutcome};
use crate::relay::ports::{RelayRepository, SiteConfigSource};
use crate::task::ports::TaskRepository;
use mockable::Clock;
use tokio::task::JoinHandle;

/// Spawns the seeding job and keeps its handle for shutdown.
#[derive(Debug, Default)]
pub struct StartupScheduler {
    handle: Option<JoinHandle<SeedOutcome>>,
}

impl StartupScheduler {
    /// Creates a scheduler with no job.
    #[must_use]
    pub const fn new() -> Self {
        Self { handle: None }
    }

    /// Spawns `job` on the current runtime without waiting for it.
    ///
    /// Nothing is spawned when `relays_supported` is `false` or a job is
    /// still running. Returns whether a job was spawned.
    pub fn schedule<R, T, S, C>(
        &mut self,
        job: ConfigSeedJob<R, T, S, C>,
        relays_supported: bool,
    ) -> bool
    where
        R: RelayRepository + 'static,
        T: TaskRepository + 'static,
        S: SiteConfigSource + 'static,
        C: Clock + Send + Sync + 'static,
    {
        if !relays_supported {
            tracing::info!("relays are not supported, skipping configuration seeding");
            return false;
        }
        if self.is_running() {
            tracing::debug!("configuration seeding already running");
            return false;
        }
        self.handle = Some(tokio::spawn(async move { job.run().await }));
        true
    }

    /// Returns whether a spawned job has not finished yet.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.handle
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Waits for the job and returns its outcome.
    ///
    /// Returns `None` when no job was spawned.
    pub async fn join(&mut self) -> Option<SeedOutcome> {
        let handle = self.handle.take()?;
        Some(match handle.await {
            Ok(outcome) => outcome,
            Err(err) if err.is_cancelled() => SeedOutcome::Aborted,
            Err(err) => {
                tracing::warn!(error = %err, "configuration seeding panicked");
                SeedOutcome::Failed {
                    error: err.to_string(),
                }
            }
        })
    }

    /// Cancels a running job.
    ///
    /// The handle is kept, so a later [`Self::join`] reports
    /// [`SeedOutcome::Aborted`] for a job that had not finished.
    pub fn abort(&self) {
        if let Some(handle) = self.handle.as_ref() {
            if !handle.is_finished() {
                tracing::info!("cancelling configuration seeding");
            }
            handle.abort();
        }
    }
}
