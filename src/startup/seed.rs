//! The configuration seeding job.

use super::{RetryError, RetryPolicy, retry_with_policy};
use crate::relay::{
    ports::{CheckmkApiError, RelayRepository, RelayRepositoryError, SiteConfigSource},
    services::{RelaySyncError, SiteRelaySync},
};
use crate::task::{
    ports::TaskRepository,
    services::{ConfigTaskError, ConfigTaskFactory},
};
use mockable::Clock;
use std::collections::HashSet;
use std::sync::Arc;
use thiserror::Error;

/// Failure of one seeding attempt.
#[derive(Debug, Error)]
pub enum StartupError {
    /// The site's configuration source could not be queried. Retried.
    #[error(transparent)]
    SiteApi(#[from] CheckmkApiError),
    /// The relay registry failed.
    #[error(transparent)]
    Registry(#[from] RelayRepositoryError),
    /// Task distribution failed.
    #[error(transparent)]
    Distribution(#[from] ConfigTaskError),
}

impl StartupError {
    /// Returns whether the seeding job retries after this error.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::SiteApi(_))
    }
}

impl From<RelaySyncError> for StartupError {
    fn from(err: RelaySyncError) -> Self {
        match err {
            RelaySyncError::SiteApi(inner) => Self::SiteApi(inner),
            RelaySyncError::Repository(inner) => Self::Registry(inner),
        }
    }
}

/// Final state of a seeding job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeedOutcome {
    /// Tasks were created.
    Seeded {
        /// Attempts used.
        attempts: u32,
        /// Relays the site reported.
        relays_reported: usize,
        /// Relays registered when tasks were created.
        relays_known: usize,
        /// `ACTIVATE_CONFIG` tasks created.
        tasks_created: usize,
        /// Distinct relays that received a task.
        relays_covered: usize,
    },
    /// Every attempt failed to reach the site.
    Exhausted {
        /// Attempts used.
        attempts: u32,
        /// Message of the final error.
        last_error: String,
    },
    /// An attempt failed with an error that is not retried.
    Failed {
        /// Failure message.
        error: String,
    },
    /// The job was cancelled before it finished.
    Aborted,
}

#[derive(Debug)]
struct SeedReport {
    relays_reported: usize,
    relays_known: usize,
    tasks_created: usize,
    relays_covered: usize,
}

/// Syncs relays from the site and distributes configuration to them.
pub struct ConfigSeedJob<R, T, S, C>
where
    R: RelayRepository,
    T: TaskRepository,
    S: SiteConfigSource,
    C: Clock + Send + Sync,
{
    relays: Arc<R>,
    sync: SiteRelaySync<R, S, C>,
    factory: ConfigTaskFactory<R, T, C>,
    policy: RetryPolicy,
}

impl<R, T, S, C> ConfigSeedJob<R, T, S, C>
where
    R: RelayRepository,
    T: TaskRepository,
    S: SiteConfigSource,
    C: Clock + Send + Sync,
{
    /// Creates a job over shared repositories.
    #[must_use]
    pub fn new(
        relays: Arc<R>,
        tasks: Arc<T>,
        source: Arc<S>,
        clock: Arc<C>,
        policy: RetryPolicy,
    ) -> Self {
        Self {
            sync: SiteRelaySync::new(Arc::clone(&relays), source, Arc::clone(&clock)),
            factory: ConfigTaskFactory::new(Arc::clone(&relays), tasks, clock),
            relays,
            policy,
        }
    }

    /// Runs the job to completion and logs its outcome.
    pub async fn run(&self) -> SeedOutcome {
        let result = retry_with_policy(
            &self.policy,
            |attempt| async move { self.attempt(attempt).await.map(|report| (attempt, report)) },
            StartupError::is_retryable,
        )
        .await;

        match result {
            Ok((attempts, report)) => {
                tracing::info!(
                    attempts,
                    relays_reported = report.relays_reported,
                    relays_known = report.relays_known,
                    tasks_created = report.tasks_created,
                    relays_covered = report.relays_covered,
                    "seeded configuration tasks for relays"
                );
                SeedOutcome::Seeded {
                    attempts,
                    relays_reported: report.relays_reported,
                    relays_known: report.relays_known,
                    tasks_created: report.tasks_created,
                    relays_covered: report.relays_covered,
                }
            }
            Err(RetryError::Exhausted {
                attempts,
                last_error,
            }) => {
                tracing::warn!(
                    attempts,
                    error = %last_error,
                    "giving up on seeding configuration tasks"
                );
                SeedOutcome::Exhausted {
                    attempts,
                    last_error: last_error.to_string(),
                }
            }
            Err(RetryError::Permanent { attempt, error }) => {
                tracing::warn!(
                    attempt,
                    error = %error,
                    "seeding configuration tasks failed"
                );
                SeedOutcome::Failed {
                    error: error.to_string(),
                }
            }
        }
    }

    async fn attempt(&self, attempt: u32) -> Result<SeedReport, StartupError> {
        tracing::debug!(attempt, "seeding configuration tasks");
        let sync = self.sync.sync().await?;
        let created = self.factory.create_for_all_relays().await?;
        let relays_known = self.relays.list_all().await?.len();
        let relays_covered = created
            .iter()
            .map(|task| task.relay_id())
            .collect::<HashSet<_>>()
            .len();
        Ok(SeedReport {
            relays_reported: sync.reported,
            relays_known,
            tasks_created: created.len(),
            relays_covered,
        })
    }
}
