//! Periodic removal of expired tasks.

use crate::task::ports::{TaskRepository, TaskRepositoryResult};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time;

/// Sweeps expired tasks out of the repository at a fixed interval.
///
/// Reads already hide expired tasks; the sweep only bounds memory held by
/// relays that stopped polling.
pub struct TaskEvictionSweeper<T>
where
    T: TaskRepository,
{
    tasks: Arc<T>,
    interval: Duration,
}

impl<T> TaskEvictionSweeper<T>
where
    T: TaskRepository + 'static,
{
    /// Creates a sweeper.
    #[must_use]
    pub const fn new(tasks: Arc<T>, interval: Duration) -> Self {
        Self { tasks, interval }
    }

    /// Runs a single sweep and returns the number of evicted tasks.
    ///
    /// # Errors
    ///
    /// Returns repository errors unchanged.
    pub async fn sweep_once(&self) -> TaskRepositoryResult<usize> {
        let evicted = self.tasks.evict_expired().await?;
        if evicted > 0 {
            tracing::debug!(evicted, "evicted expired relay tasks");
        }
        Ok(evicted)
    }

    /// Spawns the sweep loop on the current runtime.
    ///
    /// The loop runs until the returned handle is aborted. A failed sweep is
    /// logged and the loop continues.
    #[must_use]
    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut ticker = time::interval(self.interval);
            ticker.set_missed_tick_behavior(time::MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                if let Err(err) = self.sweep_once().await {
                    tracing::warn!(error = %err, "relay task eviction sweep failed");
                }
            }
        })
    }
}
