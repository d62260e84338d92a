//! Queue policy shared by every relay's task queue.

use super::TaskDomainError;
use chrono::TimeDelta;
use std::time::Duration;

/// Time-to-live and admission limit applied uniformly to all relay queues.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskQueuePolicy {
    ttl: TimeDelta,
    max_pending_tasks_per_relay: usize,
}

impl TaskQueuePolicy {
    /// Default task time-to-live.
    pub const DEFAULT_TTL: TimeDelta = TimeDelta::seconds(120);
    /// [`Self::DEFAULT_TTL`] in whole seconds.
    pub const DEFAULT_TTL_SECONDS: u64 = Self::DEFAULT_TTL.num_seconds().unsigned_abs();
    /// Default pending-task ceiling per relay.
    pub const DEFAULT_MAX_PENDING_TASKS_PER_RELAY: usize = 10;

    /// Creates a validated policy.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError`] when either limit is zero or the
    /// time-to-live does not fit the timestamp range.
    pub fn new(
        ttl_seconds: u64,
        max_pending_tasks_per_relay: usize,
    ) -> Result<Self, TaskDomainError> {
        if ttl_seconds == 0 {
            return Err(TaskDomainError::ZeroTtl);
        }
        if max_pending_tasks_per_relay == 0 {
            return Err(TaskDomainError::ZeroPendingLimit);
        }
        let ttl = TimeDelta::from_std(Duration::from_secs(ttl_seconds))
            .map_err(|_| TaskDomainError::TtlOutOfRange(ttl_seconds))?;
        Ok(Self {
            ttl,
            max_pending_tasks_per_relay,
        })
    }

    /// Returns the maximum task age.
    #[must_use]
    pub const fn ttl(&self) -> TimeDelta {
        self.ttl
    }

    /// Returns the ceiling on result-less tasks per relay.
    #[must_use]
    pub const fn max_pending_tasks_per_relay(&self) -> usize {
        self.max_pending_tasks_per_relay
    }
}

impl Default for TaskQueuePolicy {
    fn default() -> Self {
        Self {
            ttl: Self::DEFAULT_TTL,
            max_pending_tasks_per_relay: Self::DEFAULT_MAX_PENDING_TASKS_PER_RELAY,
        }
    }
}
