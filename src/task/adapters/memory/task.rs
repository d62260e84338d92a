//! In-memory per-relay task queues.

use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, Utc};
use mockable::{Clock, DefaultClock};
use std::collections::{HashMap, VecDeque};
use std::fmt;
use std::sync::{Arc, RwLock};

use crate::relay::domain::RelayId;
use crate::task::{
    domain::{ResultType, Task, TaskId, TaskQueuePolicy, TaskResult},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};

/// Thread-safe in-memory task repository.
///
/// Expired tasks are filtered out of every read and physically dropped when
/// the owning relay's queue is next written or when
/// [`TaskRepository::evict_expired`] runs. Clones share the same queues.
pub struct InMemoryTaskRepository<C = DefaultClock> {
    state: Arc<RwLock<InMemoryTaskState>>,
    policy: TaskQueuePolicy,
    clock: Arc<C>,
}

#[derive(Debug, Default)]
struct InMemoryTaskState {
    queues: HashMap<RelayId, VecDeque<Task>>,
    index: HashMap<TaskId, RelayId>,
}

impl InMemoryTaskRepository<DefaultClock> {
    /// Creates an empty repository driven by the system clock.
    #[must_use]
    pub fn new(policy: TaskQueuePolicy) -> Self {
        Self::with_clock(policy, Arc::new(DefaultClock))
    }
}

impl<C> InMemoryTaskRepository<C>
where
    C: Clock + Send + Sync,
{
    /// Creates an empty repository driven by the given clock.
    #[must_use]
    pub fn with_clock(policy: TaskQueuePolicy, clock: Arc<C>) -> Self {
        Self {
            state: Arc::new(RwLock::new(InMemoryTaskState::default())),
            policy,
            clock,
        }
    }

    /// Returns the queue policy.
    #[must_use]
    pub const fn policy(&self) -> TaskQueuePolicy {
        self.policy
    }
}

impl<C> Clone for InMemoryTaskRepository<C> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            policy: self.policy,
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<C> fmt::Debug for InMemoryTaskRepository<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InMemoryTaskRepository")
            .field("state", &self.state)
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

fn poisoned(err: &impl ToString) -> TaskRepositoryError {
    TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

/// Drops expired tasks from one queue, keeping the index in step.
fn purge_queue(
    queue: &mut VecDeque<Task>,
    index: &mut HashMap<TaskId, RelayId>,
    now: DateTime<Utc>,
    ttl: TimeDelta,
) -> usize {
    let before = queue.len();
    queue.retain(|task| {
        let expired = task.is_expired_at(now, ttl);
        if expired {
            index.remove(&task.id());
        }
        !expired
    });
    before - queue.len()
}

#[async_trait]
impl<C> TaskRepository for InMemoryTaskRepository<C>
where
    C: Clock + Send + Sync,
{
    async fn store_task(&self, task: &Task) -> TaskRepositoryResult<()> {
        let now = self.clock.utc();
        let ttl = self.policy.ttl();
        let limit = self.policy.max_pending_tasks_per_relay();
        let mut state = self.state.write().map_err(|err| poisoned(&err))?;
        let InMemoryTaskState { queues, index } = &mut *state;

        let queue = queues.entry(task.relay_id().clone()).or_default();
        purge_queue(queue, index, now, ttl);

        if index.contains_key(&task.id()) {
            return Err(TaskRepositoryError::DuplicateTask(task.id()));
        }

        let pending = queue.iter().filter(|queued| queued.is_pending()).count();
        if pending >= limit {
            tracing::debug!(
                relay_id = %task.relay_id(),
                pending,
                limit,
                "rejecting task, relay queue is full"
            );
            return Err(TaskRepositoryError::CapacityExceeded {
                relay_id: task.relay_id().clone(),
                limit,
            });
        }

        index.insert(task.id(), task.relay_id().clone());
        queue.push_back(task.clone());
        tracing::debug!(
            relay_id = %task.relay_id(),
            task_id = %task.id(),
            task_type = task.task_type().as_str(),
            "stored task"
        );
        Ok(())
    }

    async fn get_tasks(&self, relay_id: &RelayId) -> TaskRepositoryResult<Vec<Task>> {
        let now = self.clock.utc();
        let ttl = self.policy.ttl();
        let state = self.state.read().map_err(|err| poisoned(&err))?;
        let tasks = state
            .queues
            .get(relay_id)
            .map(|queue| {
                queue
                    .iter()
                    .filter(|task| !task.is_expired_at(now, ttl))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        Ok(tasks)
    }

    async fn get_task(
        &self,
        relay_id: &RelayId,
        task_id: TaskId,
    ) -> TaskRepositoryResult<Option<Task>> {
        let now = self.clock.utc();
        let ttl = self.policy.ttl();
        let state = self.state.read().map_err(|err| poisoned(&err))?;
        let task = state
            .queues
            .get(relay_id)
            .and_then(|queue| queue.iter().find(|task| task.id() == task_id))
            .filter(|task| !task.is_expired_at(now, ttl))
            .cloned();
        Ok(task)
    }

    async fn update_result(
        &self,
        relay_id: &RelayId,
        task_id: TaskId,
        result_type: ResultType,
        result_payload: String,
    ) -> TaskRepositoryResult<Task> {
        let now = self.clock.utc();
        let ttl = self.policy.ttl();
        let mut state = self.state.write().map_err(|err| poisoned(&err))?;

        let task = state
            .queues
            .get_mut(relay_id)
            .and_then(|queue| queue.iter_mut().find(|task| task.id() == task_id))
            .filter(|task| !task.is_expired_at(now, ttl))
            .ok_or_else(|| TaskRepositoryError::NotFound {
                relay_id: relay_id.clone(),
                task_id,
            })?;

        if task.result().is_some() {
            tracing::debug!(%relay_id, %task_id, "overwriting earlier task result");
        }
        task.record_result(TaskResult::new(result_type, result_payload, &*self.clock));
        tracing::debug!(
            %relay_id,
            %task_id,
            result_type = result_type.as_str(),
            "recorded task result"
        );
        Ok(task.clone())
    }

    async fn evict_expired(&self) -> TaskRepositoryResult<usize> {
        let now = self.clock.utc();
        let ttl = self.policy.ttl();
        let mut state = self.state.write().map_err(|err| poisoned(&err))?;
        let InMemoryTaskState { queues, index } = &mut *state;

        let mut evicted = 0;
        for queue in queues.values_mut() {
            evicted += purge_queue(queue, index, now, ttl);
        }
        queues.retain(|_, queue| !queue.is_empty());
        Ok(evicted)
    }

    async fn remove_relay_tasks(&self, relay_id: &RelayId) -> TaskRepositoryResult<usize> {
        let mut state = self.state.write().map_err(|err| poisoned(&err))?;
        let InMemoryTaskState { queues, index } = &mut *state;

        let Some(queue) = queues.remove(relay_id) else {
            return Ok(0);
        };
        for task in &queue {
            index.remove(&task.id());
        }
        Ok(queue.len())
    }
}
