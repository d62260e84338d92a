//! Task aggregate and its result.

use super::{ParseResultTypeError, ParseTaskTypeError, TaskId};
use crate::relay::domain::RelayId;
use chrono::{DateTime, TimeDelta, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Kind of work a task asks the relay to perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskType {
    /// Fetch monitoring data for a host on demand.
    FetchAdHoc,
    /// Apply newly distributed configuration.
    ActivateConfig,
}

impl TaskType {
    /// Returns the canonical wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FetchAdHoc => "FETCH_AD_HOC",
            Self::ActivateConfig => "ACTIVATE_CONFIG",
        }
    }
}

impl TryFrom<&str> for TaskType {
    type Error = ParseTaskTypeError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_uppercase();
        match normalized.as_str() {
            "FETCH_AD_HOC" => Ok(Self::FetchAdHoc),
            "ACTIVATE_CONFIG" => Ok(Self::ActivateConfig),
            _ => Err(ParseTaskTypeError(value.to_owned())),
        }
    }
}

/// Outcome reported by the relay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResultType {
    /// The task completed successfully.
    Ok,
    /// The task failed.
    Error,
}

impl ResultType {
    /// Returns the canonical wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ok => "OK",
            Self::Error => "ERROR",
        }
    }
}

impl TryFrom<&str> for ResultType {
    type Error = ParseResultTypeError;

    fn try_from(value: &str) -> Result<Self, ParseResultTypeError> {
        let normalized = value.trim().to_ascii_uppercase();
        match normalized.as_str() {
            "OK" => Ok(Self::Ok),
            "ERROR" => Ok(Self::Error),
            _ => Err(ParseResultTypeError(value.to_owned())),
        }
    }
}

/// Result attached to a task by the relay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskResult {
    result_type: ResultType,
    payload: String,
    recorded_at: DateTime<Utc>,
}

impl TaskResult {
    /// Creates a result recorded at the clock's current time.
    #[must_use]
    pub fn new(result_type: ResultType, payload: impl Into<String>, clock: &impl Clock) -> Self {
        Self {
            result_type,
            payload: payload.into(),
            recorded_at: clock.utc(),
        }
    }

    /// Returns the result type.
    #[must_use]
    pub const fn result_type(&self) -> ResultType {
        self.result_type
    }

    /// Returns the opaque result payload.
    #[must_use]
    pub fn payload(&self) -> &str {
        &self.payload
    }

    /// Returns when the result was recorded.
    #[must_use]
    pub const fn recorded_at(&self) -> DateTime<Utc> {
        self.recorded_at
    }
}

/// Observable state of a live task.
///
/// Expired tasks are indistinguishable from tasks that never existed, so
/// expiry has no state of its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskState {
    /// No result has been recorded.
    Pending,
    /// A result has been recorded.
    Resolved,
}

/// A unit of work addressed to one relay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    relay_id: RelayId,
    task_type: TaskType,
    payload: String,
    created_at: DateTime<Utc>,
    result: Option<TaskResult>,
}

impl Task {
    /// Creates a pending task created at the clock's current time.
    #[must_use]
    pub fn new(
        relay_id: RelayId,
        task_type: TaskType,
        payload: impl Into<String>,
        clock: &impl Clock,
    ) -> Self {
        Self {
            id: TaskId::new(),
            relay_id,
            task_type,
            payload: payload.into(),
            created_at: clock.utc(),
            result: None,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the owning relay.
    #[must_use]
    pub const fn relay_id(&self) -> &RelayId {
        &self.relay_id
    }

    /// Returns the task type.
    #[must_use]
    pub const fn task_type(&self) -> TaskType {
        self.task_type
    }

    /// Returns the opaque payload.
    #[must_use]
    pub fn payload(&self) -> &str {
        &self.payload
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the recorded result, if any.
    #[must_use]
    pub const fn result(&self) -> Option<&TaskResult> {
        self.result.as_ref()
    }

    /// Returns the observable state.
    #[must_use]
    pub const fn state(&self) -> TaskState {
        if self.result.is_some() {
            TaskState::Resolved
        } else {
            TaskState::Pending
        }
    }

    /// Returns `true` while no result has been recorded.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.result.is_none()
    }

    /// Returns `true` once the task is older than `ttl` at `now`.
    #[must_use]
    pub fn is_expired_at(&self, now: DateTime<Utc>, ttl: TimeDelta) -> bool {
        now.signed_duration_since(self.created_at) > ttl
    }

    /// Attaches a result, replacing any earlier one.
    pub fn record_result(&mut self, result: TaskResult) {
        self.result = Some(result);
    }
}
