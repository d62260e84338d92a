//! Payload of configuration-activation tasks.

use super::TaskDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Identifies one configuration distribution.
///
/// Every task created by the same distribution carries the same serial, so a
/// relay can tell whether it already applied it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConfigSerial(Uuid);

impl ConfigSerial {
    /// Creates a fresh serial.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ConfigSerial {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ConfigSerial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Body of an `ACTIVATE_CONFIG` task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivateConfigPayload {
    /// Serial of the configuration to apply.
    pub serial: ConfigSerial,
}

impl ActivateConfigPayload {
    /// Creates a payload for the given serial.
    #[must_use]
    pub const fn new(serial: ConfigSerial) -> Self {
        Self { serial }
    }

    /// Encodes the payload as the task's opaque string.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::PayloadEncoding`] when serialisation fails.
    pub fn encode(&self) -> Result<String, TaskDomainError> {
        serde_json::to_string(self).map_err(|err| TaskDomainError::PayloadEncoding(err.to_string()))
    }
}
