//! Domain model for relay tasks.
//!
//! Payloads are opaque strings interpreted only by the relay. The one
//! exception is the configuration payload, which this crate produces itself.

mod config;
mod error;
mod ids;
mod policy;
mod task;

pub use config::{ActivateConfigPayload, ConfigSerial};
pub use error::{ParseResultTypeError, ParseTaskTypeError, TaskDomainError};
pub use ids::TaskId;
pub use policy::TaskQueuePolicy;
pub use task::{ResultType, Task, TaskResult, TaskState, TaskType};
