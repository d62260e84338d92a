//! Application services for task distribution and queue maintenance.

mod config_factory;
mod eviction;

pub(crate) use config_factory::still_registered;
pub use config_factory::{ConfigTaskError, ConfigTaskFactory, ConfigTaskResult};
pub use eviction::TaskEvictionSweeper;
