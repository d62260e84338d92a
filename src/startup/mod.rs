//! Background seeding of configuration tasks at process start.
//!
//! [`StartupScheduler`] spawns a [`ConfigSeedJob`] without awaiting it, so the
//! process becomes ready immediately. The job refreshes the relay registry
//! from the site's configuration source and then creates one
//! `ACTIVATE_CONFIG` task per relay. Failures to reach the site are retried
//! with [`RetryPolicy`]; anything else ends the job. Either way the outcome is
//! only logged.

mod retry;
mod scheduler;
mod seed;

pub use retry::{RetryError, RetryPolicy, RetryPolicyError, retry_with_policy};
pub use scheduler::StartupScheduler;
pub use seed::{ConfigSeedJob, SeedOutcome, StartupError};

#[cfg(test)]
mod tests;
