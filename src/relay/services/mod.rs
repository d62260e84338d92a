//! Application services for the relay registry.

mod sync;

pub use sync::{RelaySyncError, RelaySyncReport, SiteRelaySync};
