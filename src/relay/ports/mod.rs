//! Port contracts for the relay registry.
//!
//! Ports define infrastructure-agnostic interfaces used by relay services and
//! by the task handlers.

pub mod repository;
pub mod site;

pub use repository::{RelayRepository, RelayRepositoryError, RelayRepositoryResult};
pub use site::{CheckmkApiError, SiteApiResult, SiteConfigSource, SiteRelay};
