//! Per-relay task queues and configuration distribution.
//!
//! Tasks are units of work addressed to exactly one relay. They are queued
//! per relay in creation order, bounded by a pending-task ceiling, and expire
//! after a fixed time-to-live whether or not a result was recorded. The
//! module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
