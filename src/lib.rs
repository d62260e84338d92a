//! Relay dispatch: task queues and result collection for site relays.
//!
//! A relay executes monitoring and configuration work on behalf of a site it
//! cannot otherwise reach. The site enqueues tasks per relay; the relay polls
//! them, executes them, and reports results back.
//!
//! # Architecture
//!
//! The crate follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (in-memory, REST)
//!
//! # Modules
//!
//! - [`relay`]: Registry of relays valid for the site
//! - [`task`]: Bounded, time-limited per-relay task queues
//! - [`authorization`]: Site-CN check guarding every handler
//! - [`handlers`]: Request orchestration over the repositories
//! - [`startup`]: Background configuration seeding with retry
//! - [`config`]: Environment configuration
//! - [`app`]: Owning context and lifespan hooks

pub mod app;
pub mod authorization;
pub mod config;
pub mod handlers;
pub mod relay;
pub mod startup;
pub mod task;

#[cfg(test)]
mod test_support;
