//! Port contracts for relay task queues.
//!
//! Ports define infrastructure-agnostic interfaces used by task services and
//! handlers.

pub mod repository;

pub use repository::{TaskRepository, TaskRepositoryError, TaskRepositoryResult};
