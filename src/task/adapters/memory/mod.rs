//! In-memory adapter implementations for relay task queues.

mod task;

pub use task::InMemoryTaskRepository;
