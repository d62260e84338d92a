//! In-memory adapter implementations for the relay registry.

mod relay_registry;
mod site_source;

pub use relay_registry::InMemoryRelayRepository;
pub use site_source::InMemorySiteConfigSource;
