//! Repository port for the set of relays valid for this site.

use crate::relay::domain::{Relay, RelayId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for relay repository operations.
pub type RelayRepositoryResult<T> = Result<T, RelayRepositoryError>;

/// Relay registry contract.
///
/// The registry is the only authority on which relay identities exist; the
/// task queue accepts relay identifiers only after they were checked here.
#[async_trait]
pub trait RelayRepository: Send + Sync {
    /// Registers a relay.
    ///
    /// Registration is idempotent: when a relay with the same identifier is
    /// already known the existing record is kept and `false` is returned.
    async fn add_relay(&self, relay: &Relay) -> RelayRepositoryResult<bool>;

    /// Removes a relay from the registry.
    ///
    /// Returns the removed record, or `None` when the relay was unknown.
    async fn remove_relay(&self, relay_id: &RelayId) -> RelayRepositoryResult<Option<Relay>>;

    /// Returns whether the relay is currently registered.
    async fn contains(&self, relay_id: &RelayId) -> RelayRepositoryResult<bool>;

    /// Finds a relay by identifier.
    async fn find_by_id(&self, relay_id: &RelayId) -> RelayRepositoryResult<Option<Relay>>;

    /// Returns all registered relays ordered by identifier.
    async fn list_all(&self) -> RelayRepositoryResult<Vec<Relay>>;
}

/// Errors returned by relay repository implementations.
#[derive(Debug, Clone, Error)]
pub enum RelayRepositoryError {
    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl RelayRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
