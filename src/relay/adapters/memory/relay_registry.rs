//! In-memory relay registry.

use async_trait::async_trait;
use mockable::Clock;
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use crate::relay::{
    adapters::rest::{RestSiteConfigSource, SiteConnection},
    domain::{Relay, RelayId},
    ports::{
        RelayRepository, RelayRepositoryError, RelayRepositoryResult, SiteApiResult,
        SiteConfigSource,
    },
};

/// Thread-safe in-memory relay registry.
///
/// Clones share the same underlying registry.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRelayRepository {
    state: Arc<RwLock<BTreeMap<RelayId, Relay>>>,
}

impl InMemoryRelayRepository {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a registry populated from the site REST API.
    ///
    /// # Errors
    ///
    /// Returns [`CheckmkApiError`](crate::relay::ports::CheckmkApiError) when
    /// the credentials cannot be loaded or the site cannot be queried.
    pub async fn from_site(
        connection: SiteConnection,
        clock: &impl Clock,
    ) -> SiteApiResult<Self> {
        let source = RestSiteConfigSource::new(connection)?;
        Self::from_source(&source, clock).await
    }

    /// Builds a registry populated from any site configuration source.
    ///
    /// # Errors
    ///
    /// Returns [`CheckmkApiError`](crate::relay::ports::CheckmkApiError) when
    /// the source fails.
    pub async fn from_source(
        source: &impl SiteConfigSource,
        clock: &impl Clock,
    ) -> SiteApiResult<Self> {
        let relays = source.list_relays().await?;
        let mut registry = BTreeMap::new();
        for site_relay in relays {
            let mut relay = Relay::new(site_relay.id.clone(), clock);
            if let Some(alias) = site_relay.alias {
                relay = relay.with_alias(alias);
            }
            registry.entry(site_relay.id).or_insert(relay);
        }
        Ok(Self {
            state: Arc::new(RwLock::new(registry)),
        })
    }
}

fn poisoned(err: &impl ToString) -> RelayRepositoryError {
    RelayRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl RelayRepository for InMemoryRelayRepository {
    async fn add_relay(&self, relay: &Relay) -> RelayRepositoryResult<bool> {
        let mut state = self.state.write().map_err(|err| poisoned(&err))?;
        if state.contains_key(relay.id()) {
            return Ok(false);
        }
        state.insert(relay.id().clone(), relay.clone());
        Ok(true)
    }

    async fn remove_relay(&self, relay_id: &RelayId) -> RelayRepositoryResult<Option<Relay>> {
        let mut state = self.state.write().map_err(|err| poisoned(&err))?;
        Ok(state.remove(relay_id))
    }

    async fn contains(&self, relay_id: &RelayId) -> RelayRepositoryResult<bool> {
        let state = self.state.read().map_err(|err| poisoned(&err))?;
        Ok(state.contains_key(relay_id))
    }

    async fn find_by_id(&self, relay_id: &RelayId) -> RelayRepositoryResult<Option<Relay>> {
        let state = self.state.read().map_err(|err| poisoned(&err))?;
        Ok(state.get(relay_id).cloned())
    }

    async fn list_all(&self) -> RelayRepositoryResult<Vec<Relay>> {
        let state = self.state.read().map_err(|err| poisoned(&err))?;
        Ok(state.values().cloned().collect())
    }
}

