//! Refreshes the relay registry from the site's configuration source.

use crate::relay::{
    domain::Relay,
    ports::{CheckmkApiError, RelayRepository, RelayRepositoryError, SiteConfigSource},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Service-level errors for registry synchronisation.
#[derive(Debug, Error)]
pub enum RelaySyncError {
    /// The site configuration source could not be queried.
    #[error(transparent)]
    SiteApi(#[from] CheckmkApiError),
    /// Registry operation failed.
    #[error(transparent)]
    Repository(#[from] RelayRepositoryError),
}

/// Outcome of one synchronisation pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelaySyncReport {
    /// Relays reported by the site.
    pub reported: usize,
    /// Relays that were not registered before this pass.
    pub added: usize,
}

/// Registers every relay the site reports.
///
/// Synchronisation is additive: relays missing from the site's answer stay
/// registered until removed explicitly.
#[derive(Clone)]
pub struct SiteRelaySync<R, S, C>
where
    R: RelayRepository,
    S: SiteConfigSource,
    C: Clock + Send + Sync,
{
    relays: Arc<R>,
    source: Arc<S>,
    clock: Arc<C>,
}

impl<R, S, C> SiteRelaySync<R, S, C>
where
    R: RelayRepository,
    S: SiteConfigSource,
    C: Clock + Send + Sync,
{
    /// Creates a synchronisation service.
    #[must_use]
    pub const fn new(relays: Arc<R>, source: Arc<S>, clock: Arc<C>) -> Self {
        Self {
            relays,
            source,
            clock,
        }
    }

    /// Queries the site and registers every reported relay.
    ///
    /// # Errors
    ///
    /// Returns [`RelaySyncError::SiteApi`] when the site cannot be queried and
    /// [`RelaySyncError::Repository`] when registration fails.
    pub async fn sync(&self) -> Result<RelaySyncReport, RelaySyncError> {
        let site_relays = self.source.list_relays().await?;
        let reported = site_relays.len();
        let mut added = 0;
        for site_relay in site_relays {
            let mut relay = Relay::new(site_relay.id, &*self.clock);
            if let Some(alias) = site_relay.alias {
                relay = relay.with_alias(alias);
            }
            if self.relays.add_relay(&relay).await? {
                tracing::debug!(relay_id = %relay.id(), "registered relay from site configuration");
                added += 1;
            }
        }
        Ok(RelaySyncReport { reported, added })
    }
}
