//! In-memory site configuration source.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, RwLock};

use crate::relay::ports::{CheckmkApiError, SiteApiResult, SiteConfigSource, SiteRelay};

/// In-memory site configuration source.
///
/// This adapter stands in for the site REST API without network access. It
/// can be told to fail a number of upcoming calls, which makes retry
/// behaviour observable in tests.
#[derive(Debug, Clone, Default)]
pub struct InMemorySiteConfigSource {
    state: Arc<RwLock<SiteSourceState>>,
}

#[derive(Debug, Default)]
struct SiteSourceState {
    relays: Vec<SiteRelay>,
    scripted_failures: VecDeque<CheckmkApiError>,
    calls: usize,
}

impl InMemorySiteConfigSource {
    /// Creates a source that reports no relays.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a source that reports the given relays.
    #[must_use]
    pub fn with_relays(relays: impl IntoIterator<Item = SiteRelay>) -> Self {
        let source = Self::default();
        source.set_relays(relays);
        source
    }

    /// Replaces the reported relays.
    pub fn set_relays(&self, relays: impl IntoIterator<Item = SiteRelay>) {
        let mut state = self
            .state
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        state.relays = relays.into_iter().collect();
    }

    /// Queues an error to be returned by the next call that has not already
    /// been scripted to fail.
    pub fn fail_next(&self, error: CheckmkApiError) {
        let mut state = self
            .state
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        state.scripted_failures.push_back(error);
    }

    /// Returns how many times the source has been queried.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.state
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .calls
    }
}

#[async_trait]
impl SiteConfigSource for InMemorySiteConfigSource {
    async fn list_relays(&self) -> SiteApiResult<Vec<SiteRelay>> {
        let mut state = self
            .state
            .write()
            .map_err(|err| CheckmkApiError::transport(std::io::Error::other(err.to_string())))?;
        state.calls += 1;
        if let Some(error) = state.scripted_failures.pop_front() {
            return Err(error);
        }
        Ok(state.relays.clone())
    }
}
