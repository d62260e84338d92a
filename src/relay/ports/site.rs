//! Port for the site's own configuration source.
//!
//! The site REST API is the authority on which relays have been configured.
//! It is reached over the network and may fail transiently; every failure is
//! reported as [`CheckmkApiError`] so callers can decide whether to retry.

use crate::relay::domain::RelayId;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for site configuration source operations.
pub type SiteApiResult<T> = Result<T, CheckmkApiError>;

/// A relay as reported by the site's configuration source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteRelay {
    /// Relay identifier.
    pub id: RelayId,
    /// Configured alias, if any.
    pub alias: Option<String>,
}

impl SiteRelay {
    /// Creates a relay snapshot without alias.
    #[must_use]
    pub const fn new(id: RelayId) -> Self {
        Self { id, alias: None }
    }

    /// Sets the alias.
    #[must_use]
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }
}

/// Enumerates the relays configured for the local site.
#[async_trait]
pub trait SiteConfigSource: Send + Sync {
    /// Lists every relay configured for the site.
    ///
    /// # Errors
    ///
    /// Returns [`CheckmkApiError`] when the site cannot be reached or its
    /// response cannot be interpreted.
    async fn list_relays(&self) -> SiteApiResult<Vec<SiteRelay>>;
}

/// Failure to obtain relay configuration from the site.
#[derive(Debug, Clone, Error)]
pub enum CheckmkApiError {
    /// The request did not complete.
    #[error("site REST API request failed: {0}")]
    Transport(Arc<dyn std::error::Error + Send + Sync>),

    /// The site answered with a non-success status.
    #[error("site REST API returned status {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, possibly truncated.
        body: String,
    },

    /// The response body did not match the expected shape.
    #[error("unexpected site REST API response: {0}")]
    Decode(String),

    /// The credentials for the site REST API could not be loaded.
    #[error("site REST API credentials unavailable: {0}")]
    Credentials(String),
}

impl CheckmkApiError {
    /// Wraps a transport error.
    pub fn transport(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Transport(Arc::new(err))
    }
}
