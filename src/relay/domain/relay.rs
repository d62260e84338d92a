//! Relay registration record.

use super::RelayId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// A relay known to the site.
///
/// Registration never mutates after creation; re-registering an existing
/// relay keeps the original record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relay {
    id: RelayId,
    alias: Option<String>,
    registered_at: DateTime<Utc>,
}

impl Relay {
    /// Creates a relay registered at the clock's current time.
    #[must_use]
    pub fn new(id: RelayId, clock: &impl Clock) -> Self {
        Self {
            id,
            alias: None,
            registered_at: clock.utc(),
        }
    }

    /// Sets a human-readable alias. Blank aliases are ignored.
    #[must_use]
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        let raw_alias = alias.into();
        let trimmed = raw_alias.trim();
        self.alias = (!trimmed.is_empty()).then(|| trimmed.to_owned());
        self
    }

    /// Returns the relay identifier.
    #[must_use]
    pub const fn id(&self) -> &RelayId {
        &self.id
    }

    /// Returns the alias, if any.
    #[must_use]
    pub fn alias(&self) -> Option<&str> {
        self.alias.as_deref()
    }

    /// Returns the registration timestamp.
    #[must_use]
    pub const fn registered_at(&self) -> DateTime<Utc> {
        self.registered_at
    }
}
