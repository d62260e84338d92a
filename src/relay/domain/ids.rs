//! Identifier type for the relay domain.

use super::RelayDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque relay identity derived from the relay's client-certificate common
/// name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RelayId(String);

impl RelayId {
    /// Upper bound of an X.509 common name.
    pub const MAX_LENGTH: usize = 64;

    /// Creates a validated relay identifier.
    ///
    /// Surrounding whitespace is trimmed.
    ///
    /// # Errors
    ///
    /// Returns [`RelayDomainError`] when the value is empty, contains
    /// whitespace or `/`, or is longer than [`Self::MAX_LENGTH`].
    pub fn new(value: impl Into<String>) -> Result<Self, RelayDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(RelayDomainError::EmptyRelayId);
        }
        if trimmed.chars().any(|ch| ch.is_whitespace() || ch == '/') {
            return Err(RelayDomainError::InvalidRelayId(raw));
        }
        if trimmed.chars().count() > Self::MAX_LENGTH {
            return Err(RelayDomainError::RelayIdTooLong {
                max: Self::MAX_LENGTH,
                value: raw,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the identifier as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for RelayId {
    type Error = RelayDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<RelayId> for String {
    fn from(value: RelayId) -> Self {
        value.0
    }
}

impl AsRef<str> for RelayId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for RelayId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
