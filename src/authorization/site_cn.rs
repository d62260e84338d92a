//! Validated site certificate common name.

use std::fmt;
use thiserror::Error;

/// Errors raised when constructing a [`SiteCn`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SiteCnError {
    /// The common name is empty or whitespace.
    #[error("site common name must not be empty")]
    Empty,
    /// The common name contains control characters.
    #[error("site common name contains control characters: {0:?}")]
    ControlCharacters(String),
}

/// Certificate common name identifying a site.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SiteCn(String);

impl SiteCn {
    /// Creates a validated common name.
    ///
    /// Surrounding whitespace is trimmed; comparison is exact afterwards.
    ///
    /// # Errors
    ///
    /// Returns [`SiteCnError`] when the value is empty or contains control
    /// characters.
    pub fn new(value: impl AsRef<str>) -> Result<Self, SiteCnError> {
        let trimmed = value.as_ref().trim();
        if trimmed.is_empty() {
            return Err(SiteCnError::Empty);
        }
        if trimmed.chars().any(char::is_control) {
            return Err(SiteCnError::ControlCharacters(trimmed.to_owned()));
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the common name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for SiteCn {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for SiteCn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
