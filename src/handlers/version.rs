//! Reports the running component version.

use crate::authorization::AuthorizedSite;

/// Version report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionInfo {
    /// Component version string.
    pub version: String,
}

/// Answers version queries from the site.
#[derive(Debug, Clone)]
pub struct GetVersionHandler {
    version: String,
}

impl GetVersionHandler {
    /// Creates a handler reporting the given version.
    #[must_use]
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
        }
    }

    /// Returns the version.
    #[must_use]
    pub fn process(&self, _site: &AuthorizedSite) -> VersionInfo {
        VersionInfo {
            version: self.version.clone(),
        }
    }
}

impl Default for GetVersionHandler {
    fn default() -> Self {
        Self::new(env!("CARGO_PKG_VERSION"))
    }
}
