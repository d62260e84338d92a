//! Comparison of presented and configured site identities.

use super::SiteCn;
use thiserror::Error;

/// Header carrying the calling site's certificate common name.
pub const SITE_CN_HEADER: &str = "verified-site-cn";

/// Reasons a request fails site authorization.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthorizationError {
    /// The request carried no site common name.
    #[error("request carries no site common name")]
    MissingSiteCn,
    /// The presented common name is not the local site's.
    #[error("site common name mismatch: expected {expected}, presented {presented}")]
    SiteCnMismatch {
        /// Locally configured common name.
        expected: String,
        /// Common name presented by the caller.
        presented: String,
    },
}

/// Proof that a request passed site-CN authorization.
///
/// Only [`SiteAuthorizer::authorize`] constructs this value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorizedSite {
    site_cn: SiteCn,
}

impl AuthorizedSite {
    /// Returns the authorized site's common name.
    #[must_use]
    pub const fn site_cn(&self) -> &SiteCn {
        &self.site_cn
    }
}

/// Checks inbound site identities against the local site.
#[derive(Debug, Clone)]
pub struct SiteAuthorizer {
    local: SiteCn,
}

impl SiteAuthorizer {
    /// Creates an authorizer for the given local site identity.
    #[must_use]
    pub const fn new(local: SiteCn) -> Self {
        Self { local }
    }

    /// Returns the locally configured common name.
    #[must_use]
    pub const fn local_site_cn(&self) -> &SiteCn {
        &self.local
    }

    /// Authorizes a request given the value of [`SITE_CN_HEADER`].
    ///
    /// # Errors
    ///
    /// Returns [`AuthorizationError::MissingSiteCn`] when no value (or a blank
    /// one) is presented, and [`AuthorizationError::SiteCnMismatch`] when it
    /// differs from the local site.
    pub fn authorize(&self, presented: Option<&str>) -> Result<AuthorizedSite, AuthorizationError> {
        let site_cn = presented
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .ok_or(AuthorizationError::MissingSiteCn)?;

        if site_cn != self.local.as_str() {
            tracing::warn!(
                expected = %self.local,
                presented = site_cn,
                "rejecting request from foreign site"
            );
            return Err(AuthorizationError::SiteCnMismatch {
                expected: self.local.to_string(),
                presented: site_cn.to_owned(),
            });
        }

        Ok(AuthorizedSite {
            site_cn: self.local.clone(),
        })
    }
}
