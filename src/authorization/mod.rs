//! Site-CN authorization for site-to-site requests.
//!
//! The mTLS-terminating layer forwards the certificate common name of the
//! calling site in a header. [`SiteAuthorizer`] compares it against the
//! locally configured site identity and, on success, issues an
//! [`AuthorizedSite`] token. Every handler takes that token by reference, so
//! handler logic is unreachable without a successful check.

mod authorizer;
mod site_cn;

pub use authorizer::{AuthorizationError, AuthorizedSite, SITE_CN_HEADER, SiteAuthorizer};
pub use site_cn::{SiteCn, SiteCnError};

#[cfg(test)]
mod tests;
