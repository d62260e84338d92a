//! Site REST API adapter.

mod site_client;

pub use site_client::{RestSiteConfigSource, SiteConnection};
