//! Client for the relay collection of the site REST API.
//!
//! The site exposes its configured relays at
//! `<rest_api_url>/<site>/check_mk/api/1.0/domain-types/relay/collections/all`.
//! Requests authenticate as the site's internal automation user whose secret
//! is stored in the helper configuration directory.

use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::relay::{
    domain::RelayId,
    ports::{CheckmkApiError, SiteApiResult, SiteConfigSource, SiteRelay},
};

const AUTOMATION_USER: &str = "automation";
const AUTOMATION_SECRET_FILE: &str = "automation.secret";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const MAX_ERROR_BODY_CHARS: usize = 512;

/// Location and identity of the local site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteConnection {
    /// Base URL of the site's web server, e.g. `http://localhost:80`.
    pub rest_api_url: String,
    /// Name of the local site.
    pub site_name: String,
    /// Directory holding helper configuration such as the automation secret.
    pub helper_config_dir: PathBuf,
}

impl SiteConnection {
    /// Creates connection settings.
    #[must_use]
    pub fn new(
        rest_api_url: impl Into<String>,
        site_name: impl Into<String>,
        helper_config_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            rest_api_url: rest_api_url.into(),
            site_name: site_name.into(),
            helper_config_dir: helper_config_dir.into(),
        }
    }

    /// Returns the URL of the relay collection.
    #[must_use]
    pub fn relay_collection_url(&self) -> String {
        format!(
            "{}/{}/check_mk/api/1.0/domain-types/relay/collections/all",
            self.rest_api_url.trim_end_matches('/'),
            self.site_name.trim_matches('/'),
        )
    }
}

/// [`SiteConfigSource`] backed by the site REST API.
#[derive(Debug, Clone)]
pub struct RestSiteConfigSource {
    connection: SiteConnection,
    client: reqwest::Client,
}

impl RestSiteConfigSource {
    /// Creates a client.
    ///
    /// The automation secret is read from `helper_config_dir` on every
    /// request, so a secret written after startup is picked up by the next
    /// attempt.
    ///
    /// # Errors
    ///
    /// Returns [`CheckmkApiError::Transport`] when the HTTP client cannot be
    /// built.
    pub fn new(connection: SiteConnection) -> SiteApiResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(CheckmkApiError::transport)?;
        Ok(Self { connection, client })
    }

    /// Returns the connection settings.
    #[must_use]
    pub const fn connection(&self) -> &SiteConnection {
        &self.connection
    }
}

fn read_automation_secret(helper_config_dir: &Path) -> SiteApiResult<String> {
    let path = helper_config_dir.join(AUTOMATION_SECRET_FILE);
    let raw = std::fs::read_to_string(&path)
        .map_err(|err| CheckmkApiError::Credentials(format!("{}: {err}", path.display())))?;
    let secret = raw.trim();
    if secret.is_empty() {
        return Err(CheckmkApiError::Credentials(format!(
            "{} is empty",
            path.display()
        )));
    }
    Ok(secret.to_owned())
}

#[derive(Debug, Deserialize)]
struct RelayCollection {
    value: Vec<RelayObject>,
}

#[derive(Debug, Deserialize)]
struct RelayObject {
    id: String,
    #[serde(default)]
    extensions: RelayExtensions,
}

#[derive(Debug, Default, Deserialize)]
struct RelayExtensions {
    alias: Option<String>,
    siteid: Option<String>,
}

/// Parses a relay collection response, keeping relays assigned to `site_name`.
///
/// Relays without a site assignment are kept.
pub(crate) fn parse_relay_collection(
    body: &str,
    site_name: &str,
) -> SiteApiResult<Vec<SiteRelay>> {
    let collection: RelayCollection =
        serde_json::from_str(body).map_err(|err| CheckmkApiError::Decode(err.to_string()))?;
    collection
        .value
        .into_iter()
        .filter(|object| {
            object
                .extensions
                .siteid
                .as_deref()
                .is_none_or(|siteid| siteid == site_name)
        })
        .map(|object| {
            let id = RelayId::new(object.id)
                .map_err(|err| CheckmkApiError::Decode(err.to_string()))?;
            let relay = SiteRelay::new(id);
            Ok(match object.extensions.alias {
                Some(alias) => relay.with_alias(alias),
                None => relay,
            })
        })
        .collect()
}

fn truncate_body(body: &str) -> String {
    body.chars().take(MAX_ERROR_BODY_CHARS).collect()
}

#[async_trait]
impl SiteConfigSource for RestSiteConfigSource {
    async fn list_relays(&self) -> SiteApiResult<Vec<SiteRelay>> {
        let secret = read_automation_secret(&self.connection.helper_config_dir)?;
        let url = self.connection.relay_collection_url();
        tracing::debug!(%url, "querying site relay configuration");
        let response = self
            .client
            .get(&url)
            .header(ACCEPT, "application/json")
            .header(AUTHORIZATION, format!("Bearer {AUTOMATION_USER} {secret}"))
            .send()
            .await
            .map_err(CheckmkApiError::transport)?;

        let status = response.status();
        let body = response.text().await.map_err(CheckmkApiError::transport)?;
        if !status.is_success() {
            return Err(CheckmkApiError::Status {
                status: status.as_u16(),
                body: truncate_body(&body),
            });
        }
        parse_relay_collection(&body, &self.connection.site_name)
    }
}
