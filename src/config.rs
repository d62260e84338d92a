//! Process configuration loaded from the environment.

use crate::authorization::{SiteCn, SiteCnError};
use crate::relay::adapters::rest::SiteConnection;
use crate::startup::{RetryPolicy, RetryPolicyError};
use crate::task::domain::{TaskDomainError, TaskQueuePolicy};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

/// Name of the local site. Required.
pub const SITE_NAME_VAR: &str = "RELAY_DISPATCH_SITE_NAME";
/// Certificate common name of the local site.
pub const SITE_CN_VAR: &str = "RELAY_DISPATCH_SITE_CN";
/// Base URL of the site's web server.
pub const REST_API_URL_VAR: &str = "RELAY_DISPATCH_REST_API_URL";
/// Directory holding the automation secret.
pub const HELPER_CONFIG_DIR_VAR: &str = "RELAY_DISPATCH_HELPER_CONFIG_DIR";
/// Task time-to-live in seconds.
pub const TASK_TTL_SECS_VAR: &str = "RELAY_DISPATCH_TASK_TTL_SECS";
/// Pending-task ceiling per relay.
pub const MAX_PENDING_TASKS_VAR: &str = "RELAY_DISPATCH_MAX_PENDING_TASKS";
/// Attempts of the startup seeding job.
pub const RETRY_MAX_ATTEMPTS_VAR: &str = "RELAY_DISPATCH_RETRY_MAX_ATTEMPTS";
/// First retry delay in milliseconds.
pub const RETRY_INITIAL_DELAY_MS_VAR: &str = "RELAY_DISPATCH_RETRY_INITIAL_DELAY_MS";
/// Retry delay cap in milliseconds.
pub const RETRY_MAX_DELAY_MS_VAR: &str = "RELAY_DISPATCH_RETRY_MAX_DELAY_MS";
/// Seconds between eviction sweeps.
pub const EVICTION_INTERVAL_SECS_VAR: &str = "RELAY_DISPATCH_EVICTION_INTERVAL_SECS";
/// Whether the running edition supports relays.
pub const RELAYS_SUPPORTED_VAR: &str = "RELAY_DISPATCH_RELAYS_SUPPORTED";

const DEFAULT_REST_API_URL: &str = "http://localhost:80";
const DEFAULT_EVICTION_INTERVAL: Duration = Duration::from_secs(60);

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A required variable is unset or blank.
    #[error("{0} must be set")]
    Missing(&'static str),
    /// A variable could not be parsed.
    #[error("{key} has invalid value {value:?}: {reason}")]
    Invalid {
        /// Variable name.
        key: &'static str,
        /// Offending value.
        value: String,
        /// Parse failure.
        reason: String,
    },
    /// The site common name is invalid.
    #[error(transparent)]
    SiteCn(#[from] SiteCnError),
    /// The task queue policy is invalid.
    #[error(transparent)]
    QueuePolicy(#[from] TaskDomainError),
    /// The retry policy is invalid.
    #[error(transparent)]
    RetryPolicy(#[from] RetryPolicyError),
}

/// Settings for one relay dispatch process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayDispatchConfig {
    /// Name of the local site.
    pub site_name: String,
    /// Common name inbound site requests must present.
    pub site_cn: SiteCn,
    /// Base URL of the site's web server.
    pub rest_api_url: String,
    /// Directory holding the automation secret.
    pub helper_config_dir: PathBuf,
    /// Queue limits applied to every relay.
    pub queue_policy: TaskQueuePolicy,
    /// Retry policy of the startup seeding job.
    pub retry_policy: RetryPolicy,
    /// Interval between eviction sweeps.
    pub eviction_interval: Duration,
    /// Whether the running edition supports relays.
    pub relays_supported: bool,
}

impl RelayDispatchConfig {
    /// Returns the default configuration for a site.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::SiteCn`] when the site name is not a valid
    /// common name.
    pub fn for_site(name: impl Into<String>) -> Result<Self, ConfigError> {
        let site_name = name.into().trim().to_owned();
        let site_cn = SiteCn::new(&site_name)?;
        Ok(Self {
            helper_config_dir: default_helper_config_dir(&site_name),
            site_cn,
            site_name,
            rest_api_url: DEFAULT_REST_API_URL.to_owned(),
            queue_policy: TaskQueuePolicy::default(),
            retry_policy: RetryPolicy::default(),
            eviction_interval: DEFAULT_EVICTION_INTERVAL,
            relays_supported: true,
        })
    }

    /// Loads the configuration from process environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the site name is missing or any value is
    /// malformed or zero.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads the configuration through an arbitrary variable lookup.
    ///
    /// Unset and blank variables fall back to their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the site name is missing or any value is
    /// malformed or zero.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let vars = Lookup(lookup);
        let site_name = vars.get(SITE_NAME_VAR).ok_or(ConfigError::Missing(SITE_NAME_VAR))?;
        let mut config = Self::for_site(site_name)?;

        if let Some(cn) = vars.get(SITE_CN_VAR) {
            config.site_cn = SiteCn::new(cn)?;
        }
        if let Some(url) = vars.get(REST_API_URL_VAR) {
            config.rest_api_url = url;
        }
        if let Some(dir) = vars.get(HELPER_CONFIG_DIR_VAR) {
            config.helper_config_dir = PathBuf::from(dir);
        }

        let ttl_seconds = vars
            .parse(TASK_TTL_SECS_VAR)?
            .unwrap_or(TaskQueuePolicy::DEFAULT_TTL_SECONDS);
        let max_pending = vars
            .parse(MAX_PENDING_TASKS_VAR)?
            .unwrap_or(TaskQueuePolicy::DEFAULT_MAX_PENDING_TASKS_PER_RELAY);
        config.queue_policy = TaskQueuePolicy::new(ttl_seconds, max_pending)?;

        let max_attempts = vars
            .parse(RETRY_MAX_ATTEMPTS_VAR)?
            .unwrap_or(RetryPolicy::DEFAULT_MAX_ATTEMPTS);
        let initial_delay = vars
            .parse(RETRY_INITIAL_DELAY_MS_VAR)?
            .map_or(RetryPolicy::DEFAULT_INITIAL_DELAY, Duration::from_millis);
        let max_delay = vars
            .parse(RETRY_MAX_DELAY_MS_VAR)?
            .map_or(RetryPolicy::DEFAULT_MAX_DELAY, Duration::from_millis);
        config.retry_policy = RetryPolicy::new(max_attempts, initial_delay, max_delay)?;

        if let Some(secs) = vars.parse::<u64>(EVICTION_INTERVAL_SECS_VAR)? {
            if secs == 0 {
                return Err(ConfigError::Invalid {
                    key: EVICTION_INTERVAL_SECS_VAR,
                    value: secs.to_string(),
                    reason: "must be at least one second".to_owned(),
                });
            }
            config.eviction_interval = Duration::from_secs(secs);
        }
        if let Some(raw) = vars.get(RELAYS_SUPPORTED_VAR) {
            config.relays_supported = parse_flag(RELAYS_SUPPORTED_VAR, &raw)?;
        }

        Ok(config)
    }

    /// Returns the connection settings for the site REST API.
    #[must_use]
    pub fn site_connection(&self) -> SiteConnection {
        SiteConnection::new(
            self.rest_api_url.clone(),
            self.site_name.clone(),
            self.helper_config_dir.clone(),
        )
    }
}

struct Lookup<F>(F);

impl<F> Lookup<F>
where
    F: Fn(&str) -> Option<String>,
{
    fn get(&self, key: &str) -> Option<String> {
        (self.0)(key)
            .map(|value| value.trim().to_owned())
            .filter(|value| !value.is_empty())
    }

    fn parse<T>(&self, key: &'static str) -> Result<Option<T>, ConfigError>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        self.get(key)
            .map(|value| {
                value.parse().map_err(|err: T::Err| ConfigError::Invalid {
                    key,
                    reason: err.to_string(),
                    value,
                })
            })
            .transpose()
    }
}

fn parse_flag(key: &'static str, raw: &str) -> Result<bool, ConfigError> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::Invalid {
            key,
            value: raw.to_owned(),
            reason: "expected a boolean".to_owned(),
        }),
    }
}

fn default_helper_config_dir(site_name: &str) -> PathBuf {
    PathBuf::from(format!("/omd/sites/{site_name}/var/check_mk/agent_receiver"))
}
