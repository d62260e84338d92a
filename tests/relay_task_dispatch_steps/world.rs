//! Shared world state for relay task dispatch BDD scenarios.

use std::sync::Arc;

use relay_dispatch::{
    app::RelayDispatchApp,
    authorization::AuthorizedSite,
    config::RelayDispatchConfig,
    handlers::HandlerError,
    relay::{adapters::memory::InMemorySiteConfigSource, ports::SiteRelay},
    startup::SeedOutcome,
    task::domain::{Task, TaskQueuePolicy},
};
use rstest::fixture;

use crate::test_helpers::ManualClock;

/// Application type used by the BDD world.
pub type TestApp = RelayDispatchApp<InMemorySiteConfigSource, ManualClock>;

/// Task time-to-live used by every scenario.
pub const TTL_SECONDS: u64 = 60;
/// Pending-task ceiling used by every scenario.
pub const MAX_PENDING: usize = 2;

/// Scenario world for relay task dispatch behaviour tests.
pub struct DispatchWorld {
    /// Clock driving task expiry.
    pub clock: Arc<ManualClock>,
    /// Site configuration source shared with the application.
    pub source: InMemorySiteConfigSource,
    /// Relays the site reports.
    pub reported: Vec<SiteRelay>,
    /// Application under test.
    pub app: TestApp,
    /// Authorization token of the local site.
    pub site: AuthorizedSite,
    /// Tasks returned by the last configuration push.
    pub last_distribution: Vec<Task>,
    /// Error of the last failed request.
    pub last_error: Option<HandlerError>,
    /// Outcome of startup seeding.
    pub seed_outcome: Option<SeedOutcome>,
}

impl DispatchWorld {
    /// Creates a world around a fresh application.
    ///
    /// # Panics
    ///
    /// Panics when the fixed test configuration is rejected.
    #[must_use]
    pub fn new() -> Self {
        let clock = Arc::new(ManualClock::new());
        let source = InMemorySiteConfigSource::new();
        let mut config = RelayDispatchConfig::for_site("heute").expect("valid site name");
        config.queue_policy =
            TaskQueuePolicy::new(TTL_SECONDS, MAX_PENDING).expect("valid queue policy");
        let app = RelayDispatchApp::with_clock(&config, Arc::new(source.clone()), Arc::clone(&clock));
        let site = app.authorize(Some("heute")).expect("local site authorizes");
        Self {
            clock,
            source,
            reported: Vec::new(),
            app,
            site,
            last_distribution: Vec::new(),
            last_error: None,
            seed_outcome: None,
        }
    }

    /// Returns the relay's visible tasks.
    ///
    /// # Errors
    ///
    /// Returns an error when the handler rejects the request.
    pub fn visible_tasks(&self, relay: &str) -> Result<Vec<Task>, eyre::Report> {
        run_async(self.app.get_relay_tasks_handler().process(&self.site, relay))
            .map_err(|err| eyre::eyre!("listing tasks of {relay} failed: {err}"))
    }
}

impl Default for DispatchWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> DispatchWorld {
    DispatchWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
