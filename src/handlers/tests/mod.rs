//! Unit tests for the handler layer.

mod registration_tests;

use crate::authorization::{AuthorizedSite, SiteAuthorizer, SiteCn};
use crate::relay::{
    adapters::memory::InMemoryRelayRepository,
    domain::{Relay, RelayId},
    ports::RelayRepository,
};
use crate::task::{adapters::memory::InMemoryTaskRepository, domain::TaskQueuePolicy};
use crate::test_support::ManualClock;
use rstest::fixture;
use std::sync::Arc;

pub(super) const TTL_SECONDS: u64 = 60;
pub(super) const MAX_PENDING: usize = 2;

pub(super) struct Harness {
    pub relays: Arc<InMemoryRelayRepository>,
    pub tasks: Arc<InMemoryTaskRepository<ManualClock>>,
    pub clock: Arc<ManualClock>,
    pub site: AuthorizedSite,
}

impl Harness {
    pub async fn register(&self, raw: &str) -> RelayId {
        let id = RelayId::new(raw).expect("valid relay id");
        self.relays
            .add_relay(&Relay::new(id.clone(), &*self.clock))
            .await
            .expect("register relay");
        id
    }
}

#[fixture]
pub(super) fn harness() -> Harness {
    let clock = Arc::new(ManualClock::new());
    let policy = TaskQueuePolicy::new(TTL_SECONDS, MAX_PENDING).expect("valid policy");
    let site = SiteAuthorizer::new(SiteCn::new("heute").expect("valid site cn"))
        .authorize(Some("heute"))
        .expect("local site authorizes");
    Harness {
        relays: Arc::new(InMemoryRelayRepository::new()),
        tasks: Arc::new(InMemoryTaskRepository::with_clock(policy, Arc::clone(&clock))),
        clock,
        site,
    }
}
