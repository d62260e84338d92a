//! Unit tests for the in-memory relay registry.

use crate::relay::{
    adapters::memory::{InMemoryRelayRepository, InMemorySiteConfigSource},
    domain::{Relay, RelayId},
    ports::{CheckmkApiError, RelayRepository, SiteRelay},
};
use crate::test_support::ManualClock;
use chrono::TimeDelta;
use rstest::{fixture, rstest};

#[fixture]
fn registry() -> InMemoryRelayRepository {
    InMemoryRelayRepository::new()
}

fn relay_id(raw: &str) -> RelayId {
    RelayId::new(raw).expect("valid relay id")
}

#[rstest]
#[tokio::test]
async fn add_relay_is_idempotent(registry: InMemoryRelayRepository) {
    let clock = ManualClock::new();
    let first = Relay::new(relay_id("relay-a"), &clock);
    clock.advance(TimeDelta::seconds(30));
    let second = Relay::new(relay_id("relay-a"), &clock).with_alias("later");

    let added_first = registry.add_relay(&first).await.expect("add first");
    let added_second = registry.add_relay(&second).await.expect("add second");

    assert!(added_first);
    assert!(!added_second);
    let all = registry.list_all().await.expect("list relays");
    assert_eq!(all, vec![first]);
}

#[rstest]
#[tokio::test]
async fn contains_reflects_registration_and_removal(registry: InMemoryRelayRepository) {
    let clock = ManualClock::new();
    let id = relay_id("relay-a");
    assert!(!registry.contains(&id).await.expect("contains"));

    registry
        .add_relay(&Relay::new(id.clone(), &clock))
        .await
        .expect("add relay");
    assert!(registry.contains(&id).await.expect("contains"));

    let removed = registry.remove_relay(&id).await.expect("remove relay");
    assert_eq!(removed.map(|relay| relay.id().clone()), Some(id.clone()));
    assert!(!registry.contains(&id).await.expect("contains"));
    assert!(registry.remove_relay(&id).await.expect("remove again").is_none());
}

#[rstest]
#[tokio::test]
async fn list_all_is_ordered_by_identifier(registry: InMemoryRelayRepository) {
    let clock = ManualClock::new();
    for raw in ["relay-c", "relay-a", "relay-b"] {
        registry
            .add_relay(&Relay::new(relay_id(raw), &clock))
            .await
            .expect("add relay");
    }

    let ids: Vec<String> = registry
        .list_all()
        .await
        .expect("list relays")
        .iter()
        .map(|relay| relay.id().to_string())
        .collect();

    assert_eq!(ids, vec!["relay-a", "relay-b", "relay-c"]);
}

#[rstest]
#[tokio::test]
async fn clones_share_state(registry: InMemoryRelayRepository) {
    let clock = ManualClock::new();
    let clone = registry.clone();
    clone
        .add_relay(&Relay::new(relay_id("relay-a"), &clock))
        .await
        .expect("add relay");

    assert!(registry.contains(&relay_id("relay-a")).await.expect("contains"));
}

#[rstest]
#[tokio::test]
async fn from_source_populates_registry_with_aliases() {
    let clock = ManualClock::new();
    let source = InMemorySiteConfigSource::with_relays([
        SiteRelay::new(relay_id("relay-a")).with_alias("DMZ"),
        SiteRelay::new(relay_id("relay-b")),
    ]);

    let registry = InMemoryRelayRepository::from_source(&source, &clock)
        .await
        .expect("populate from source");

    let found = registry
        .find_by_id(&relay_id("relay-a"))
        .await
        .expect("lookup")
        .expect("relay-a registered");
    assert_eq!(found.alias(), Some("DMZ"));
    assert!(registry.contains(&relay_id("relay-b")).await.expect("contains"));
}

#[rstest]
#[tokio::test]
async fn from_source_surfaces_site_api_errors() {
    let clock = ManualClock::new();
    let source = InMemorySiteConfigSource::new();
    source.fail_next(CheckmkApiError::Decode("garbage".to_owned()));

    let result = InMemoryRelayRepository::from_source(&source, &clock).await;

    assert!(matches!(result, Err(CheckmkApiError::Decode(_))));
}
