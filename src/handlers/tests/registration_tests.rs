//! Tests for relay registration handlers.

use super::{Harness, harness};
use crate::handlers::{
    CreateTaskHandler, CreateTaskRequest, HandlerError, RegisterRelayHandler,
    RegisterRelayRequest, UnregisterRelayHandler,
};
use crate::relay::{domain::RelayId, ports::RelayRepository};
use crate::task::ports::TaskRepository;
use rstest::rstest;
use std::sync::Arc;

#[rstest]
#[tokio::test]
async fn registering_twice_keeps_one_record(harness: Harness) {
    let handler = RegisterRelayHandler::new(Arc::clone(&harness.relays), Arc::clone(&harness.clock));

    let first = handler
        .process(
            &harness.site,
            RegisterRelayRequest::new("relay-a").with_alias("Edge"),
        )
        .await
        .expect("first registration");
    let second = handler
        .process(&harness.site, RegisterRelayRequest::new("relay-a"))
        .await
        .expect("second registration");

    assert!(first.created);
    assert!(!second.created);
    assert_eq!(second.relay, first.relay);
    assert_eq!(second.relay.alias(), Some("Edge"));
    assert_eq!(harness.relays.list_all().await.expect("list").len(), 1);
}

#[rstest]
#[tokio::test]
async fn registering_again_keeps_queued_tasks(harness: Harness) {
    let register =
        RegisterRelayHandler::new(Arc::clone(&harness.relays), Arc::clone(&harness.clock));
    register
        .process(&harness.site, RegisterRelayRequest::new("relay-a"))
        .await
        .expect("registered");
    CreateTaskHandler::new(
        Arc::clone(&harness.relays),
        Arc::clone(&harness.tasks),
        Arc::clone(&harness.clock),
    )
    .process(&harness.site, "relay-a", CreateTaskRequest::new("FETCH_AD_HOC", ""))
    .await
    .expect("task created");

    register
        .process(&harness.site, RegisterRelayRequest::new("relay-a"))
        .await
        .expect("registered again");

    let relay_id = RelayId::new("relay-a").expect("valid relay id");
    assert_eq!(harness.tasks.get_tasks(&relay_id).await.expect("list").len(), 1);
}

#[rstest]
#[tokio::test]
async fn registering_malformed_id_is_rejected(harness: Harness) {
    let err = RegisterRelayHandler::new(Arc::clone(&harness.relays), Arc::clone(&harness.clock))
        .process(&harness.site, RegisterRelayRequest::new("  "))
        .await
        .expect_err("malformed id");
    assert!(matches!(err, HandlerError::InvalidRequest(_)));
}

#[rstest]
#[tokio::test]
async fn unregistering_drops_relay_and_queue(harness: Harness) {
    let relay_id = harness.register("relay-a").await;
    CreateTaskHandler::new(
        Arc::clone(&harness.relays),
        Arc::clone(&harness.tasks),
        Arc::clone(&harness.clock),
    )
    .process(&harness.site, "relay-a", CreateTaskRequest::new("FETCH_AD_HOC", ""))
    .await
    .expect("task created");

    let response = UnregisterRelayHandler::new(
        Arc::clone(&harness.relays),
        Arc::clone(&harness.tasks),
    )
    .process(&harness.site, "relay-a")
    .await
    .expect("unregistered");

    assert_eq!(response.relay.id(), &relay_id);
    assert_eq!(response.dropped_tasks, 1);
    assert!(!harness.relays.contains(&relay_id).await.expect("contains"));
    assert!(harness.tasks.get_tasks(&relay_id).await.expect("list").is_empty());
}

#[rstest]
#[tokio::test]
async fn unregistering_unknown_relay_is_not_found(harness: Harness) {
    let err = UnregisterRelayHandler::new(Arc::clone(&harness.relays), Arc::clone(&harness.tasks))
        .process(&harness.site, "ghost")
        .await
        .expect_err("unknown relay");
    assert!(matches!(err, HandlerError::RelayNotFound(_)));
}
