//! Then steps for relay task dispatch BDD scenarios.

use super::world::DispatchWorld;
use relay_dispatch::{
    startup::SeedOutcome,
    task::domain::{ResultType, TaskType},
};
use rstest_bdd_macros::then;

#[then(r#"relay "{relay}" has {count:usize} visible tasks"#)]
fn relay_has_visible_tasks(
    world: &DispatchWorld,
    relay: String,
    count: usize,
) -> Result<(), eyre::Report> {
    let tasks = world.visible_tasks(&relay)?;
    if tasks.len() != count {
        return Err(eyre::eyre!(
            "expected {count} tasks for {relay}, found {}",
            tasks.len()
        ));
    }
    Ok(())
}

#[then(r#"the latest task of relay "{relay}" is an unresolved configuration task"#)]
fn latest_is_unresolved_configuration(
    world: &DispatchWorld,
    relay: String,
) -> Result<(), eyre::Report> {
    let tasks = world.visible_tasks(&relay)?;
    let latest = tasks
        .last()
        .ok_or_else(|| eyre::eyre!("relay {relay} has no tasks"))?;
    if latest.task_type() != TaskType::ActivateConfig || latest.result().is_some() {
        return Err(eyre::eyre!(
            "expected an unresolved configuration task, got {latest:?}"
        ));
    }
    Ok(())
}

#[then(r#"the latest task of relay "{relay}" has result "{result_type}" with payload "{payload}""#)]
fn latest_has_result(
    world: &DispatchWorld,
    relay: String,
    result_type: String,
    payload: String,
) -> Result<(), eyre::Report> {
    let expected = ResultType::try_from(result_type.as_str())?;
    let tasks = world.visible_tasks(&relay)?;
    let result = tasks
        .last()
        .and_then(|task| task.result().cloned())
        .ok_or_else(|| eyre::eyre!("latest task of {relay} has no result"))?;
    if result.result_type() != expected || result.payload() != payload {
        return Err(eyre::eyre!("unexpected result {result:?}"));
    }
    Ok(())
}

#[then(r#"only relay "{relay}" received a configuration task"#)]
fn only_relay_received_configuration(
    world: &DispatchWorld,
    relay: String,
) -> Result<(), eyre::Report> {
    let covered: Vec<&str> = world
        .last_distribution
        .iter()
        .map(|task| task.relay_id().as_str())
        .collect();
    if covered != [relay.as_str()] {
        return Err(eyre::eyre!("expected only {relay} to be covered, got {covered:?}"));
    }
    Ok(())
}

#[then(r#"the request fails with "{kind}""#)]
fn request_fails_with(world: &DispatchWorld, kind: String) -> Result<(), eyre::Report> {
    let err = world
        .last_error
        .as_ref()
        .ok_or_else(|| eyre::eyre!("expected the last request to fail"))?;
    let actual = format!("{:?}", err.kind());
    if actual != kind {
        return Err(eyre::eyre!("expected {kind}, got {actual} ({err})"));
    }
    Ok(())
}

#[then("seeding created {tasks:usize} tasks for {relays:usize} relays")]
fn seeding_created(world: &DispatchWorld, tasks: usize, relays: usize) -> Result<(), eyre::Report> {
    match &world.seed_outcome {
        Some(SeedOutcome::Seeded {
            tasks_created,
            relays_covered,
            ..
        }) if *tasks_created == tasks && *relays_covered == relays => Ok(()),
        other => Err(eyre::eyre!("unexpected seeding outcome {other:?}")),
    }
}
