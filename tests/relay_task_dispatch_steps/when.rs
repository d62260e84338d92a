//! When steps for relay task dispatch BDD scenarios.

use super::world::{DispatchWorld, run_async};
use chrono::TimeDelta;
use relay_dispatch::handlers::{CreateTaskRequest, UpdateTaskRequest};
use rstest_bdd_macros::when;

#[when("configuration is activated for all relays")]
fn activate_configuration(world: &mut DispatchWorld) -> Result<(), eyre::Report> {
    let response = run_async(world.app.activate_config_handler().process(&world.site))
        .map_err(|err| eyre::eyre!("configuration push failed: {err}"))?;
    world.last_distribution = response.tasks;
    Ok(())
}

#[when(r#"relay "{relay}" reports "{result_type}" with payload "{payload}" for its latest task"#)]
fn relay_reports_result(
    world: &mut DispatchWorld,
    relay: String,
    result_type: String,
    payload: String,
) -> Result<(), eyre::Report> {
    let tasks = world.visible_tasks(&relay)?;
    let latest = tasks
        .last()
        .ok_or_else(|| eyre::eyre!("relay {relay} has no tasks to report on"))?;
    run_async(world.app.update_task_handler().process(
        &world.site,
        &relay,
        &latest.id().to_string(),
        UpdateTaskRequest::new(result_type, payload),
    ))
    .map_err(|err| eyre::eyre!("recording result failed: {err}"))?;
    Ok(())
}

#[when(r#"another task is created for relay "{relay}""#)]
fn another_task_is_created(world: &mut DispatchWorld, relay: String) {
    let result = run_async(world.app.create_task_handler().process(
        &world.site,
        &relay,
        CreateTaskRequest::new("FETCH_AD_HOC", "extra"),
    ));
    world.last_error = result.err();
}

#[when(r#"relay "{relay}" lists its tasks"#)]
fn relay_lists_tasks(world: &mut DispatchWorld, relay: String) {
    let result = run_async(world.app.get_relay_tasks_handler().process(&world.site, &relay));
    world.last_error = result.err();
}

#[when("{seconds:u32} seconds pass")]
fn seconds_pass(world: &mut DispatchWorld, seconds: u32) {
    world.clock.advance(TimeDelta::seconds(i64::from(seconds)));
}

#[when("the application starts")]
fn application_starts(world: &mut DispatchWorld) {
    world.app.start(true);
    world.seed_outcome = run_async(world.app.wait_for_seeding());
}
