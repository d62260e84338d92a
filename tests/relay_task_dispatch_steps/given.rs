//! Given steps for relay task dispatch BDD scenarios.

use super::world::{DispatchWorld, run_async};
use eyre::WrapErr;
use relay_dispatch::{
    handlers::{CreateTaskRequest, RegisterRelayRequest},
    relay::{domain::RelayId, ports::SiteRelay},
};
use rstest_bdd_macros::given;

#[given(r#"a registered relay "{relay}""#)]
fn a_registered_relay(world: &mut DispatchWorld, relay: String) -> Result<(), eyre::Report> {
    run_async(
        world
            .app
            .register_relay_handler()
            .process(&world.site, RegisterRelayRequest::new(relay)),
    )
    .wrap_err("register relay for scenario")?;
    Ok(())
}

#[given(r#"relay "{relay}" already holds {count:usize} pending tasks"#)]
fn relay_holds_pending_tasks(
    world: &mut DispatchWorld,
    relay: String,
    count: usize,
) -> Result<(), eyre::Report> {
    let handler = world.app.create_task_handler();
    for index in 0..count {
        let request = CreateTaskRequest::new("FETCH_AD_HOC", format!("filler-{index}"));
        run_async(handler.process(&world.site, &relay, request))
            .wrap_err("fill relay queue for scenario")?;
    }
    Ok(())
}

#[given(r#"the site reports relay "{relay}""#)]
fn site_reports_relay(world: &mut DispatchWorld, relay: String) -> Result<(), eyre::Report> {
    let id = RelayId::new(relay).wrap_err("site relay identifier")?;
    world.reported.push(SiteRelay::new(id));
    world.source.set_relays(world.reported.clone());
    Ok(())
}
