//! Identifier parsing and relay existence checks shared by handlers.

use super::{HandlerError, HandlerResult};
use crate::relay::{domain::RelayId, ports::RelayRepository};
use crate::task::domain::TaskId;

/// Parses a relay identifier and checks that the relay is registered.
pub(super) async fn registered_relay<R>(relays: &R, raw: &str) -> HandlerResult<RelayId>
where
    R: RelayRepository + ?Sized,
{
    let relay_id = parse_relay_id(raw)?;
    if !relays.contains(&relay_id).await? {
        return Err(HandlerError::RelayNotFound(relay_id.to_string()));
    }
    Ok(relay_id)
}

pub(super) fn parse_relay_id(raw: &str) -> HandlerResult<RelayId> {
    RelayId::new(raw).map_err(|err| HandlerError::InvalidRequest(err.to_string()))
}

/// Parses a task identifier. A value that cannot name a task is reported
/// as not found, the same as an unknown or expired task.
pub(super) fn parse_task_id(relay_id: &RelayId, raw: &str) -> HandlerResult<TaskId> {
    raw.trim().parse().map_err(|_| HandlerError::TaskNotFound {
        relay_id: relay_id.to_string(),
        task_id: raw.to_owned(),
    })
}
