//! Request handlers for the relay-facing and site-facing task API.
//!
//! Handlers sit between the transport layer and the repositories. Each one
//! takes an [`AuthorizedSite`](crate::authorization::AuthorizedSite) token,
//! parses the raw identifiers it receives, checks that the referenced relay
//! exists before any task repository call, and maps repository outcomes onto
//! [`HandlerError`].

mod activate_config;
mod create_task;
mod error;
mod lookup;
mod registration;
mod tasks;
mod update_task;
mod version;

pub use activate_config::{ActivateConfigHandler, ActivateConfigResponse};
pub use create_task::{CreateTaskHandler, CreateTaskRequest};
pub use error::{ErrorKind, HandlerError, HandlerResult};
pub use registration::{
    RegisterRelayHandler, RegisterRelayRequest, RegisterRelayResponse, UnregisterRelayHandler,
    UnregisterRelayResponse,
};
pub use tasks::{GetRelayTaskHandler, GetRelayTasksHandler};
pub use update_task::{UpdateTaskHandler, UpdateTaskRequest};
pub use version::{GetVersionHandler, VersionInfo};

#[cfg(test)]
mod tests;
