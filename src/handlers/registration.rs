//! Relay registration and removal.

use super::{HandlerError, HandlerResult, lookup};
use crate::authorization::AuthorizedSite;
use crate::relay::{domain::Relay, ports::RelayRepository};
use crate::task::ports::TaskRepository;
use mockable::Clock;
use std::sync::Arc;

/// Request body for [`RegisterRelayHandler`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterRelayRequest {
    /// Relay identifier.
    pub relay_id: String,
    /// Optional display alias.
    pub alias: Option<String>,
}

impl RegisterRelayRequest {
    /// Creates a request without alias.
    #[must_use]
    pub fn new(relay_id: impl Into<String>) -> Self {
        Self {
            relay_id: relay_id.into(),
            alias: None,
        }
    }

    /// Sets the alias.
    #[must_use]
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }
}

/// Outcome of a registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterRelayResponse {
    /// The registered relay record.
    pub relay: Relay,
    /// `false` when the relay was already registered.
    pub created: bool,
}

/// Registers relays.
#[derive(Clone)]
pub struct RegisterRelayHandler<R, C>
where
    R: RelayRepository,
    C: Clock + Send + Sync,
{
    relays: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> RegisterRelayHandler<R, C>
where
    R: RelayRepository,
    C: Clock + Send + Sync,
{
    /// Creates the handler.
    #[must_use]
    pub const fn new(relays: Arc<R>, clock: Arc<C>) -> Self {
        Self { relays, clock }
    }

    /// Registers the relay. Registering a known relay keeps the existing
    /// record and its task queue.
    ///
    /// # Errors
    ///
    /// Returns [`HandlerError::InvalidRequest`] for malformed identifiers and
    /// registry errors unchanged.
    pub async fn process(
        &self,
        _site: &AuthorizedSite,
        request: RegisterRelayRequest,
    ) -> HandlerResult<RegisterRelayResponse> {
        let RegisterRelayRequest {
            relay_id: raw_relay_id,
            alias,
        } = request;
        let relay_id = lookup::parse_relay_id(&raw_relay_id)?;
        let mut relay = Relay::new(relay_id, &*self.clock);
        if let Some(name) = alias {
            relay = relay.with_alias(name);
        }

        let created = self.relays.add_relay(&relay).await?;
        if !created {
            if let Some(stored) = self.relays.find_by_id(relay.id()).await? {
                relay = stored;
            }
        }
        tracing::info!(relay_id = %relay.id(), created, "registered relay");
        Ok(RegisterRelayResponse { relay, created })
    }
}

/// Outcome of an unregistration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnregisterRelayResponse {
    /// The removed relay record.
    pub relay: Relay,
    /// Number of queued tasks dropped with the relay.
    pub dropped_tasks: usize,
}

/// Removes relays together with their task queues.
#[derive(Clone)]
pub struct UnregisterRelayHandler<R, T>
where
    R: RelayRepository,
    T: TaskRepository,
{
    relays: Arc<R>,
    tasks: Arc<T>,
}

impl<R, T> UnregisterRelayHandler<R, T>
where
    R: RelayRepository,
    T: TaskRepository,
{
    /// Creates the handler.
    #[must_use]
    pub const fn new(relays: Arc<R>, tasks: Arc<T>) -> Self {
        Self { relays, tasks }
    }

    /// Removes the relay and drops its queue.
    ///
    /// # Errors
    ///
    /// Returns [`HandlerError::RelayNotFound`] for unregistered relays.
    pub async fn process(
        &self,
        _site: &AuthorizedSite,
        raw_relay_id: &str,
    ) -> HandlerResult<UnregisterRelayResponse> {
        let relay_id = lookup::parse_relay_id(raw_relay_id)?;
        let relay = self
            .relays
            .remove_relay(&relay_id)
            .await?
            .ok_or_else(|| HandlerError::RelayNotFound(relay_id.to_string()))?;
        let dropped_tasks = self.tasks.remove_relay_tasks(&relay_id).await?;
        tracing::info!(%relay_id, dropped_tasks, "unregistered relay");
        Ok(UnregisterRelayResponse {
            relay,
            dropped_tasks,
        })
    }
}
