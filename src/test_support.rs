//! Shared helpers for unit tests.

use crate::relay::{
    domain::{Relay, RelayId},
    ports::{RelayRepository, RelayRepositoryResult},
};
use async_trait::async_trait;
use chrono::{DateTime, Local, TimeDelta, TimeZone, Utc};
use mockable::Clock;
use mockall::mock;
use std::sync::Mutex;

mock! {
    pub Relays {}

    #[async_trait]
    impl RelayRepository for Relays {
        async fn add_relay(&self, relay: &Relay) -> RelayRepositoryResult<bool>;
        async fn remove_relay(&self, relay_id: &RelayId) -> RelayRepositoryResult<Option<Relay>>;
        async fn contains(&self, relay_id: &RelayId) -> RelayRepositoryResult<bool>;
        async fn find_by_id(&self, relay_id: &RelayId) -> RelayRepositoryResult<Option<Relay>>;
        async fn list_all(&self) -> RelayRepositoryResult<Vec<Relay>>;
    }
}

/// Registry that reports a relay as registered on the first membership check
/// only, as if it were unregistered right after that check.
pub fn relays_unregistering_after_first_check() -> MockRelays {
    let mut relays = MockRelays::new();
    let mut checked = false;
    relays.expect_contains().returning(move |_| {
        let registered = !checked;
        checked = true;
        Ok(registered)
    });
    relays
}

/// Clock that only moves when told to.
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    /// Creates a clock fixed at 2025-01-01T00:00:00Z.
    ///
    /// # Panics
    ///
    /// Panics if the start instant cannot be represented.
    pub fn new() -> Self {
        let start = Utc
            .with_ymd_and_hms(2025, 1, 1, 0, 0, 0)
            .single()
            .expect("valid start instant");
        Self {
            now: Mutex::new(start),
        }
    }

    /// Moves the clock forward.
    pub fn advance(&self, delta: TimeDelta) {
        let mut now = self
            .now
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        *now += delta;
    }
}

impl Clock for ManualClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self
            .now
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

mod tests {
    use super::ManualClock;
    use chrono::{TimeDelta, TimeZone, Utc};
    use mockable::Clock;

    #[test]
    fn starts_at_a_fixed_instant_and_only_moves_when_advanced() {
        let clock = ManualClock::new();
        let start = Utc
            .with_ymd_and_hms(2025, 1, 1, 0, 0, 0)
            .single()
            .expect("valid instant");
        assert_eq!(clock.utc(), start);

        clock.advance(TimeDelta::seconds(61));
        assert_eq!(clock.utc(), start + TimeDelta::seconds(61));
    }
}
