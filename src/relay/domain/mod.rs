//! Domain model for relay registration.
//!
//! A relay is identified by the common name of its client certificate. The
//! registry only needs the identity, an optional alias, and the time the relay
//! became known to the site.

mod error;
mod ids;
mod relay;

pub use error::RelayDomainError;
pub use ids::RelayId;
pub use relay::Relay;
