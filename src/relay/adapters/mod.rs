//! Adapter implementations for the relay registry and site source ports.
//!
//! - [`memory::InMemoryRelayRepository`]: process-wide in-memory registry
//! - [`memory::InMemorySiteConfigSource`]: scriptable site source for tests
//!   and offline operation
//! - [`rest::RestSiteConfigSource`]: client for the site REST API

pub mod memory;
pub mod rest;
