//! Step definitions for relay task dispatch scenarios.

mod given;
mod then;
mod when;
pub mod world;
