//! Core library for homeowner-association meeting protocols.
//!
//! The `meetings` module carries the domain model, the placeholder engine
//! used inside agenda descriptions, the protocol document assembly, and the
//! boundary to the headless PDF renderer. `config`, `telemetry`, and
//! `error` provide the service-wide plumbing shared with the API crate.

pub mod config;
pub mod error;
pub mod meetings;
pub mod telemetry;
