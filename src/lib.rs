//! kappa - deterministic text-coherence scoring
//!
//! The binary wires the engine and gateway crates together; the pieces it
//! needs beyond them live here so they can be tested without a process.

pub mod analyze;
pub mod logging;
pub mod settings;
