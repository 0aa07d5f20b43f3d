//! Scenario and determinism tests for the full tick.
//!
//! - `determinism.rs`: same seed, inputs and clock give identical arenas
//! - `integration.rs`: end-to-end scenarios through [`Simulation::tick`]
//! - `helpers.rs`: setup utilities and factory functions
//!
//! [`Simulation::tick`]: crate::simulation::Simulation::tick

mod helpers;
mod integration;

// Re-export for convenience
pub use helpers::*;
