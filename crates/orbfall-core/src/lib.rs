//! # Orbfall Core
//!
//! Arena simulation core for Orbfall.
//!
//! This crate provides the deterministic, single-threaded simulation of a 2D
//! arena: one player-controlled agent, the projectiles it fires, obstacles
//! that drift in from the border, and pickups released when an obstacle is
//! destroyed.
//!
//! ## Architecture
//!
//! - **Transform**: position, velocity, rotation and extent; derives bounding boxes
//! - **Entities**: agent, projectiles, obstacles, pickups, addressed by handle
//! - **Grid**: spatial hash broad phase rebuilt every tick
//! - **Resolver**: per-cell pairwise narrow phase with a closed reaction table
//! - **Arena / Lifecycle**: collection ownership, spawning and compaction
//! - **Simulation**: the fixed-order tick
//!
//! ## Usage
//!
//! ```
//! use orbfall_core::{ArenaConfig, FixedStepClock, InputState, Simulation};
//!
//! let mut sim = Simulation::new(ArenaConfig::with_seed(7), FixedStepClock::from_hz(60))?;
//! for _ in 0..120 {
//!     sim.tick(InputState::FIRE | InputState::LEFT);
//! }
//! println!("score {} digest {:016x}", sim.score(), sim.digest());
//! # Ok::<(), orbfall_core::ConfigError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod arena;
pub mod clock;
pub mod config;
pub mod entity;
pub mod error;
pub mod grid;
pub mod hash;
pub mod input;
pub mod lifecycle;
pub mod resolver;
pub mod simulation;
pub mod transform;
pub mod view;

pub use arena::Arena;
pub use clock::{Clock, FixedStepClock, MonotonicClock};
pub use config::ArenaConfig;
pub use entity::{EntityKind, EntityRef};
pub use error::ConfigError;
pub use input::InputState;
pub use simulation::{Simulation, TickReport};
pub use view::{EntityView, VisualState};

#[cfg(test)]
mod tests;
