//! Test helper functions for setting up simulations and entities.

use glam::Vec2;

use crate::arena::Arena;
use crate::clock::FixedStepClock;
use crate::config::ArenaConfig;
use crate::entity::{EntityRef, Obstacle, Pickup, Projectile};
use crate::input::InputState;
use crate::simulation::Simulation;
use crate::transform::{Extent, Transform};

/// Frame rate used by every test simulation.
pub const TEST_HZ: u32 = 60;

// =============================================================================
// Simulation Setup
// =============================================================================

/// Default arena driven by a 60 Hz fixed-step clock.
pub fn test_sim() -> Simulation<FixedStepClock> {
    sim_with(ArenaConfig::default())
}

/// Arena built from `config`, driven by a 60 Hz fixed-step clock.
pub fn sim_with(config: ArenaConfig) -> Simulation<FixedStepClock> {
    Simulation::fixed_step(config, TEST_HZ).expect("test config is valid")
}

/// Runs `ticks` ticks, asking `input` for the snapshot of each tick number.
pub fn run_ticks(
    sim: &mut Simulation<FixedStepClock>,
    ticks: u64,
    mut input: impl FnMut(u64) -> InputState,
) {
    for _ in 0..ticks {
        let next = sim.ticks() + 1;
        sim.tick(input(next));
    }
}

/// A reproducible input pattern that turns, thrusts and fires.
///
/// Fires every third tick, sweeps left for 40 ticks then right for 40, and
/// thrusts forward in short bursts.
pub fn scripted_input(tick: u64) -> InputState {
    let mut input = InputState::empty();
    if tick % 3 == 0 {
        input |= InputState::FIRE;
    }
    if (tick / 40) % 2 == 0 {
        input |= InputState::LEFT;
    } else {
        input |= InputState::RIGHT;
    }
    if tick % 50 < 5 {
        input |= InputState::UP;
    }
    if tick % 70 < 3 {
        input |= InputState::DOWN;
    }
    input
}

// =============================================================================
// Entity Spawning
// =============================================================================

/// Adds an obstacle with the given geometry and velocity.
pub fn spawn_test_obstacle(arena: &mut Arena, position: Vec2, side: u32, velocity: Vec2) -> EntityRef {
    arena.push_obstacle(Obstacle::new(
        Transform::new(position, Extent::new(side, side)).with_velocity(velocity),
    ))
}

/// Adds an unrotated 1x3 projectile.
pub fn spawn_test_projectile(arena: &mut Arena, position: Vec2, velocity: Vec2) -> EntityRef {
    arena.push_projectile(Projectile::new(
        Transform::new(position, Extent::new(1, 3)).with_velocity(velocity),
    ))
}

/// Adds a stationary 8x8 pickup.
pub fn spawn_test_pickup(arena: &mut Arena, position: Vec2) -> EntityRef {
    arena.push_pickup(Pickup::new(Transform::new(position, Extent::new(8, 8))))
}
