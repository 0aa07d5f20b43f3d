//! Spawn factories and compaction.
//!
//! New entities are only ever built here: projectiles from the agent's
//! heading, obstacles on the arena border, pickups from destroyed obstacles.
//! Random draws happen in a fixed order so a seeded generator reproduces the
//! same arena.

use glam::Vec2;
use rand::Rng;

use crate::config::ArenaConfig;
use crate::entity::{pursuit, Agent, Obstacle, Pickup, Projectile};
use crate::transform::{Extent, Transform};

/// Smallest obstacle side.
pub const OBSTACLE_MIN_SIDE: u32 = 10;
/// Number of distinct obstacle side lengths (`10..=49`).
pub const OBSTACLE_SIDE_SPAN: u32 = 40;
/// Smallest pickup side.
pub const PICKUP_MIN_SIDE: u32 = 8;
/// Number of distinct pickup side lengths (`8..=11`).
pub const PICKUP_SIDE_SPAN: u32 = 4;
/// Largest random offset added to a derived pickup's velocity, per axis.
pub const PICKUP_SCATTER: f32 = 10.0;

/// Builds a projectile leaving the agent along its heading.
#[must_use]
pub fn fire(agent: &Agent, config: &ArenaConfig) -> Projectile {
    let t = &agent.transform;
    Projectile::new(
        Transform::new(t.position, config.projectile_size)
            .with_rotation(t.rotation)
            .with_velocity(agent.heading() * config.projectile_speed),
    )
}

/// Builds an obstacle at a random border point, aimed at `target`.
///
/// Draw order: edge axis, edge side, coordinate along the edge, width,
/// height.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn spawn_obstacle<R: Rng + ?Sized>(rng: &mut R, config: &ArenaConfig, target: Vec2) -> Obstacle {
    let (w, h) = (config.width as u32, config.height as u32);
    let on_vertical_edge = rng.gen_range(0..2) == 1;
    let position = if on_vertical_edge {
        let x = if rng.gen_range(0..2) == 1 { 0 } else { w };
        Vec2::new(x as f32, rng.gen_range(0..=h) as f32)
    } else {
        let y = if rng.gen_range(0..2) == 1 { 0 } else { h };
        Vec2::new(rng.gen_range(0..=w) as f32, y as f32)
    };

    let extent = Extent::new(
        OBSTACLE_MIN_SIDE + rng.gen_range(0..OBSTACLE_SIDE_SPAN),
        OBSTACLE_MIN_SIDE + rng.gen_range(0..OBSTACLE_SIDE_SPAN),
    );

    Obstacle::new(
        Transform::new(position, extent)
            .with_velocity(pursuit(position, target, config.obstacle_speed)),
    )
}

/// Appends the pickups released by a destroyed obstacle to `out`.
///
/// Releases `floor(width * height / 100)` pickups at the obstacle's position,
/// each moving at the obstacle's velocity times `burst` plus a random offset
/// in `(-10, 10)` per axis. Returns how many were appended.
pub fn derive_pickups<R: Rng + ?Sized>(
    rng: &mut R,
    obstacle: &Obstacle,
    burst: f32,
    out: &mut Vec<Pickup>,
) -> u32 {
    let source = &obstacle.transform;
    let count = obstacle.pickup_yield();
    for _ in 0..count {
        let height = PICKUP_MIN_SIDE + rng.gen_range(0..PICKUP_SIDE_SPAN);
        let width = PICKUP_MIN_SIDE + rng.gen_range(0..PICKUP_SIDE_SPAN);
        let mut scatter = Vec2::new(
            rng.gen::<f32>() * PICKUP_SCATTER,
            rng.gen::<f32>() * PICKUP_SCATTER,
        );
        if rng.gen_range(0..2) == 0 {
            scatter.x = -scatter.x;
        }
        if rng.gen_range(0..2) == 0 {
            scatter.y = -scatter.y;
        }

        out.push(Pickup::new(
            Transform::new(source.position, Extent::new(width, height))
                .with_rotation(source.rotation)
                .with_velocity(source.velocity * burst + scatter),
        ));
    }
    count
}

/// Removes every item matching `despawn`, keeping survivors in order.
///
/// Single pass, in place. Returns the number removed.
pub fn compact<T>(items: &mut Vec<T>, mut despawn: impl FnMut(&T) -> bool) -> usize {
    let before = items.len();
    items.retain(|item| !despawn(item));
    before - items.len()
}
