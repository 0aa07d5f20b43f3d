//! Per-variant entity state and motion rules.
//!
//! Every variant exclusively owns its [`Transform`] plus the flag that feeds
//! its despawn predicate. Collision reactions live in
//! [`crate::resolver::reaction`]; this module only holds the movement rules.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::transform::{Aabb, Extent, Transform};

use super::EntityKind;

/// Biased pursuit vector from `from` toward `to`.
///
/// The denominator is `|dx| + |dy| / k`, not the Euclidean distance, so the
/// result is not unit length and favours the vertical axis for `k > 1`.
/// A zero denominator (the two points coincide) yields zero.
#[must_use]
pub fn pursuit(from: Vec2, to: Vec2, k: f32) -> Vec2 {
    let delta = to - from;
    let denom = delta.x.abs() + delta.y.abs() / k;
    if denom == 0.0 {
        return Vec2::ZERO;
    }
    delta / denom
}

/// Capability shared by every variant: it has a transform and therefore a
/// bounding box.
pub trait Body {
    /// The variant of this body.
    const KIND: EntityKind;

    /// Borrow the transform.
    fn transform(&self) -> &Transform;

    /// Bounding box derived from the transform.
    fn bounds(&self) -> Aabb {
        self.transform().bounds()
    }
}

// =============================================================================
// Agent
// =============================================================================

/// The single player-controlled entity.
///
/// The agent's velocity is its heading: `(sin r, cos r)` with `y` pointing up
/// the screen. It only moves when thrust input is applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    /// Position, heading and extent.
    pub transform: Transform,
}

impl Agent {
    /// Creates an agent at `position`, heading up the screen.
    #[must_use]
    pub fn new(position: Vec2, extent: Extent) -> Self {
        Self {
            transform: Transform::new(position, extent).with_velocity(Vec2::new(0.0, 1.0)),
        }
    }

    /// Turns by `delta` radians and recomputes the heading.
    pub fn rotate(&mut self, delta: f32) {
        let t = &mut self.transform;
        t.rotation += delta;
        t.velocity = Vec2::new(t.rotation.sin(), t.rotation.cos());
    }

    /// Moves one step along the heading.
    pub fn thrust_forward(&mut self) {
        self.transform.advance_screen_up();
    }

    /// Moves one step against the heading.
    pub fn thrust_backward(&mut self) {
        let t = &mut self.transform;
        t.position.x -= t.velocity.x;
        t.position.y += t.velocity.y;
    }

    /// Current heading vector.
    #[must_use]
    pub fn heading(&self) -> Vec2 {
        self.transform.velocity
    }
}

impl Body for Agent {
    const KIND: EntityKind = EntityKind::Agent;

    fn transform(&self) -> &Transform {
        &self.transform
    }
}

// =============================================================================
// Projectile
// =============================================================================

/// A shot fired by the agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    /// Position, velocity and extent.
    pub transform: Transform,
    /// Set once the projectile has hit an obstacle.
    pub spent: bool,
}

impl Projectile {
    /// Creates a live projectile.
    #[must_use]
    pub const fn new(transform: Transform) -> Self {
        Self {
            transform,
            spent: false,
        }
    }

    /// Advances one tick. The vertical component travels up the screen.
    pub fn advance(&mut self) {
        self.transform.advance_screen_up();
    }

    /// Spent, or fully outside the arena.
    #[must_use]
    pub fn should_despawn(&self, width: f32, height: f32) -> bool {
        self.spent || self.bounds().is_outside(width, height)
    }
}

impl Body for Projectile {
    const KIND: EntityKind = EntityKind::Projectile;

    fn transform(&self) -> &Transform {
        &self.transform
    }
}

// =============================================================================
// Obstacle
// =============================================================================

/// A drifting rock spawned at the arena border.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    /// Position, velocity and extent.
    pub transform: Transform,
    /// Set once a projectile has hit this obstacle.
    pub destroyed: bool,
}

impl Obstacle {
    /// Creates an intact obstacle.
    #[must_use]
    pub const fn new(transform: Transform) -> Self {
        Self {
            transform,
            destroyed: false,
        }
    }

    /// Advances one tick.
    pub fn advance(&mut self) {
        self.transform.advance();
    }

    /// Number of pickups released when this obstacle is destroyed.
    #[must_use]
    pub const fn pickup_yield(&self) -> u32 {
        self.transform.extent().area() / 100
    }

    /// Destroyed, or fully outside the arena.
    #[must_use]
    pub fn should_despawn(&self, width: f32, height: f32) -> bool {
        self.destroyed || self.bounds().is_outside(width, height)
    }
}

impl Body for Obstacle {
    const KIND: EntityKind = EntityKind::Obstacle;

    fn transform(&self) -> &Transform {
        &self.transform
    }
}

// =============================================================================
// Pickup
// =============================================================================

/// A fragment released by a destroyed obstacle, pulled toward the agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pickup {
    /// Position, velocity and extent.
    pub transform: Transform,
    /// Set once the pickup has touched the agent.
    pub absorbed: bool,
}

impl Pickup {
    /// Creates a free pickup.
    #[must_use]
    pub const fn new(transform: Transform) -> Self {
        Self {
            transform,
            absorbed: false,
        }
    }

    /// Damps the current velocity, adds the pull toward `target`, then moves.
    pub fn attract(&mut self, target: Vec2, attraction: f32, damping: f32) {
        let t = &mut self.transform;
        let force = pursuit(t.position, target, attraction);
        t.velocity = t.velocity * damping + force;
        t.advance();
    }

    /// Absorbed pickups are removed and scored.
    #[must_use]
    pub const fn should_despawn(&self) -> bool {
        self.absorbed
    }
}

impl Body for Pickup {
    const KIND: EntityKind = EntityKind::Pickup;

    fn transform(&self) -> &Transform {
        &self.transform
    }
}
