//! Collision reaction dispatch table.
//!
//! A reaction is what one participant does on receiving a partner. It is
//! chosen by [`reaction`] from the pair of kinds alone, so the table is a
//! single exhaustive `match` the compiler checks for coverage.
//!
//! | receiver | partner | reaction |
//! |---|---|---|
//! | Projectile | Obstacle | mark spent |
//! | Obstacle | Projectile | take the partner's velocity, mark destroyed |
//! | Pickup | Agent | mark absorbed |
//! | anything else | | none |
//!
//! Every reaction sets a flag or copies a value, so applying it again with
//! the same partner leaves the state unchanged.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::arena::Arena;
use crate::entity::{EntityKind, EntityRef};

/// Outcome of one participant receiving a partner.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub enum Reaction {
    /// No state change.
    None,
    /// Projectile is used up.
    Spend,
    /// Obstacle is destroyed and inherits `velocity`.
    Destroy {
        /// Partner velocity copied onto the obstacle.
        velocity: Vec2,
    },
    /// Pickup is absorbed by the agent.
    Absorb,
}

impl Reaction {
    /// Returns true if applying this reaction changes state.
    #[must_use]
    pub const fn is_effective(&self) -> bool {
        !matches!(self, Self::None)
    }
}

/// Looks up the reaction of `receiver` to a partner of kind `partner`.
#[must_use]
pub const fn reaction(receiver: EntityKind, partner: EntityKind, partner_velocity: Vec2) -> Reaction {
    use EntityKind::{Agent, Obstacle, Pickup, Projectile};

    match (receiver, partner) {
        (Projectile, Obstacle) => Reaction::Spend,
        (Obstacle, Projectile) => Reaction::Destroy {
            velocity: partner_velocity,
        },
        (Pickup, Agent) => Reaction::Absorb,
        (Agent, _)
        | (Projectile, Agent | Projectile | Pickup)
        | (Obstacle, Agent | Obstacle | Pickup)
        | (Pickup, Projectile | Obstacle | Pickup) => Reaction::None,
    }
}

/// Applies `reaction` to the entity behind `receiver`.
///
/// # Panics
///
/// Panics if `receiver` is stale or the reaction does not fit its kind.
pub fn apply(arena: &mut Arena, receiver: EntityRef, reaction: Reaction) {
    match reaction {
        Reaction::None => {}
        Reaction::Spend => arena.projectile_mut(receiver).spent = true,
        Reaction::Destroy { velocity } => {
            let obstacle = arena.obstacle_mut(receiver);
            obstacle.transform.velocity = velocity;
            obstacle.destroyed = true;
        }
        Reaction::Absorb => arena.pickup_mut(receiver).absorbed = true,
    }
}

/// Makes `receiver` react to `partner`. Returns the applied reaction.
///
/// # Panics
///
/// Panics if either handle is stale.
pub fn react(arena: &mut Arena, receiver: EntityRef, partner: EntityRef) -> Reaction {
    let outcome = reaction(receiver.kind(), partner.kind(), arena.velocity_of(partner));
    apply(arena, receiver, outcome);
    outcome
}
