//! State hashing for determinism checks.
//!
//! Two runs from the same seed with the same inputs and clock must produce
//! the same digest after every tick.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use crate::arena::Arena;
use crate::entity::Body;
use crate::transform::Transform;

/// Deterministic digest of the whole arena.
///
/// Covers the score, the agent, and every entity in collection order,
/// including floats (as bit patterns) and despawn flags.
#[must_use]
pub fn state_digest(arena: &Arena) -> u64 {
    let mut hasher = DefaultHasher::new();

    arena.score().hash(&mut hasher);
    hash_body(arena.agent(), &mut hasher);

    // Collection lengths separate the sections.
    arena.projectiles().len().hash(&mut hasher);
    for p in arena.projectiles() {
        hash_body(p, &mut hasher);
        p.spent.hash(&mut hasher);
    }

    arena.obstacles().len().hash(&mut hasher);
    for o in arena.obstacles() {
        hash_body(o, &mut hasher);
        o.destroyed.hash(&mut hasher);
    }

    arena.pickups().len().hash(&mut hasher);
    for p in arena.pickups() {
        hash_body(p, &mut hasher);
        p.absorbed.hash(&mut hasher);
    }

    hasher.finish()
}

fn hash_body<B: Body, H: Hasher>(body: &B, hasher: &mut H) {
    B::KIND.hash(hasher);
    hash_transform(body.transform(), hasher);
}

fn hash_transform<H: Hasher>(t: &Transform, hasher: &mut H) {
    t.position.x.to_bits().hash(hasher);
    t.position.y.to_bits().hash(hasher);
    t.velocity.x.to_bits().hash(hasher);
    t.velocity.y.to_bits().hash(hasher);
    t.rotation.to_bits().hash(hasher);
    t.extent().hash(hasher);
}
