//! Entity kinds, handles, and per-variant state.
//!
//! This module provides:
//! - [`EntityKind`]: closed tag over the four variants
//! - [`EntityRef`]: non-owning handle into a per-variant collection
//! - [`components`]: the variant structs and their movement rules
//!
//! # Ownership
//!
//! The [`Arena`](crate::arena::Arena) owns one `Vec` per variant. Everything
//! else, in particular the collision grid, refers to entities through
//! [`EntityRef`] handles that are only valid until the next compaction.
//!
//! # Example
//!
//! ```
//! use orbfall_core::entity::{EntityKind, EntityRef};
//!
//! let handle = EntityRef::new(EntityKind::Obstacle, 3);
//! assert_eq!(handle.kind(), EntityKind::Obstacle);
//! assert_eq!(handle.index(), 3);
//! assert_eq!(handle.to_string(), "Obstacle#3");
//! ```

pub mod components;

use serde::{Deserialize, Serialize};
use std::fmt;

pub use components::{pursuit, Agent, Body, Obstacle, Pickup, Projectile};

/// Variant tag for every simulated entity.
///
/// Collision dispatch is keyed on a pair of kinds, see
/// [`crate::resolver::reaction`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    /// The player-controlled entity
    Agent,
    /// A shot fired by the agent
    Projectile,
    /// A drifting rock aimed at the agent
    Obstacle,
    /// A fragment that is pulled toward the agent
    Pickup,
}

impl EntityKind {
    /// All kinds in collection order.
    pub const ALL: [Self; 4] = [Self::Agent, Self::Projectile, Self::Obstacle, Self::Pickup];

    /// Returns `false` for pairs the resolver never tests.
    ///
    /// Projectiles pass through each other.
    #[must_use]
    pub const fn can_collide(self, other: Self) -> bool {
        !matches!((self, other), (Self::Projectile, Self::Projectile))
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Agent => write!(f, "Agent"),
            Self::Projectile => write!(f, "Projectile"),
            Self::Obstacle => write!(f, "Obstacle"),
            Self::Pickup => write!(f, "Pickup"),
        }
    }
}

/// Handle to an entity: its kind plus its index in that kind's collection.
///
/// Handles are transient. They are rebuilt every tick and must not be held
/// across a compaction, which shifts indices.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityRef {
    kind: EntityKind,
    index: u32,
}

impl EntityRef {
    /// Creates a handle.
    #[must_use]
    pub const fn new(kind: EntityKind, index: u32) -> Self {
        Self { kind, index }
    }

    /// Handle to the agent.
    pub const AGENT: Self = Self::new(EntityKind::Agent, 0);

    /// Handle to a projectile.
    #[must_use]
    pub const fn projectile(index: u32) -> Self {
        Self::new(EntityKind::Projectile, index)
    }

    /// Handle to an obstacle.
    #[must_use]
    pub const fn obstacle(index: u32) -> Self {
        Self::new(EntityKind::Obstacle, index)
    }

    /// Handle to a pickup.
    #[must_use]
    pub const fn pickup(index: u32) -> Self {
        Self::new(EntityKind::Pickup, index)
    }

    /// The variant this handle points into.
    #[must_use]
    pub const fn kind(self) -> EntityKind {
        self.kind
    }

    /// Index in the variant's collection.
    #[must_use]
    pub const fn index(self) -> usize {
        self.index as usize
    }
}

impl fmt::Debug for EntityRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EntityRef({}#{})", self.kind, self.index)
    }
}

impl fmt::Display for EntityRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.kind, self.index)
    }
}
