//! Arena module: the owner of every simulated entity.
//!
//! The Arena holds the agent, one collection per transient variant, and the
//! cumulative score. It is the sole mutator of collection membership:
//! entities enter through its spawn methods and leave through
//! [`Arena::compact`].
//!
//! # Handles
//!
//! Other components address entities through [`EntityRef`] handles. Handle
//! lookups panic on a stale handle: a handle that does not resolve means the
//! grid and the collections disagree, and continuing would break the
//! symmetry of pairwise reactions.
//!
//! # Example
//!
//! ```
//! use glam::Vec2;
//! use orbfall_core::arena::Arena;
//! use orbfall_core::config::ArenaConfig;
//! use orbfall_core::entity::{Obstacle, Projectile};
//! use orbfall_core::transform::{Extent, Transform};
//!
//! let config = ArenaConfig::default();
//! let mut arena = Arena::new(&config);
//!
//! let rock = Obstacle::new(Transform::new(Vec2::new(-100.0, 10.0), Extent::new(20, 20)));
//! arena.push_obstacle(rock);
//! arena.push_projectile(Projectile::new(Transform::new(Vec2::new(50.0, 50.0), Extent::new(1, 3))));
//!
//! // The obstacle is fully outside the arena, so compaction removes it.
//! let removed = arena.compact();
//! assert_eq!(removed.obstacles, 1);
//! assert_eq!(arena.obstacles().len(), 0);
//! assert_eq!(arena.projectiles().len(), 1);
//! ```

use glam::Vec2;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::ArenaConfig;
use crate::entity::{Agent, Body, EntityKind, EntityRef, Obstacle, Pickup, Projectile};
use crate::grid::SpatialGrid;
use crate::lifecycle::compact;
use crate::transform::Aabb;

/// Counts of entities removed by one compaction.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Removed {
    /// Spent or departed projectiles
    pub projectiles: usize,
    /// Destroyed or departed obstacles
    pub obstacles: usize,
    /// Absorbed pickups (each one scored)
    pub pickups: usize,
}

/// Container for every entity in the simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    width: f32,
    height: f32,
    agent: Agent,
    projectiles: Vec<Projectile>,
    obstacles: Vec<Obstacle>,
    pickups: Vec<Pickup>,
    score: u32,
}

impl Arena {
    /// Creates an arena holding only the agent at its start position.
    #[must_use]
    pub fn new(config: &ArenaConfig) -> Self {
        Self {
            width: config.width,
            height: config.height,
            agent: Agent::new(config.agent_start, config.agent_size),
            projectiles: Vec::with_capacity(500),
            obstacles: Vec::with_capacity(50),
            pickups: Vec::with_capacity(250),
            score: 0,
        }
    }

    /// Arena width.
    #[must_use]
    pub const fn width(&self) -> f32 {
        self.width
    }

    /// Arena height.
    #[must_use]
    pub const fn height(&self) -> f32 {
        self.height
    }

    /// Cumulative score.
    #[must_use]
    pub const fn score(&self) -> u32 {
        self.score
    }

    /// The agent.
    #[must_use]
    pub const fn agent(&self) -> &Agent {
        &self.agent
    }

    /// The agent, mutably.
    pub fn agent_mut(&mut self) -> &mut Agent {
        &mut self.agent
    }

    /// Live projectiles in spawn order.
    #[must_use]
    pub fn projectiles(&self) -> &[Projectile] {
        &self.projectiles
    }

    /// Live obstacles in spawn order.
    #[must_use]
    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    /// Live pickups in spawn order.
    #[must_use]
    pub fn pickups(&self) -> &[Pickup] {
        &self.pickups
    }

    /// Total number of entities, the agent included.
    #[must_use]
    pub fn entity_count(&self) -> usize {
        1 + self.projectiles.len() + self.obstacles.len() + self.pickups.len()
    }

    // -------------------------------------------------------------------------
    // Spawning
    // -------------------------------------------------------------------------

    /// Adds a projectile and returns its handle.
    pub fn push_projectile(&mut self, projectile: Projectile) -> EntityRef {
        self.projectiles.push(projectile);
        EntityRef::projectile(last_index(&self.projectiles))
    }

    /// Adds an obstacle and returns its handle.
    pub fn push_obstacle(&mut self, obstacle: Obstacle) -> EntityRef {
        self.obstacles.push(obstacle);
        EntityRef::obstacle(last_index(&self.obstacles))
    }

    /// Adds a pickup and returns its handle.
    pub fn push_pickup(&mut self, pickup: Pickup) -> EntityRef {
        self.pickups.push(pickup);
        EntityRef::pickup(last_index(&self.pickups))
    }

    /// Adds every pickup released by obstacles destroyed so far this tick.
    ///
    /// `derive` is called once per destroyed obstacle and appends to the
    /// pickup collection. Returns the number of pickups added.
    pub fn derive_from_destroyed(
        &mut self,
        mut derive: impl FnMut(&Obstacle, &mut Vec<Pickup>) -> u32,
    ) -> u32 {
        let mut added = 0;
        for obstacle in self.obstacles.iter().filter(|o| o.destroyed) {
            added += derive(obstacle, &mut self.pickups);
        }
        if added > 0 {
            debug!(pickups = added, "derived pickups from destroyed obstacles");
        }
        added
    }

    // -------------------------------------------------------------------------
    // Motion
    // -------------------------------------------------------------------------

    /// Moves every projectile one tick.
    pub fn advance_projectiles(&mut self) {
        for projectile in &mut self.projectiles {
            projectile.advance();
        }
    }

    /// Moves every obstacle one tick.
    pub fn advance_obstacles(&mut self) {
        for obstacle in &mut self.obstacles {
            obstacle.advance();
        }
    }

    /// Pulls every pickup toward the agent and moves it.
    ///
    /// A pickup that ends its move overlapping the agent receives the
    /// Pickup/Agent reaction. Returns the number of such contacts.
    pub fn advance_pickups(&mut self, attraction: f32, damping: f32) -> usize {
        let target = self.agent.transform.position;
        let agent_bounds = self.agent.bounds();
        let mut contacts = 0;
        for index in 0..self.pickups.len() {
            let pickup = &mut self.pickups[index];
            pickup.attract(target, attraction, damping);
            if pickup.bounds().overlaps(&agent_bounds) {
                crate::resolver::react(self, EntityRef::pickup(as_u32(index)), EntityRef::AGENT);
                contacts += 1;
            }
        }
        contacts
    }

    // -------------------------------------------------------------------------
    // Broad phase
    // -------------------------------------------------------------------------

    /// Registers every collidable entity into `grid`: obstacles first, then
    /// projectiles, each in collection order.
    pub fn register_collidables(&self, grid: &mut SpatialGrid) {
        for (index, obstacle) in self.obstacles.iter().enumerate() {
            grid.register(EntityRef::obstacle(as_u32(index)), &obstacle.bounds());
        }
        for (index, projectile) in self.projectiles.iter().enumerate() {
            grid.register(EntityRef::projectile(as_u32(index)), &projectile.bounds());
        }
    }

    // -------------------------------------------------------------------------
    // Handle lookups
    // -------------------------------------------------------------------------

    /// Bounding box of the entity behind `handle`.
    ///
    /// # Panics
    ///
    /// Panics if `handle` does not resolve.
    #[must_use]
    pub fn bounds_of(&self, handle: EntityRef) -> Aabb {
        match handle.kind() {
            EntityKind::Agent => self.agent.bounds(),
            EntityKind::Projectile => self.projectile(handle).bounds(),
            EntityKind::Obstacle => self.obstacle(handle).bounds(),
            EntityKind::Pickup => self.pickup(handle).bounds(),
        }
    }

    /// Velocity of the entity behind `handle`.
    ///
    /// # Panics
    ///
    /// Panics if `handle` does not resolve.
    #[must_use]
    pub fn velocity_of(&self, handle: EntityRef) -> Vec2 {
        match handle.kind() {
            EntityKind::Agent => self.agent.transform.velocity,
            EntityKind::Projectile => self.projectile(handle).transform.velocity,
            EntityKind::Obstacle => self.obstacle(handle).transform.velocity,
            EntityKind::Pickup => self.pickup(handle).transform.velocity,
        }
    }

    /// Projectile behind `handle`.
    ///
    /// # Panics
    ///
    /// Panics if `handle` is not a live projectile.
    #[must_use]
    pub fn projectile(&self, handle: EntityRef) -> &Projectile {
        lookup(&self.projectiles, handle, EntityKind::Projectile)
    }

    /// Obstacle behind `handle`.
    ///
    /// # Panics
    ///
    /// Panics if `handle` is not a live obstacle.
    #[must_use]
    pub fn obstacle(&self, handle: EntityRef) -> &Obstacle {
        lookup(&self.obstacles, handle, EntityKind::Obstacle)
    }

    /// Pickup behind `handle`.
    ///
    /// # Panics
    ///
    /// Panics if `handle` is not a live pickup.
    #[must_use]
    pub fn pickup(&self, handle: EntityRef) -> &Pickup {
        lookup(&self.pickups, handle, EntityKind::Pickup)
    }

    pub(crate) fn projectile_mut(&mut self, handle: EntityRef) -> &mut Projectile {
        lookup_mut(&mut self.projectiles, handle, EntityKind::Projectile)
    }

    pub(crate) fn obstacle_mut(&mut self, handle: EntityRef) -> &mut Obstacle {
        lookup_mut(&mut self.obstacles, handle, EntityKind::Obstacle)
    }

    pub(crate) fn pickup_mut(&mut self, handle: EntityRef) -> &mut Pickup {
        lookup_mut(&mut self.pickups, handle, EntityKind::Pickup)
    }

    // -------------------------------------------------------------------------
    // Compaction
    // -------------------------------------------------------------------------

    /// Removes every entity whose despawn predicate holds.
    ///
    /// Projectiles, then obstacles, then pickups; each collection keeps its
    /// survivors in their original order. Every absorbed pickup adds one to
    /// the score.
    pub fn compact(&mut self) -> Removed {
        let (width, height) = (self.width, self.height);
        let removed = Removed {
            projectiles: compact(&mut self.projectiles, |p| p.should_despawn(width, height)),
            obstacles: compact(&mut self.obstacles, |o| o.should_despawn(width, height)),
            pickups: compact(&mut self.pickups, Pickup::should_despawn),
        };
        self.score += as_u32(removed.pickups);

        if removed != Removed::default() {
            debug!(
                projectiles = removed.projectiles,
                obstacles = removed.obstacles,
                pickups = removed.pickups,
                score = self.score,
                "compacted arena"
            );
        }
        removed
    }
}

#[allow(clippy::cast_possible_truncation)]
fn as_u32(n: usize) -> u32 {
    n as u32
}

fn last_index<T>(items: &[T]) -> u32 {
    as_u32(items.len() - 1)
}

fn lookup<T>(items: &[T], handle: EntityRef, kind: EntityKind) -> &T {
    check_kind(handle, kind);
    items.get(handle.index()).unwrap_or_else(|| stale(handle, items.len()))
}

fn lookup_mut<T>(items: &mut [T], handle: EntityRef, kind: EntityKind) -> &mut T {
    check_kind(handle, kind);
    let len = items.len();
    items.get_mut(handle.index()).unwrap_or_else(|| stale(handle, len))
}

fn check_kind(handle: EntityRef, kind: EntityKind) {
    assert!(
        handle.kind() == kind,
        "handle {handle} used to look up a {kind}"
    );
}

#[cold]
fn stale(handle: EntityRef, len: usize) -> ! {
    panic!("stale entity handle {handle}: collection holds {len} entities")
}
