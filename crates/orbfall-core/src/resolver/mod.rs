//! Collision resolver: the narrow phase.
//!
//! After registration, every grid cell holding more than one handle is
//! scanned. Within a cell each unordered pair `(j, k)` with `j < k` is tested
//! once; if their bounding boxes overlap, `j` reacts to `k` and then `k`
//! reacts to `j`.
//!
//! # Repeated contacts
//!
//! Two entities that share several cells are tested once per shared cell,
//! so the same contact can fire more than once in a tick. Reactions are
//! idempotent (see [`reaction`]), which makes the repeats harmless.
//!
//! # Faults
//!
//! A handle that no longer resolves in the [`Arena`] is a broken invariant
//! between the grid and the collections. Resolution panics with the handle
//! rather than skipping it.
//!
//! # Example
//!
//! ```
//! use glam::Vec2;
//! use orbfall_core::arena::Arena;
//! use orbfall_core::config::ArenaConfig;
//! use orbfall_core::entity::{Obstacle, Projectile};
//! use orbfall_core::grid::SpatialGrid;
//! use orbfall_core::resolver::resolve;
//! use orbfall_core::transform::{Extent, Transform};
//!
//! let config = ArenaConfig::default();
//! let mut arena = Arena::new(&config);
//! arena.push_obstacle(Obstacle::new(Transform::new(Vec2::new(100.0, 100.0), Extent::new(20, 20))));
//! arena.push_projectile(Projectile::new(Transform::new(Vec2::new(110.0, 110.0), Extent::new(1, 3))));
//!
//! let mut grid = SpatialGrid::for_config(&config);
//! arena.register_collidables(&mut grid);
//! let stats = resolve(&grid, &mut arena);
//!
//! assert_eq!(stats.contacts, 1);
//! assert!(arena.obstacles()[0].destroyed);
//! assert!(arena.projectiles()[0].spent);
//! ```

pub mod reaction;

pub use reaction::{apply, react, Reaction};

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::arena::Arena;
use crate::grid::SpatialGrid;

/// Work done by one resolution pass.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolveStats {
    /// Cells holding more than one handle
    pub cells_visited: usize,
    /// Overlap tests performed (projectile pairs excluded)
    pub pairs_tested: usize,
    /// Tests that found an overlap
    pub contacts: usize,
}

/// Resolves every overlapping pair in every crowded cell of `grid`.
///
/// # Panics
///
/// Panics if `grid` holds a handle that does not resolve in `arena`.
pub fn resolve(grid: &SpatialGrid, arena: &mut Arena) -> ResolveStats {
    let mut stats = ResolveStats::default();

    for (key, cell) in grid.crowded_cells() {
        stats.cells_visited += 1;
        for (j, &a) in cell.iter().enumerate() {
            for &b in &cell[j + 1..] {
                if !a.kind().can_collide(b.kind()) {
                    continue;
                }
                stats.pairs_tested += 1;
                if !arena.bounds_of(a).overlaps(&arena.bounds_of(b)) {
                    continue;
                }

                stats.contacts += 1;
                trace!(?key, %a, %b, "contact");
                react(arena, a, b);
                react(arena, b, a);
            }
        }
    }
    stats
}
