//! Spatial hash grid for the collision broad phase.
//!
//! The arena is partitioned into square cells of `cell_size` pixels. Every
//! tick the grid is cleared, each collidable entity is registered into every
//! cell its bounding box overlaps, and the resolver then tests pairs only
//! within a cell.
//!
//! # Provisioning
//!
//! Cells are allocated once, when the grid is built, for keys
//! `0..=width / cell_size` by `0..=height / cell_size`. Clearing empties each
//! cell but keeps the allocation, so a steady-state tick does not allocate.
//! The parts of a bounding box that fall outside the provisioned cells are
//! not registered anywhere.
//!
//! # Handles
//!
//! Cells hold [`EntityRef`] handles, never the entities themselves. Handles
//! are only meaningful between registration and the end of the tick's
//! collision phase.
//!
//! # Example
//!
//! ```
//! use glam::Vec2;
//! use orbfall_core::entity::EntityRef;
//! use orbfall_core::grid::{CellKey, SpatialGrid};
//! use orbfall_core::transform::Aabb;
//!
//! let mut grid = SpatialGrid::new(200.0, 100.0, 50);
//!
//! // A box straddling the boundary between the first two columns.
//! let bounds = Aabb::from_min_max(Vec2::new(40.0, 10.0), Vec2::new(60.0, 20.0));
//! assert_eq!(grid.register(EntityRef::obstacle(0), &bounds), 2);
//!
//! assert_eq!(grid.cell(CellKey::new(0, 0)), &[EntityRef::obstacle(0)]);
//! assert_eq!(grid.cell(CellKey::new(1, 0)), &[EntityRef::obstacle(0)]);
//! assert!(grid.cell(CellKey::new(2, 0)).is_empty());
//! ```

use std::ops::Range;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::config::ArenaConfig;
use crate::entity::EntityRef;
use crate::transform::Aabb;

/// Column and row of a grid cell.
///
/// Cell `(col, row)` covers `[col * size, (col + 1) * size)` horizontally and
/// the same range vertically.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CellKey {
    /// Column index
    pub col: u32,
    /// Row index
    pub row: u32,
}

impl CellKey {
    /// Creates a key.
    #[must_use]
    pub const fn new(col: u32, row: u32) -> Self {
        Self { col, row }
    }
}

/// Fixed-size uniform grid of entity handles.
#[derive(Debug, Clone)]
pub struct SpatialGrid {
    cell_size: f32,
    cols: usize,
    rows: usize,
    /// Row-major cell storage.
    cells: Vec<Vec<EntityRef>>,
}

impl SpatialGrid {
    /// Provisions a grid covering `[0, width] x [0, height]`.
    ///
    /// # Panics
    ///
    /// Panics if `cell_size` is zero. [`ArenaConfig::validate`] rejects that
    /// before a simulation builds its grid.
    #[must_use]
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    pub fn new(width: f32, height: f32, cell_size: u32) -> Self {
        assert!(cell_size > 0, "collision grid cell size must be non-zero");
        let size = cell_size as f32;
        let cols = (width.max(0.0) / size).floor() as usize + 1;
        let rows = (height.max(0.0) / size).floor() as usize + 1;
        Self {
            cell_size: size,
            cols,
            rows,
            cells: vec![Vec::new(); cols * rows],
        }
    }

    /// Provisions the grid described by `config`.
    #[must_use]
    pub fn for_config(config: &ArenaConfig) -> Self {
        Self::new(config.width, config.height, config.cell_size)
    }

    /// Side of one cell in pixels.
    #[must_use]
    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// Number of columns and rows.
    #[must_use]
    pub fn dimensions(&self) -> (usize, usize) {
        (self.cols, self.rows)
    }

    /// Empties every cell, keeping the provisioned keys and their capacity.
    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            cell.clear();
        }
    }

    /// Total number of handles across all cells.
    #[must_use]
    pub fn registrations(&self) -> usize {
        self.cells.iter().map(Vec::len).sum()
    }

    /// Appends `handle` to every cell that `bounds` overlaps.
    ///
    /// Returns the number of cells the handle was added to.
    pub fn register(&mut self, handle: EntityRef, bounds: &Aabb) -> usize {
        let (cols, rows) = self.cell_range(bounds);
        let mut count = 0;
        for row in rows {
            for col in cols.clone() {
                self.cells[row * self.cols + col].push(handle);
                count += 1;
            }
        }
        count
    }

    /// Columns and rows of the provisioned cells overlapped by `bounds`.
    ///
    /// The range on each axis runs from `floor(min / size)` up to, but not
    /// including, `ceil(max / size)`, so a cell that only touches the box along
    /// its far edge is excluded. A box with no extent on an axis still
    /// occupies the cell containing it.
    #[must_use]
    pub fn cell_range(&self, bounds: &Aabb) -> (Range<usize>, Range<usize>) {
        (
            self.axis_range(bounds.min.x, bounds.max.x, self.cols),
            self.axis_range(bounds.min.y, bounds.max.y, self.rows),
        )
    }

    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    fn axis_range(&self, min: f32, max: f32, count: usize) -> Range<usize> {
        let lo = (min / self.cell_size).floor();
        let hi = (max / self.cell_size).ceil().max(lo + 1.0);
        let lo = lo.max(0.0);
        let hi = hi.min(count as f32);
        if lo >= hi {
            return 0..0;
        }
        lo as usize..hi as usize
    }

    /// Handles registered in one cell, in registration order.
    ///
    /// Keys outside the provisioned area yield an empty slice.
    #[must_use]
    pub fn cell(&self, key: CellKey) -> &[EntityRef] {
        let (col, row) = (key.col as usize, key.row as usize);
        if col >= self.cols || row >= self.rows {
            return &[];
        }
        &self.cells[row * self.cols + col]
    }

    /// Rectangle covered by a cell.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn cell_bounds(&self, key: CellKey) -> Aabb {
        let min = Vec2::new(key.col as f32, key.row as f32) * self.cell_size;
        Aabb::from_min_max(min, min + Vec2::splat(self.cell_size))
    }

    /// Every provisioned cell in row-major order.
    #[allow(clippy::cast_possible_truncation)]
    pub fn cells(&self) -> impl Iterator<Item = (CellKey, &[EntityRef])> + '_ {
        self.cells.iter().enumerate().map(move |(i, cell)| {
            let key = CellKey::new((i % self.cols) as u32, (i / self.cols) as u32);
            (key, cell.as_slice())
        })
    }

    /// Cells holding more than one handle, in row-major order.
    pub fn crowded_cells(&self) -> impl Iterator<Item = (CellKey, &[EntityRef])> + '_ {
        self.cells().filter(|(_, cell)| cell.len() > 1)
    }
}
