//! Positional state and bounding geometry shared by every entity.
//!
//! A [`Transform`] is a position, a per-tick velocity, a rotation and a fixed
//! rectangular [`Extent`]. Its [`Aabb`] is derived on demand and never stored.
//!
//! # Anchoring
//!
//! An unrotated transform anchors its rectangle at `position` (the top-left
//! corner, screen coordinates with y pointing down). A rotated transform is
//! rotated about the rectangle's center and the center is placed at
//! `position`. Both conventions are observable through [`Transform::bounds`].

use glam::Vec2;
use serde::{Deserialize, Serialize};

// =============================================================================
// Extent
// =============================================================================

/// Width and height of an entity's rectangle, in whole pixels.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Extent {
    /// Horizontal size.
    pub width: u32,
    /// Vertical size.
    pub height: u32,
}

impl Extent {
    /// Creates an extent.
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Returns `width * height`.
    #[must_use]
    pub const fn area(self) -> u32 {
        self.width * self.height
    }

    /// Returns the extent as a float vector.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn as_vec2(self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32)
    }

    /// Returns true if either side is zero.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }
}

// =============================================================================
// Aabb
// =============================================================================

/// Axis-aligned bounding box.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    /// Minimum corner.
    pub min: Vec2,
    /// Maximum corner.
    pub max: Vec2,
}

impl Aabb {
    /// Creates a box from its corners.
    #[must_use]
    pub const fn from_min_max(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Smallest box enclosing all `points`.
    #[must_use]
    pub fn enclosing(points: [Vec2; 4]) -> Self {
        let min = points.iter().copied().fold(points[0], Vec2::min);
        let max = points.iter().copied().fold(points[0], Vec2::max);
        Self { min, max }
    }

    /// Returns `max - min`.
    #[must_use]
    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    /// Returns true if the box has no area.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.min.x >= self.max.x || self.min.y >= self.max.y
    }

    /// Standard AABB overlap test.
    ///
    /// Boxes that only touch along an edge or a corner do not overlap, and an
    /// empty box never overlaps anything.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && self.min.x < other.max.x
            && other.min.x < self.max.x
            && self.min.y < other.max.y
            && other.min.y < self.max.y
    }

    /// Returns true if the box lies entirely outside `[0, width] x [0, height]`.
    #[must_use]
    pub fn is_outside(&self, width: f32, height: f32) -> bool {
        self.max.x < 0.0 || self.min.x > width || self.max.y < 0.0 || self.min.y > height
    }
}

// =============================================================================
// Transform
// =============================================================================

/// Position, velocity, rotation and extent of one entity.
///
/// The extent is fixed for the lifetime of the entity; position and velocity
/// are mutated by the motion phase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    /// World position (see the module docs for anchoring).
    pub position: Vec2,
    /// Displacement applied per tick.
    pub velocity: Vec2,
    /// Rotation in radians.
    pub rotation: f32,
    extent: Extent,
}

impl Transform {
    /// Creates a stationary, unrotated transform.
    #[must_use]
    pub const fn new(position: Vec2, extent: Extent) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            rotation: 0.0,
            extent,
        }
    }

    /// Sets the velocity.
    #[must_use]
    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.velocity = velocity;
        self
    }

    /// Sets the rotation.
    #[must_use]
    pub fn with_rotation(mut self, rotation: f32) -> Self {
        self.rotation = rotation;
        self
    }

    /// The fixed extent.
    #[must_use]
    pub const fn extent(&self) -> Extent {
        self.extent
    }

    /// Advances position by velocity on both axes.
    pub fn advance(&mut self) {
        self.position += self.velocity;
    }

    /// Advances x by velocity and y against it.
    ///
    /// Projectile velocity is a heading vector whose y component points up the
    /// screen, so it is subtracted in screen space.
    pub fn advance_screen_up(&mut self) {
        self.position.x += self.velocity.x;
        self.position.y -= self.velocity.y;
    }

    /// Bounding box of the rectangle, accounting for rotation.
    #[must_use]
    pub fn bounds(&self) -> Aabb {
        let size = self.extent.as_vec2();
        if self.rotation == 0.0 {
            return Aabb::from_min_max(self.position, self.position + size);
        }

        let half = size * 0.5;
        let rot = Vec2::from_angle(self.rotation);
        let corners = [
            Vec2::new(-half.x, -half.y),
            Vec2::new(half.x, -half.y),
            Vec2::new(-half.x, half.y),
            Vec2::new(half.x, half.y),
        ]
        .map(|corner| self.position + rot.rotate(corner));
        Aabb::enclosing(corners)
    }
}
