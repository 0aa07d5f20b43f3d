//! Read-only render view of the arena.
//!
//! A presentation layer draws from [`EntityView`] values and never touches
//! the collections directly.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::arena::Arena;
use crate::entity::{Body, EntityKind};
use crate::transform::Transform;

/// Visual state tag for a rendered entity.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VisualState {
    /// Drawn normally.
    #[default]
    Normal,
    /// Hit this tick and awaiting removal.
    Damaged,
}

/// What a renderer needs to draw one entity.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityView {
    /// Variant of the entity
    pub kind: EntityKind,
    /// Transform position (top-left when unrotated, center when rotated)
    pub position: Vec2,
    /// Rotation in radians
    pub rotation: f32,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Visual state tag
    pub visual: VisualState,
}

impl EntityView {
    fn of<B: Body>(body: &B, hit: bool) -> Self {
        let t: &Transform = body.transform();
        let extent = t.extent();
        Self {
            kind: B::KIND,
            position: t.position,
            rotation: t.rotation,
            width: extent.width,
            height: extent.height,
            visual: if hit {
                VisualState::Damaged
            } else {
                VisualState::Normal
            },
        }
    }

    /// Center of the entity's bounding box.
    #[must_use]
    pub fn center(&self) -> Vec2 {
        #[allow(clippy::cast_precision_loss)]
        let half = Vec2::new(self.width as f32, self.height as f32) * 0.5;
        if self.rotation == 0.0 {
            self.position + half
        } else {
            self.position
        }
    }
}

/// Views of every entity: agent, projectiles, obstacles, then pickups.
pub fn views(arena: &Arena) -> impl Iterator<Item = EntityView> + '_ {
    std::iter::once(EntityView::of(arena.agent(), false))
        .chain(arena.projectiles().iter().map(|p| EntityView::of(p, p.spent)))
        .chain(arena.obstacles().iter().map(|o| EntityView::of(o, o.destroyed)))
        .chain(arena.pickups().iter().map(|p| EntityView::of(p, p.absorbed)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ArenaConfig;
    use crate::entity::{Obstacle, Pickup, Projectile};
    use crate::transform::Extent;

    #[test]
    fn views_follow_collection_order() {
        let mut arena = Arena::new(&ArenaConfig::default());
        arena.push_pickup(Pickup::new(Transform::new(Vec2::ZERO, Extent::new(8, 8))));
        arena.push_obstacle(Obstacle::new(Transform::new(Vec2::ZERO, Extent::new(20, 30))));
        arena.push_projectile(Projectile::new(Transform::new(Vec2::ZERO, Extent::new(1, 3))));

        let kinds: Vec<EntityKind> = views(&arena).map(|v| v.kind).collect();
        assert_eq!(
            kinds,
            vec![
                EntityKind::Agent,
                EntityKind::Projectile,
                EntityKind::Obstacle,
                EntityKind::Pickup
            ]
        );
    }

    #[test]
    fn flagged_entities_render_damaged() {
        let mut arena = Arena::new(&ArenaConfig::default());
        let rock = arena.push_obstacle(Obstacle::new(Transform::new(
            Vec2::new(5.0, 6.0),
            Extent::new(20, 30),
        )));
        assert_eq!(views(&arena).nth(1).map(|v| v.visual), Some(VisualState::Normal));

        arena.obstacle_mut(rock).destroyed = true;
        let view = views(&arena).nth(1).unwrap();
        assert_eq!(view.visual, VisualState::Damaged);
        assert_eq!((view.width, view.height), (20, 30));
        assert_eq!(view.center(), Vec2::new(15.0, 21.0));
    }
}
