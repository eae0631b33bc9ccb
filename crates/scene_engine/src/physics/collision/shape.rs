//! Actor-facing collider shapes
//!
//! Shapes store extents only. Position comes from the owning actor's world
//! transform at test time.

use super::primitives::{Aabb, Circle};
use crate::foundation::math::Vec2;
use crate::scene::Actor;
use slotmap::Key;

/// Collider shape types (extents only, no position)
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColliderShape {
    /// Circle of the given radius centered on the owner
    Circle {
        /// Radius in world units
        radius: f32,
    },
    /// Axis-aligned box centered on the owner
    AxisAlignedBox {
        /// Full width in world units
        width: f32,
        /// Full height in world units
        height: f32,
    },
}

/// Tag identifying a shape variant, used as the dispatch key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    /// [`ColliderShape::Circle`]
    Circle,
    /// [`ColliderShape::AxisAlignedBox`]
    AxisAlignedBox,
}

impl ShapeKind {
    /// Every shape kind, for walking the dispatch table
    pub const ALL: [ShapeKind; 2] = [ShapeKind::Circle, ShapeKind::AxisAlignedBox];
}

impl ColliderShape {
    /// Get the dispatch tag of this shape
    pub fn kind(&self) -> ShapeKind {
        match self {
            Self::Circle { .. } => ShapeKind::Circle,
            Self::AxisAlignedBox { .. } => ShapeKind::AxisAlignedBox,
        }
    }

    /// Place this shape at a world position for testing
    pub fn to_world_space(&self, position: Vec2) -> WorldSpaceShape {
        match *self {
            Self::Circle { radius } => WorldSpaceShape::Circle(Circle::new(position, radius)),
            Self::AxisAlignedBox { width, height } => {
                WorldSpaceShape::Box(Aabb::from_center_size(position, width, height))
            }
        }
    }
}

/// World-space collision shape (temporary, for testing only)
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WorldSpaceShape {
    /// World-space circle
    Circle(Circle),
    /// World-space axis-aligned box
    Box(Aabb),
}

/// Narrow-phase test for one ordered shape pair
pub type PairTest = fn(&WorldSpaceShape, &WorldSpaceShape) -> bool;

fn circle_vs_circle(source: &WorldSpaceShape, target: &WorldSpaceShape) -> bool {
    match (source, target) {
        (WorldSpaceShape::Circle(a), WorldSpaceShape::Circle(b)) => a.intersects(b),
        _ => false,
    }
}

fn circle_vs_box(source: &WorldSpaceShape, target: &WorldSpaceShape) -> bool {
    match (source, target) {
        (WorldSpaceShape::Circle(circle), WorldSpaceShape::Box(aabb)) => circle.intersects_aabb(aabb),
        _ => false,
    }
}

/// Look up the test for a (source, target) shape pair
///
/// Only circle sources are implemented. A box source has no entry against
/// any target, so `box.check(circle)` is not the mirror of
/// `circle.check(box)`.
pub fn pair_test(source: ShapeKind, target: ShapeKind) -> Option<PairTest> {
    match (source, target) {
        (ShapeKind::Circle, ShapeKind::Circle) => Some(circle_vs_circle),
        (ShapeKind::Circle, ShapeKind::AxisAlignedBox) => Some(circle_vs_box),
        (ShapeKind::AxisAlignedBox, ShapeKind::Circle) => None,
        (ShapeKind::AxisAlignedBox, ShapeKind::AxisAlignedBox) => None,
    }
}

/// Whether a (source, target) pair has a test
pub fn is_pair_supported(source: ShapeKind, target: ShapeKind) -> bool {
    pair_test(source, target).is_some()
}

/// Collider attached to an actor
///
/// The owning actor is whichever actor holds this collider; the collider
/// itself keeps no position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Collider {
    shape: ColliderShape,
}

impl Collider {
    /// Create a collider from a shape
    pub fn new(shape: ColliderShape) -> Self {
        Self { shape }
    }

    /// Circle collider
    pub fn circle(radius: f32) -> Self {
        Self::new(ColliderShape::Circle { radius })
    }

    /// Axis-aligned box collider
    pub fn aabb(width: f32, height: f32) -> Self {
        Self::new(ColliderShape::AxisAlignedBox { width, height })
    }

    /// Get the shape
    pub fn shape(&self) -> &ColliderShape {
        &self.shape
    }

    /// Replace the shape
    pub fn set_shape(&mut self, shape: ColliderShape) {
        self.shape = shape;
    }

    /// Get the dispatch tag
    pub fn kind(&self) -> ShapeKind {
        self.shape.kind()
    }

    /// World-space shape at the owner's current world position
    pub fn world_shape(&self, owner: &Actor) -> WorldSpaceShape {
        self.shape.to_world_space(owner.world_position())
    }

    /// Test `owner`'s collider against `other`'s
    ///
    /// Reports no collision when:
    /// - either actor has no collider
    /// - `owner` and `other` are the same actor
    /// - the pair has no entry in [`pair_test`]
    pub fn check_collision(owner: &Actor, other: &Actor) -> bool {
        if std::ptr::eq(owner, other) || (!owner.id().is_null() && owner.id() == other.id()) {
            return false;
        }

        let (Some(source), Some(target)) = (owner.collider(), other.collider()) else {
            return false;
        };

        let Some(test) = pair_test(source.kind(), target.kind()) else {
            log::trace!(
                "no collision test for {:?} -> {:?} ('{}' vs '{}')",
                source.kind(),
                target.kind(),
                owner.name(),
                other.name()
            );
            return false;
        };

        test(&source.world_shape(owner), &target.world_shape(other))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn actor_at(name: &str, x: f32, y: f32, collider: Option<Collider>) -> Actor {
        let actor = Actor::new(name, Vec2::new(x, y));
        match collider {
            Some(collider) => actor.with_collider(collider),
            None => actor,
        }
    }

    #[test]
    fn test_dispatch_table_entries() {
        assert!(is_pair_supported(ShapeKind::Circle, ShapeKind::Circle));
        assert!(is_pair_supported(ShapeKind::Circle, ShapeKind::AxisAlignedBox));
        assert!(!is_pair_supported(ShapeKind::AxisAlignedBox, ShapeKind::Circle));
        assert!(!is_pair_supported(ShapeKind::AxisAlignedBox, ShapeKind::AxisAlignedBox));

        let supported = ShapeKind::ALL
            .iter()
            .flat_map(|a| ShapeKind::ALL.iter().map(move |b| (*a, *b)))
            .filter(|(a, b)| is_pair_supported(*a, *b))
            .count();
        assert_eq!(supported, 2);
    }

    #[test]
    fn test_circle_circle_through_actors() {
        let a = actor_at("a", 0.0, 0.0, Some(Collider::circle(5.0)));
        let near = actor_at("b", 9.0, 0.0, Some(Collider::circle(5.0)));
        let far = actor_at("c", 11.0, 0.0, Some(Collider::circle(5.0)));

        assert!(Collider::check_collision(&a, &near));
        assert!(Collider::check_collision(&near, &a));
        assert!(!Collider::check_collision(&a, &far));
    }

    #[test]
    fn test_circle_box_through_actors() {
        let aabb = actor_at("box", 0.0, 0.0, Some(Collider::aabb(4.0, 4.0)));
        let far = actor_at("far", 10.0, 0.0, Some(Collider::circle(1.0)));
        let touching = actor_at("touching", 2.0, 0.0, Some(Collider::circle(1.0)));

        assert!(!Collider::check_collision(&far, &aabb));
        assert!(Collider::check_collision(&touching, &aabb));
    }

    #[test]
    fn test_box_source_reports_no_collision() {
        let aabb = actor_at("box", 0.0, 0.0, Some(Collider::aabb(4.0, 4.0)));
        let circle = actor_at("circle", 0.0, 0.0, Some(Collider::circle(1.0)));
        let other_box = actor_at("box2", 1.0, 0.0, Some(Collider::aabb(4.0, 4.0)));

        assert!(Collider::check_collision(&circle, &aabb));
        assert!(!Collider::check_collision(&aabb, &circle));
        assert!(!Collider::check_collision(&aabb, &other_box));
    }

    #[test]
    fn test_missing_collider_is_no_collision() {
        let a = actor_at("a", 0.0, 0.0, Some(Collider::circle(5.0)));
        let bare = actor_at("bare", 0.0, 0.0, None);

        assert!(!Collider::check_collision(&a, &bare));
        assert!(!Collider::check_collision(&bare, &a));
    }

    #[test]
    fn test_self_collision_excluded() {
        let a = actor_at("a", 0.0, 0.0, Some(Collider::circle(5.0)));
        assert!(!Collider::check_collision(&a, &a));
    }
}
