//! Primitive collision shapes and intersection algorithms
//!
//! All primitives here are in world space. Y grows downwards for `top` and
//! `bottom`, matching screen coordinates.

use crate::foundation::math::Vec2;

/// A world-space circle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    /// Center position in world space
    pub center: Vec2,
    /// Radius in world units
    pub radius: f32,
}

impl Circle {
    /// Creates a circle
    pub fn new(center: Vec2, radius: f32) -> Self {
        Self { center, radius }
    }

    /// Whether two circles touch or overlap
    pub fn intersects(&self, other: &Circle) -> bool {
        (other.center - self.center).norm() <= self.radius + other.radius
    }

    /// Whether the circle touches or overlaps a box
    ///
    /// The offset from the box center to the circle center is clamped to the
    /// box half-extents to find the closest point on (or inside) the box.
    pub fn intersects_aabb(&self, aabb: &Aabb) -> bool {
        let closest = aabb.closest_point(self.center);
        (self.center - closest).norm() <= self.radius
    }
}

/// A world-space axis-aligned box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Center position in world space
    pub center: Vec2,
    /// Half the width and half the height
    pub half_extents: Vec2,
}

impl Aabb {
    /// Create a box from its center and full width and height
    pub fn from_center_size(center: Vec2, width: f32, height: f32) -> Self {
        Self {
            center,
            half_extents: Vec2::new(width * 0.5, height * 0.5),
        }
    }

    /// Smallest X covered by the box
    pub fn left(&self) -> f32 {
        self.center.x - self.half_extents.x
    }

    /// Largest X covered by the box
    pub fn right(&self) -> f32 {
        self.center.x + self.half_extents.x
    }

    /// Smallest Y covered by the box
    pub fn top(&self) -> f32 {
        self.center.y - self.half_extents.y
    }

    /// Largest Y covered by the box
    pub fn bottom(&self) -> f32 {
        self.center.y + self.half_extents.y
    }

    /// Point of the box (surface or interior) nearest to `point`
    pub fn closest_point(&self, point: Vec2) -> Vec2 {
        let offset = point - self.center;
        let clamped = Vec2::new(
            offset.x.clamp(-self.half_extents.x, self.half_extents.x),
            offset.y.clamp(-self.half_extents.y, self.half_extents.y),
        );
        self.center + clamped
    }

    /// Check if this box contains a point (edges inclusive)
    pub fn contains_point(&self, point: Vec2) -> bool {
        point.x >= self.left() && point.x <= self.right() && point.y >= self.top() && point.y <= self.bottom()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_circle_circle_boundaries() {
        let a = Circle::new(Vec2::new(0.0, 0.0), 5.0);
        assert!(a.intersects(&Circle::new(Vec2::new(9.0, 0.0), 5.0)));
        assert!(a.intersects(&Circle::new(Vec2::new(10.0, 0.0), 5.0)));
        assert!(!a.intersects(&Circle::new(Vec2::new(11.0, 0.0), 5.0)));
    }

    #[test]
    fn test_closest_point_outside_and_inside() {
        let aabb = Aabb::from_center_size(Vec2::zeros(), 4.0, 4.0);
        assert_relative_eq!(aabb.closest_point(Vec2::new(10.0, 0.0)), Vec2::new(2.0, 0.0));
        assert_relative_eq!(aabb.closest_point(Vec2::new(5.0, -7.0)), Vec2::new(2.0, -2.0));
        assert_relative_eq!(aabb.closest_point(Vec2::new(1.0, 0.5)), Vec2::new(1.0, 0.5));
    }

    #[test]
    fn test_circle_aabb() {
        let aabb = Aabb::from_center_size(Vec2::zeros(), 4.0, 4.0);
        assert!(!Circle::new(Vec2::new(10.0, 0.0), 1.0).intersects_aabb(&aabb));
        assert!(Circle::new(Vec2::new(2.0, 0.0), 1.0).intersects_aabb(&aabb));
        assert!(Circle::new(Vec2::new(3.0, 0.0), 1.0).intersects_aabb(&aabb));
        // Corner region: closest point is the corner (2, 2)
        assert!(!Circle::new(Vec2::new(3.0, 3.0), 1.0).intersects_aabb(&aabb));
    }

    #[test]
    fn test_aabb_edges_use_their_own_axis() {
        let aabb = Aabb::from_center_size(Vec2::new(10.0, 20.0), 4.0, 8.0);
        assert_eq!(aabb.left(), 8.0);
        assert_eq!(aabb.right(), 12.0);
        assert_eq!(aabb.top(), 16.0);
        assert_eq!(aabb.bottom(), 24.0);
        assert!(aabb.contains_point(Vec2::new(12.0, 24.0)));
        assert!(!aabb.contains_point(Vec2::new(12.1, 20.0)));
    }
}
