//! 2D affine transform used by scene actors

use crate::foundation::math::{utils, Mat3, Mat3Ext, Vec2};

/// Local and world 2D transform of an actor
#[derive(Debug, Clone, PartialEq)]
pub struct Transform2D {
    translation: Mat3,
    rotation: Mat3,
    scale: Mat3,
    local: Mat3,
    world: Mat3,
}

impl Default for Transform2D {
    fn default() -> Self {
        Self {
            translation: Mat3::identity(),
            rotation: Mat3::identity(),
            scale: Mat3::identity(),
            local: Mat3::identity(),
            world: Mat3::identity(),
        }
    }
}

impl Transform2D {
    /// Create identity transform
    pub fn identity() -> Self {
        Self::default()
    }

    /// Create from a local position; local and world matrices are ready to read
    pub fn from_position(position: Vec2) -> Self {
        let mut transform = Self::default();
        transform.set_translation(position);
        transform.update_transforms(None);
        transform
    }

    /// Replace the translation
    pub fn set_translation(&mut self, position: Vec2) {
        self.translation = Mat3::translation_2d(position);
    }

    /// Compose a translation onto the current one
    pub fn translate(&mut self, delta: Vec2) {
        self.translation *= Mat3::translation_2d(delta);
    }

    /// Replace the rotation with a rotation of `radians` (counter-clockwise)
    pub fn set_rotation(&mut self, radians: f32) {
        self.rotation = Mat3::rotation_2d(radians);
    }

    /// Compose a rotation of `radians` onto the current one
    pub fn rotate(&mut self, radians: f32) {
        self.rotation *= Mat3::rotation_2d(radians);
    }

    /// Replace the scale
    pub fn set_scale(&mut self, factors: Vec2) {
        self.scale = Mat3::scaling_2d(factors);
    }

    /// Compose a scale onto the current one
    pub fn scale(&mut self, factors: Vec2) {
        self.scale *= Mat3::scaling_2d(factors);
    }

    /// Recompute the local matrix, then the world matrix from `parent_world`
    ///
    /// `parent_world` must already be current for this tick; nothing here
    /// checks that.
    pub fn update_transforms(&mut self, parent_world: Option<&Mat3>) {
        self.local = self.translation * self.rotation * self.scale;
        self.world = match parent_world {
            Some(parent) => parent * self.local,
            None => self.local,
        };
    }

    /// Rotate so the world forward axis points at `target`
    ///
    /// Composes the signed angle between the current world forward and the
    /// direction to `target`, then refreshes the matrices against
    /// `parent_world`. Does nothing when `target` is the current world
    /// position.
    pub fn look_at(&mut self, target: Vec2, parent_world: Option<&Mat3>) {
        let direction = utils::normalize_or_zero(target - self.world_position());
        if direction == Vec2::zeros() {
            return;
        }

        let forward = self.forward();
        let mut angle = utils::clamp_unit(forward.dot(&direction)).acos();

        let perpendicular = Vec2::new(-forward.y, forward.x);
        if perpendicular.dot(&direction) < 0.0 {
            angle = -angle;
        }

        self.rotate(angle);
        self.update_transforms(parent_world);
    }

    /// Translation matrix
    pub fn translation(&self) -> &Mat3 {
        &self.translation
    }

    /// Rotation matrix
    pub fn rotation(&self) -> &Mat3 {
        &self.rotation
    }

    /// Scale matrix
    pub fn scale_matrix(&self) -> &Mat3 {
        &self.scale
    }

    /// Local matrix as of the last `update_transforms`
    pub fn local_matrix(&self) -> &Mat3 {
        &self.local
    }

    /// World matrix as of the last `update_transforms`
    pub fn world_matrix(&self) -> &Mat3 {
        &self.world
    }

    /// Position relative to the parent, read from the translation matrix
    pub fn local_position(&self) -> Vec2 {
        self.translation.translation_part()
    }

    /// World-space position
    pub fn world_position(&self) -> Vec2 {
        self.world.translation_part()
    }

    /// Normalized world X axis (zero if the world matrix collapses it)
    pub fn forward(&self) -> Vec2 {
        utils::normalize_or_zero(self.world.x_axis())
    }

    /// Local rotation angle in radians, in `(-PI, PI]`
    pub fn rotation_angle(&self) -> f32 {
        self.rotation.m21.atan2(self.rotation.m11)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::constants::{HALF_PI, PI};
    use approx::assert_relative_eq;

    const EPSILON: f32 = 1e-5;

    #[test]
    fn test_root_world_is_trs_product() {
        let mut transform = Transform2D::identity();
        transform.set_translation(Vec2::new(3.0, -2.0));
        transform.set_rotation(0.7);
        transform.set_scale(Vec2::new(2.0, 0.5));
        transform.update_transforms(None);

        let expected = Mat3::translation_2d(Vec2::new(3.0, -2.0))
            * Mat3::rotation_2d(0.7)
            * Mat3::scaling_2d(Vec2::new(2.0, 0.5));
        assert_relative_eq!(*transform.world_matrix(), expected, epsilon = EPSILON);
        assert_eq!(transform.world_matrix(), transform.local_matrix());

        // The other order moves the translation through the scale
        let reversed = Mat3::scaling_2d(Vec2::new(2.0, 0.5))
            * Mat3::rotation_2d(0.7)
            * Mat3::translation_2d(Vec2::new(3.0, -2.0));
        assert!((transform.world_matrix() - reversed).norm() > 0.1);
    }

    #[test]
    fn test_set_and_compose_differ() {
        let mut set = Transform2D::from_position(Vec2::new(1.0, 1.0));
        set.set_translation(Vec2::new(2.0, 0.0));
        set.update_transforms(None);

        let mut composed = Transform2D::from_position(Vec2::new(1.0, 1.0));
        composed.translate(Vec2::new(2.0, 0.0));
        composed.update_transforms(None);

        assert_relative_eq!(set.world_position(), Vec2::new(2.0, 0.0), epsilon = EPSILON);
        assert_relative_eq!(composed.world_position(), Vec2::new(3.0, 1.0), epsilon = EPSILON);
    }

    #[test]
    fn test_rotate_accumulates_and_set_rotation_replaces() {
        let mut transform = Transform2D::identity();
        transform.rotate(0.25);
        transform.rotate(0.25);
        assert_relative_eq!(transform.rotation_angle(), 0.5, epsilon = EPSILON);

        transform.set_rotation(0.1);
        assert_relative_eq!(transform.rotation_angle(), 0.1, epsilon = EPSILON);
    }

    #[test]
    fn test_scale_composes_multiplicatively() {
        let mut transform = Transform2D::identity();
        transform.scale(Vec2::new(2.0, 3.0));
        transform.scale(Vec2::new(2.0, 1.0));
        assert_relative_eq!(transform.scale_matrix().m11, 4.0, epsilon = EPSILON);
        assert_relative_eq!(transform.scale_matrix().m22, 3.0, epsilon = EPSILON);

        transform.set_scale(Vec2::new(1.0, 1.0));
        assert_eq!(*transform.scale_matrix(), Mat3::identity());
    }

    #[test]
    fn test_child_world_follows_parent() {
        let mut parent = Transform2D::identity();
        parent.set_translation(Vec2::new(10.0, 0.0));
        parent.update_transforms(None);

        let mut child = Transform2D::identity();
        child.set_translation(Vec2::new(1.0, 0.0));
        child.update_transforms(Some(parent.world_matrix()));

        assert_relative_eq!(child.world_position(), Vec2::new(11.0, 0.0), epsilon = EPSILON);
        assert_relative_eq!(child.local_position(), Vec2::new(1.0, 0.0), epsilon = EPSILON);
    }

    #[test]
    fn test_child_before_parent_reads_stale_world() {
        let mut parent = Transform2D::from_position(Vec2::new(10.0, 0.0));
        let mut child = Transform2D::identity();
        child.set_translation(Vec2::new(1.0, 0.0));
        child.update_transforms(Some(parent.world_matrix()));

        // Parent moves this tick, but the child is updated first
        parent.translate(Vec2::new(5.0, 0.0));
        child.update_transforms(Some(parent.world_matrix()));
        parent.update_transforms(None);

        assert_relative_eq!(child.world_position(), Vec2::new(11.0, 0.0), epsilon = EPSILON);
        assert_relative_eq!(parent.world_position(), Vec2::new(15.0, 0.0), epsilon = EPSILON);

        // Next update in the right order catches up
        child.update_transforms(Some(parent.world_matrix()));
        assert_relative_eq!(child.world_position(), Vec2::new(16.0, 0.0), epsilon = EPSILON);
    }

    #[test]
    fn test_parent_rotation_carries_child() {
        let mut parent = Transform2D::identity();
        parent.set_rotation(HALF_PI);
        parent.update_transforms(None);

        let mut child = Transform2D::identity();
        child.set_translation(Vec2::new(2.0, 0.0));
        child.update_transforms(Some(parent.world_matrix()));

        assert_relative_eq!(child.world_position(), Vec2::new(0.0, 2.0), epsilon = EPSILON);
        assert_relative_eq!(child.forward(), Vec2::new(0.0, 1.0), epsilon = EPSILON);
    }

    #[test]
    fn test_look_at_turns_left_and_right() {
        let mut transform = Transform2D::identity();
        transform.look_at(Vec2::new(0.0, 5.0), None);
        assert_relative_eq!(transform.forward(), Vec2::new(0.0, 1.0), epsilon = EPSILON);
        assert_relative_eq!(transform.rotation_angle(), HALF_PI, epsilon = EPSILON);

        let mut transform = Transform2D::identity();
        transform.look_at(Vec2::new(0.0, -5.0), None);
        assert_relative_eq!(transform.forward(), Vec2::new(0.0, -1.0), epsilon = EPSILON);
        assert_relative_eq!(transform.rotation_angle(), -HALF_PI, epsilon = EPSILON);
    }

    #[test]
    fn test_look_at_straight_ahead_and_behind() {
        let mut transform = Transform2D::from_position(Vec2::new(1.0, 1.0));
        transform.look_at(Vec2::new(9.0, 1.0), None);
        assert_relative_eq!(transform.rotation_angle(), 0.0, epsilon = EPSILON);

        transform.look_at(Vec2::new(-9.0, 1.0), None);
        assert_relative_eq!(transform.rotation_angle().abs(), PI, epsilon = EPSILON);
        assert_relative_eq!(transform.world_position(), Vec2::new(1.0, 1.0), epsilon = EPSILON);
    }

    #[test]
    fn test_look_at_own_position_is_noop() {
        let mut transform = Transform2D::from_position(Vec2::new(3.0, 3.0));
        transform.set_rotation(0.3);
        transform.update_transforms(None);
        let before = transform.clone();

        transform.look_at(Vec2::new(3.0, 3.0), None);
        assert_eq!(transform, before);
    }

    #[test]
    fn test_forward_of_collapsed_scale_is_zero() {
        let mut transform = Transform2D::identity();
        transform.set_scale(Vec2::new(0.0, 1.0));
        transform.update_transforms(None);
        assert_eq!(transform.forward(), Vec2::zeros());
    }
}
