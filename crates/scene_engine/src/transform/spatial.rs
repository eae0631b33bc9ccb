//! 3D affine transform with the same set/compose contract as [`Transform2D`]
//!
//! [`Transform2D`]: super::Transform2D

use crate::foundation::math::{constants, utils, Mat4, Mat4Ext, Vec3};
use nalgebra::{Rotation3, Unit};

/// Local and world 3D transform
///
/// The forward axis is local +Z.
#[derive(Debug, Clone, PartialEq)]
pub struct Transform3D {
    translation: Mat4,
    rotation: Mat4,
    scale: Mat4,
    local: Mat4,
    world: Mat4,
}

impl Default for Transform3D {
    fn default() -> Self {
        Self {
            translation: Mat4::identity(),
            rotation: Mat4::identity(),
            scale: Mat4::identity(),
            local: Mat4::identity(),
            world: Mat4::identity(),
        }
    }
}

/// Rotation about `axis`; a zero-length axis yields no rotation
fn axis_angle(axis: Vec3, radians: f32) -> Mat4 {
    Unit::try_new(axis, constants::ZERO_LENGTH_SQUARED.sqrt())
        .map_or_else(Mat4::identity, |axis| Rotation3::from_axis_angle(&axis, radians).to_homogeneous())
}

impl Transform3D {
    /// Create identity transform
    pub fn identity() -> Self {
        Self::default()
    }

    /// Create from a local position; local and world matrices are ready to read
    pub fn from_position(position: Vec3) -> Self {
        let mut transform = Self::default();
        transform.set_translation(position);
        transform.update_transforms(None);
        transform
    }

    /// Replace the translation
    pub fn set_translation(&mut self, position: Vec3) {
        self.translation = Mat4::new_translation(&position);
    }

    /// Compose a translation onto the current one
    pub fn translate(&mut self, delta: Vec3) {
        self.translation *= Mat4::new_translation(&delta);
    }

    /// Replace the rotation with `radians` about `axis`
    pub fn set_rotation(&mut self, axis: Vec3, radians: f32) {
        self.rotation = axis_angle(axis, radians);
    }

    /// Compose a rotation of `radians` about `axis` onto the current one
    pub fn rotate(&mut self, axis: Vec3, radians: f32) {
        self.rotation *= axis_angle(axis, radians);
    }

    /// Replace the rotation with X, Y and Z axis rotations applied in that order
    pub fn set_rotation_euler(&mut self, x: f32, y: f32, z: f32) {
        self.rotation = axis_angle(Vec3::z(), z) * axis_angle(Vec3::y(), y) * axis_angle(Vec3::x(), x);
    }

    /// Replace the scale
    pub fn set_scale(&mut self, factors: Vec3) {
        self.scale = Mat4::new_nonuniform_scaling(&factors);
    }

    /// Compose a scale onto the current one
    pub fn scale(&mut self, factors: Vec3) {
        self.scale *= Mat4::new_nonuniform_scaling(&factors);
    }

    /// Recompute the local matrix, then the world matrix from `parent_world`
    pub fn update_transforms(&mut self, parent_world: Option<&Mat4>) {
        self.local = self.translation * self.rotation * self.scale;
        self.world = match parent_world {
            Some(parent) => parent * self.local,
            None => self.local,
        };
    }

    /// Replace the rotation so forward (+Z) points from the world position at `target`
    ///
    /// The basis is built against world up (+Y). When the direction is
    /// parallel to up the cross product collapses, so +X is used as the
    /// reference axis instead. The world-space basis becomes the local
    /// rotation, so a rotated parent skews the result. Does nothing when
    /// `target` is the current world position.
    pub fn look_at(&mut self, target: Vec3, parent_world: Option<&Mat4>) {
        let forward = utils::normalize_or_zero3(target - self.world_position());
        if forward == Vec3::zeros() {
            return;
        }

        let mut right = utils::normalize_or_zero3(Vec3::y().cross(&forward));
        if right == Vec3::zeros() {
            right = utils::normalize_or_zero3(Vec3::x().cross(&forward));
        }
        let up = forward.cross(&right);

        self.rotation = Mat4::new(
            right.x, up.x, forward.x, 0.0,
            right.y, up.y, forward.y, 0.0,
            right.z, up.z, forward.z, 0.0,
            0.0, 0.0, 0.0, 1.0,
        );
        self.update_transforms(parent_world);
    }

    /// Translation matrix
    pub fn translation(&self) -> &Mat4 {
        &self.translation
    }

    /// Rotation matrix
    pub fn rotation(&self) -> &Mat4 {
        &self.rotation
    }

    /// Scale matrix
    pub fn scale_matrix(&self) -> &Mat4 {
        &self.scale
    }

    /// Local matrix as of the last `update_transforms`
    pub fn local_matrix(&self) -> &Mat4 {
        &self.local
    }

    /// World matrix as of the last `update_transforms`
    pub fn world_matrix(&self) -> &Mat4 {
        &self.world
    }

    /// World-space position
    pub fn world_position(&self) -> Vec3 {
        self.world.translation_part()
    }

    /// Normalized world forward (+Z) axis
    pub fn forward(&self) -> Vec3 {
        utils::normalize_or_zero3(self.world.z_axis())
    }
}
