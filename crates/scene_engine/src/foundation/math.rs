//! Math utilities and types
//!
//! Provides the vector and matrix aliases used by transforms and colliders.
//! 2D affine transforms are homogeneous 3x3 matrices, 3D ones are 4x4.

pub use nalgebra::{Matrix3, Matrix4, Vector2, Vector3};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 3x3 matrix type (2D affine)
pub type Mat3 = Matrix3<f32>;

/// 4x4 matrix type (3D affine)
pub type Mat4 = Matrix4<f32>;

/// Math constants
pub mod constants {
    /// Pi constant
    pub const PI: f32 = std::f32::consts::PI;

    /// Pi / 2
    pub const HALF_PI: f32 = PI * 0.5;

    /// Degrees to radians conversion factor
    pub const DEG_TO_RAD: f32 = PI / 180.0;

    /// Squared length below which a vector is treated as zero
    pub const ZERO_LENGTH_SQUARED: f32 = 1e-12;
}

/// Math utility functions
pub mod utils {
    use super::{constants, Vec2, Vec3};

    /// Convert degrees to radians
    pub fn deg_to_rad(degrees: f32) -> f32 {
        degrees * constants::DEG_TO_RAD
    }

    /// Clamp a value into `[-1, 1]` so it is always a valid `acos` argument
    pub fn clamp_unit(value: f32) -> f32 {
        value.clamp(-1.0, 1.0)
    }

    /// Normalize a 2D vector, returning the zero vector for zero-length input
    pub fn normalize_or_zero(v: Vec2) -> Vec2 {
        let length_squared = v.norm_squared();
        if length_squared <= constants::ZERO_LENGTH_SQUARED {
            Vec2::zeros()
        } else {
            v / length_squared.sqrt()
        }
    }

    /// Normalize a 3D vector, returning the zero vector for zero-length input
    pub fn normalize_or_zero3(v: Vec3) -> Vec3 {
        let length_squared = v.norm_squared();
        if length_squared <= constants::ZERO_LENGTH_SQUARED {
            Vec3::zeros()
        } else {
            v / length_squared.sqrt()
        }
    }

    /// Angle in radians between two directions (inputs need not be normalized)
    ///
    /// Returns 0 when either input is zero-length.
    pub fn angle_between(a: Vec2, b: Vec2) -> f32 {
        let a = normalize_or_zero(a);
        let b = normalize_or_zero(b);
        if a == Vec2::zeros() || b == Vec2::zeros() {
            return 0.0;
        }
        clamp_unit(a.dot(&b)).acos()
    }
}

/// Extension trait for building 2D affine matrices
pub trait Mat3Ext {
    /// Homogeneous translation by `offset`
    fn translation_2d(offset: Vec2) -> Mat3;

    /// Counter-clockwise rotation by `radians`
    fn rotation_2d(radians: f32) -> Mat3;

    /// Non-uniform scale by `factors`
    fn scaling_2d(factors: Vec2) -> Mat3;

    /// Translation column of a 2D affine matrix
    fn translation_part(&self) -> Vec2;

    /// First basis column (local X axis) of a 2D affine matrix
    fn x_axis(&self) -> Vec2;
}

impl Mat3Ext for Mat3 {
    fn translation_2d(offset: Vec2) -> Mat3 {
        Mat3::new_translation(&offset)
    }

    fn rotation_2d(radians: f32) -> Mat3 {
        Mat3::new_rotation(radians)
    }

    fn scaling_2d(factors: Vec2) -> Mat3 {
        Mat3::new_nonuniform_scaling(&factors)
    }

    fn translation_part(&self) -> Vec2 {
        Vec2::new(self.m13, self.m23)
    }

    fn x_axis(&self) -> Vec2 {
        Vec2::new(self.m11, self.m21)
    }
}

/// Extension trait for reading parts of 3D affine matrices
pub trait Mat4Ext {
    /// Translation column of a 3D affine matrix
    fn translation_part(&self) -> Vec3;

    /// Third basis column (local Z axis, the forward axis) of a 3D affine matrix
    fn z_axis(&self) -> Vec3;
}

impl Mat4Ext for Mat4 {
    fn translation_part(&self) -> Vec3 {
        Vec3::new(self.m14, self.m24, self.m34)
    }

    fn z_axis(&self) -> Vec3 {
        Vec3::new(self.m13, self.m23, self.m33)
    }
}
