//! Actor transforms
//!
//! Each transform keeps its translation, rotation and scale as separate
//! affine matrices so any one of them can be replaced or composed onto
//! without disturbing the others.
//!
//! - `local = translation * rotation * scale` (fixed order)
//! - `world = parent_world * local`, or `world = local` for roots
//!
//! World matrices are only as fresh as the parent world handed to
//! `update_transforms`. Callers that update a child before its parent in a
//! tick get a world matrix built from the parent's previous state; the scene
//! avoids this by walking its hierarchy top-down.

mod planar;
mod spatial;

pub use planar::Transform2D;
pub use spatial::Transform3D;
