//! Physics module for overlap detection
//!
//! Detects overlap between actor colliders and reports it. There is no
//! response or penetration resolution; callers decide what an overlap means.

pub mod collision;

pub use collision::{Collider, ColliderShape, ShapeKind, WorldSpaceShape};
