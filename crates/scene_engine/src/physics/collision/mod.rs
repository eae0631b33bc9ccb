//! Collider shapes and pairwise overlap tests
//!
//! # Architecture
//!
//! - **Model space storage**: a collider holds only its shape extents; its
//!   position is read live from the owning actor's world transform
//! - **On-demand transformation**: shapes become [`WorldSpaceShape`]s only
//!   for the duration of a test
//! - **Explicit dispatch**: [`pair_test`] maps a (source, target) shape pair
//!   to its test function; pairs without an entry report no collision
//!
//! # Module Organization
//!
//! - [`primitives`] - World-space circle and axis-aligned box geometry
//! - [`shape`] - Actor-facing collider shapes and the dispatch table

pub mod primitives;
pub mod shape;

pub use primitives::{Aabb, Circle};
pub use shape::{is_pair_supported, pair_test, Collider, ColliderShape, PairTest, ShapeKind, WorldSpaceShape};
