//! Scene runtime
//!
//! Actors live in a generational arena owned by a [`Scene`]. Hierarchy links
//! are [`ActorId`](crate::foundation::collections::ActorId) handles, never
//! references, so removing an actor leaves nothing dangling: stale handles
//! simply stop resolving.
//!
//! ```text
//! Scene
//!  ├── arena: ActorId → Actor (transform, collider, behavior, links)
//!  ├── roots: registration order
//!  └── pending: structural edits recorded during a pass
//! ```

mod actor;
mod behavior;
mod mutation;
mod scene_manager;

#[cfg(test)]
mod tests;

pub use actor::Actor;
pub use behavior::{Behavior, TickContext};
pub use scene_manager::{Scene, SceneState, SceneStats};
