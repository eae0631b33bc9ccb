//! # Scene Engine
//!
//! A small scene-graph runtime: actors with 2D transforms arranged in a
//! parent/child hierarchy, optional colliders, per-actor behavior hooks, and
//! a frame driver that ticks the current scene.
//!
//! ## Features
//!
//! - **Hierarchical transforms**: translation/rotation/scale composed into
//!   local and world matrices (2D and 3D)
//! - **Colliders**: circle and axis-aligned box shapes with a pair dispatch table
//! - **Scenes**: generational actor arena, lazy start, deferred structural edits
//! - **Frame driver**: scene switching and close requests through an injected context
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use scene_engine::prelude::*;
//!
//! fn main() -> Result<(), EngineError> {
//!     let mut scene = Scene::new("main");
//!     scene.add_actor(Actor::new("Player", Vec2::new(10.0, 10.0)).with_collider(Collider::circle(1.0)));
//!
//!     let mut engine = Engine::new(EngineConfig::headless(0.05, 100))?;
//!     engine.add_scene(scene);
//!     engine.run(&mut NoInput, &mut LogSink)?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod config;
pub mod foundation;
pub mod input;
pub mod physics;
pub mod render;
pub mod scene;
pub mod transform;

mod engine;

pub use engine::{DriverControl, Engine, EngineError};

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        config::{Config, ConfigError, EngineConfig},
        foundation::{
            collections::ActorId,
            math::{Mat3, Mat4, Vec2, Vec3},
            time::Timer,
        },
        input::{FrameInput, InputActions, InputSource, InputState, NoInput, ScriptedInput},
        physics::{Collider, ColliderShape, ShapeKind},
        render::{Appearance, Color, DrawList, LogSink, RenderSink},
        scene::{Actor, Behavior, Scene, SceneState, TickContext},
        transform::{Transform2D, Transform3D},
        DriverControl, Engine, EngineError,
    };
}
