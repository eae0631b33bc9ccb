//! Per-actor behavior hooks and the per-tick context they receive

use super::{Actor, Scene};
use crate::engine::DriverControl;
use crate::foundation::collections::ActorId;
use crate::input::InputSource;
use crate::render::RenderSink;

/// Variant behavior attached to an actor
///
/// Every hook has a no-op default. Hooks receive the scene mutably; structural
/// changes made while the scene is iterating (spawns, removals, reparenting)
/// are deferred and applied when the current pass ends.
pub trait Behavior {
    /// Runs once, before the actor's first update or draw
    fn start(&mut self, _me: ActorId, _scene: &mut Scene) {}

    /// Runs once per tick
    fn update(&mut self, _me: ActorId, _scene: &mut Scene, _ctx: &mut TickContext<'_>) {}

    /// Runs once per draw; the default draws the actor's appearance
    fn draw(&self, actor: &Actor, sink: &mut dyn RenderSink) {
        actor.draw_appearance(sink);
    }

    /// Runs when this actor's collider overlaps `other` during its collision pass
    fn on_collision(
        &mut self,
        _me: ActorId,
        _other: ActorId,
        _scene: &mut Scene,
        _ctx: &mut TickContext<'_>,
    ) {
    }

    /// Runs once when the scene ends
    fn end(&mut self, _me: ActorId, _scene: &mut Scene) {}
}

/// What a behavior can see of the frame driver during a tick
pub struct TickContext<'a> {
    dt: f32,
    input: &'a dyn InputSource,
    control: &'a mut DriverControl,
}

impl<'a> TickContext<'a> {
    /// Context for one tick
    pub fn new(dt: f32, input: &'a dyn InputSource, control: &'a mut DriverControl) -> Self {
        Self { dt, input, control }
    }

    /// Elapsed seconds since the previous tick
    pub fn dt(&self) -> f32 {
        self.dt
    }

    /// Input for this tick
    pub fn input(&self) -> &dyn InputSource {
        self.input
    }

    /// Ask the driver to stop after the current frame
    pub fn request_close(&mut self) {
        self.control.request_close();
    }

    /// Ask the driver to switch scenes after the current frame
    pub fn request_scene(&mut self, index: usize) {
        self.control.request_scene(index);
    }

    /// Requests recorded during this tick
    pub fn control(&self) -> &DriverControl {
        self.control
    }
}
