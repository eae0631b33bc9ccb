//! Scenario tests for scene passes, hierarchy and deferred mutation

mod hierarchy;

use crate::engine::DriverControl;
use crate::foundation::collections::ActorId;
use crate::input::NoInput;
use crate::scene::{Behavior, Scene, TickContext};
use std::cell::RefCell;
use std::rc::Rc;

/// Shared event log written by test behaviors
pub(super) type EventLog = Rc<RefCell<Vec<String>>>;

pub(super) fn event_log() -> EventLog {
    Rc::new(RefCell::new(Vec::new()))
}

pub(super) fn events(log: &EventLog) -> Vec<String> {
    log.borrow().clone()
}

/// Run one update pass with a fixed delta and no input
pub(super) fn tick(scene: &mut Scene) {
    let input = NoInput;
    let mut control = DriverControl::default();
    let mut ctx = TickContext::new(0.1, &input, &mut control);
    scene.update(&mut ctx);
}

fn name_of(scene: &Scene, id: ActorId) -> String {
    scene
        .actor(id)
        .map(|actor| actor.name().to_string())
        .unwrap_or_else(|| "<gone>".to_string())
}

/// Records every hook as "hook:name" (collisions as "hit:name>other")
pub(super) struct Recorder {
    log: EventLog,
}

impl Recorder {
    pub(super) fn new(log: &EventLog) -> Self {
        Self { log: Rc::clone(log) }
    }

    fn record(&self, scene: &Scene, hook: &str, me: ActorId) {
        self.log.borrow_mut().push(format!("{}:{}", hook, name_of(scene, me)));
    }
}

impl Behavior for Recorder {
    fn start(&mut self, me: ActorId, scene: &mut Scene) {
        self.record(scene, "start", me);
    }

    fn update(&mut self, me: ActorId, scene: &mut Scene, _ctx: &mut TickContext<'_>) {
        self.record(scene, "update", me);
    }

    fn on_collision(&mut self, me: ActorId, other: ActorId, scene: &mut Scene, _ctx: &mut TickContext<'_>) {
        let entry = format!("hit:{}>{}", name_of(scene, me), name_of(scene, other));
        self.log.borrow_mut().push(entry);
    }

    fn end(&mut self, me: ActorId, scene: &mut Scene) {
        self.record(scene, "end", me);
    }
}

/// Records like [`Recorder`] and runs a closure on every collision
pub(super) struct OnHit<F> {
    recorder: Recorder,
    action: F,
}

impl<F> OnHit<F>
where
    F: FnMut(ActorId, ActorId, &mut Scene),
{
    pub(super) fn new(log: &EventLog, action: F) -> Self {
        Self { recorder: Recorder::new(log), action }
    }
}

impl<F> Behavior for OnHit<F>
where
    F: FnMut(ActorId, ActorId, &mut Scene),
{
    fn update(&mut self, me: ActorId, scene: &mut Scene, ctx: &mut TickContext<'_>) {
        self.recorder.update(me, scene, ctx);
    }

    fn on_collision(&mut self, me: ActorId, other: ActorId, scene: &mut Scene, ctx: &mut TickContext<'_>) {
        self.recorder.on_collision(me, other, scene, ctx);
        (self.action)(me, other, scene);
    }
}

/// Records like [`Recorder`] and runs a closure on every update
pub(super) struct OnUpdate<F> {
    recorder: Recorder,
    action: F,
}

impl<F> OnUpdate<F>
where
    F: FnMut(ActorId, &mut Scene),
{
    pub(super) fn new(log: &EventLog, action: F) -> Self {
        Self { recorder: Recorder::new(log), action }
    }
}

impl<F> Behavior for OnUpdate<F>
where
    F: FnMut(ActorId, &mut Scene),
{
    fn update(&mut self, me: ActorId, scene: &mut Scene, ctx: &mut TickContext<'_>) {
        self.recorder.update(me, scene, ctx);
        (self.action)(me, scene);
    }

    fn on_collision(&mut self, me: ActorId, other: ActorId, scene: &mut Scene, ctx: &mut TickContext<'_>) {
        self.recorder.on_collision(me, other, scene, ctx);
    }
}
