//! Actors: identity, transform, optional collider and hierarchy links
//!
//! Hierarchy links are arena handles. The scene owns every actor and is the
//! only place parent/child links change, so a removed actor can never be
//! reached through a dangling reference.

use super::behavior::Behavior;
use crate::foundation::collections::ActorId;
use crate::foundation::math::Vec2;
use crate::physics::Collider;
use crate::render::{Appearance, RenderSink};
use crate::transform::Transform2D;
use std::fmt;

/// A simulated entity in a scene
pub struct Actor {
    id: ActorId,
    name: String,
    started: bool,
    transform: Transform2D,
    collider: Option<Collider>,
    appearance: Option<Appearance>,
    parent: Option<ActorId>,
    children: Vec<ActorId>,
    behavior: Option<Box<dyn Behavior>>,
}

impl Actor {
    /// Create an actor at a local position
    ///
    /// The id stays null until the actor is added to a scene.
    pub fn new(name: impl Into<String>, position: Vec2) -> Self {
        Self {
            id: ActorId::default(),
            name: name.into(),
            started: false,
            transform: Transform2D::from_position(position),
            collider: None,
            appearance: None,
            parent: None,
            children: Vec::new(),
            behavior: None,
        }
    }

    /// Builder pattern: attach a collider
    pub fn with_collider(mut self, collider: Collider) -> Self {
        self.collider = Some(collider);
        self
    }

    /// Builder pattern: set what the render sink draws
    pub fn with_appearance(mut self, appearance: Appearance) -> Self {
        self.appearance = Some(appearance);
        self
    }

    /// Builder pattern: attach variant behavior
    pub fn with_behavior(mut self, behavior: impl Behavior + 'static) -> Self {
        self.behavior = Some(Box::new(behavior));
        self
    }

    /// Builder pattern: set the local rotation
    pub fn with_rotation(mut self, radians: f32) -> Self {
        self.transform.set_rotation(radians);
        self.transform.update_transforms(None);
        self
    }

    /// Arena handle (null before the actor joins a scene)
    pub fn id(&self) -> ActorId {
        self.id
    }

    /// Name, not guaranteed unique
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether `start` has run
    pub fn started(&self) -> bool {
        self.started
    }

    /// Mark the actor started
    ///
    /// Does not guard against being called twice; the scene checks
    /// [`started`](Self::started) before calling it.
    pub fn start(&mut self) {
        self.started = true;
    }

    /// Transform
    pub fn transform(&self) -> &Transform2D {
        &self.transform
    }

    /// Mutable transform; world matrices refresh on the next scene update
    pub fn transform_mut(&mut self) -> &mut Transform2D {
        &mut self.transform
    }

    /// World-space position as of the last transform update
    pub fn world_position(&self) -> Vec2 {
        self.transform.world_position()
    }

    /// Collider, if any
    pub fn collider(&self) -> Option<&Collider> {
        self.collider.as_ref()
    }

    /// Attach, replace or remove the collider
    pub fn set_collider(&mut self, collider: Option<Collider>) {
        self.collider = collider;
    }

    /// Appearance, if any
    pub fn appearance(&self) -> Option<&Appearance> {
        self.appearance.as_ref()
    }

    /// Attach, replace or remove the appearance
    pub fn set_appearance(&mut self, appearance: Option<Appearance>) {
        self.appearance = appearance;
    }

    /// Parent handle (non-owning)
    pub fn parent(&self) -> Option<ActorId> {
        self.parent
    }

    /// Child handles in attachment order
    pub fn children(&self) -> &[ActorId] {
        &self.children
    }

    /// Whether this actor's collider overlaps `other`'s
    ///
    /// False if either has no collider; see [`Collider::check_collision`].
    pub fn check_for_collision(&self, other: &Actor) -> bool {
        Collider::check_collision(self, other)
    }

    /// Hand the appearance to `sink` at the current world matrix
    pub fn draw_appearance(&self, sink: &mut dyn RenderSink) {
        if let Some(appearance) = &self.appearance {
            sink.draw(self.transform.world_matrix(), appearance);
        }
    }

    pub(crate) fn assign_id(&mut self, id: ActorId) {
        self.id = id;
    }

    pub(crate) fn set_parent(&mut self, parent: Option<ActorId>) {
        self.parent = parent;
    }

    pub(crate) fn push_child(&mut self, child: ActorId) {
        self.children.push(child);
    }

    pub(crate) fn remove_child_id(&mut self, child: ActorId) -> bool {
        let before = self.children.len();
        self.children.retain(|id| *id != child);
        self.children.len() != before
    }

    pub(crate) fn behavior(&self) -> Option<&dyn Behavior> {
        self.behavior.as_deref()
    }

    pub(crate) fn take_behavior(&mut self) -> Option<Box<dyn Behavior>> {
        self.behavior.take()
    }

    pub(crate) fn restore_behavior(&mut self, behavior: Box<dyn Behavior>) {
        if self.behavior.is_none() {
            self.behavior = Some(behavior);
        }
    }
}

impl fmt::Debug for Actor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Actor")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("started", &self.started)
            .field("world_position", &self.world_position())
            .field("collider", &self.collider)
            .field("parent", &self.parent)
            .field("children", &self.children)
            .field("has_behavior", &self.behavior.is_some())
            .finish()
    }
}
