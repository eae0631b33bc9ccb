//! Scene - owns the actor arena and drives lifecycle passes
//!
//! Every pass (start, update, draw, end) walks a snapshot of the tick order:
//! roots in registration order, each followed by its descendants pre-order.
//! Parents therefore always refresh their world matrix before their children
//! read it.
//!
//! While a pass is running, structural edits are recorded and applied when
//! the pass ends. Queued attach and detach edits are visible to hierarchy
//! queries for the rest of the pass, so removals mark exactly the actors the
//! commit will delete as doomed, and the rest of the pass skips them.

use super::actor::Actor;
use super::behavior::{Behavior, TickContext};
use super::mutation::{Mutation, PendingMutations};
use crate::foundation::collections::{ActorArena, ActorId};
use crate::foundation::math::{Mat3, Vec2};
use crate::render::RenderSink;
use log::{debug, info, trace, warn};

/// Lifecycle state of a scene
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SceneState {
    /// Built but not yet started
    #[default]
    Created,
    /// Started; updates and draws run
    Running,
    /// `end` has run
    Ended,
}

/// Running counters for a scene
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SceneStats {
    /// Completed update passes
    pub ticks: u64,
    /// Collision callbacks dispatched
    pub collisions: u64,
    /// Actors added
    pub spawned: u64,
    /// Actors removed, descendants included
    pub removed: u64,
}

/// A collection of actors with a lifecycle
#[derive(Debug)]
pub struct Scene {
    name: String,
    actors: ActorArena<Actor>,
    roots: Vec<ActorId>,
    state: SceneState,
    pending: PendingMutations,
    iterating: bool,
    stats: SceneStats,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new("scene")
    }
}

impl Scene {
    /// Create an empty scene
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            actors: ActorArena::with_key(),
            roots: Vec::new(),
            state: SceneState::Created,
            pending: PendingMutations::default(),
            iterating: false,
            stats: SceneStats::default(),
        }
    }

    /// Scene name, used in log lines
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Lifecycle state
    pub fn state(&self) -> SceneState {
        self.state
    }

    /// Counters accumulated since creation
    pub fn stats(&self) -> SceneStats {
        self.stats
    }

    /// Whether a pass is currently running
    pub fn is_iterating(&self) -> bool {
        self.iterating
    }

    /// Number of actors owned, including ones spawned during the current pass
    pub fn len(&self) -> usize {
        self.actors.len()
    }

    /// Whether the scene owns no actors
    pub fn is_empty(&self) -> bool {
        self.actors.is_empty()
    }

    /// Whether `id` still refers to an actor of this scene
    pub fn contains(&self, id: ActorId) -> bool {
        self.actors.contains_key(id)
    }

    /// Whether `id` exists and is not scheduled for removal
    pub fn is_live(&self, id: ActorId) -> bool {
        self.contains(id) && !self.pending.is_doomed(id)
    }

    /// Actor behind a handle, if it still exists
    pub fn actor(&self, id: ActorId) -> Option<&Actor> {
        self.actors.get(id)
    }

    /// Mutable actor behind a handle, if it still exists
    pub fn actor_mut(&mut self, id: ActorId) -> Option<&mut Actor> {
        self.actors.get_mut(id)
    }

    /// Top-level actors in registration order
    pub fn roots(&self) -> &[ActorId] {
        &self.roots
    }

    /// Roots in order, each followed by its descendants pre-order
    pub fn tick_order(&self) -> Vec<ActorId> {
        let mut order = Vec::with_capacity(self.actors.len());
        for root in &self.roots {
            self.collect_subtree(*root, &mut order);
        }
        order
    }

    /// First actor in tick order with this name
    pub fn find_by_name(&self, name: &str) -> Option<ActorId> {
        self.tick_order()
            .into_iter()
            .find(|id| self.actors.get(*id).is_some_and(|actor| actor.name() == name))
    }

    /// World matrix of the actor's parent, if it has one
    pub fn parent_world(&self, id: ActorId) -> Option<Mat3> {
        let parent = self.actors.get(id)?.parent()?;
        self.actors.get(parent).map(|actor| *actor.transform().world_matrix())
    }

    /// Turn an actor to face a world-space point
    pub fn look_at(&mut self, id: ActorId, target: Vec2) -> bool {
        let parent_world = self.parent_world(id);
        match self.actors.get_mut(id) {
            Some(actor) => {
                actor.transform_mut().look_at(target, parent_world.as_ref());
                true
            }
            None => false,
        }
    }

    /// Add a top-level actor and return its handle
    ///
    /// During a pass the actor is owned immediately but joins the tick order
    /// only when the pass ends.
    pub fn add_actor(&mut self, mut actor: Actor) -> ActorId {
        let id = self.actors.insert_with_key(|id| {
            actor.assign_id(id);
            actor
        });
        self.stats.spawned += 1;

        if self.iterating {
            debug!("Scene '{}': deferring registration of {:?}", self.name, id);
            self.pending.push(Mutation::Register(id));
        } else {
            self.roots.push(id);
        }
        id
    }

    /// Remove an actor and all its descendants
    ///
    /// Returns false if the actor is unknown or already scheduled for removal.
    pub fn remove_actor(&mut self, id: ActorId) -> bool {
        if !self.is_live(id) {
            return false;
        }

        if self.iterating {
            let doomed = self.subtree(id);
            debug!(
                "Scene '{}': scheduling removal of {:?} ({} actor(s))",
                self.name,
                id,
                doomed.len()
            );
            self.pending.doom(doomed);
            self.pending.push(Mutation::Remove(id));
            true
        } else {
            self.remove_now(id)
        }
    }

    /// Attach `child` under `parent`, detaching it from wherever it was
    ///
    /// Refuses self-parenting, cycles, unknown or doomed actors, and a child
    /// that is already attached to `parent`. During a pass these checks see
    /// attachments queued earlier in the same pass.
    pub fn add_child(&mut self, parent: ActorId, child: ActorId) -> bool {
        if !self.iterating {
            return self.attach_now(parent, child);
        }

        if let Err(reason) = self.validate_attach(parent, child) {
            warn!("Scene '{}': cannot attach {:?} to {:?}: {}", self.name, child, parent, reason);
            return false;
        }
        self.pending.reparent(child, Some(parent));
        self.pending.push(Mutation::Attach { parent, child });
        true
    }

    /// Detach the first child of `parent` named `name`
    ///
    /// The detached child becomes a root at the end of the registry.
    pub fn remove_child(&mut self, parent: ActorId, name: &str) -> bool {
        let Some(child) = self.child_named(parent, name) else {
            return false;
        };

        if !self.iterating {
            return self.detach_now(parent, child);
        }

        if !self.is_live(parent) || !self.is_live(child) {
            return false;
        }
        self.pending.reparent(child, None);
        self.pending.push(Mutation::Detach { parent, child });
        true
    }

    /// Start every actor not yet started
    pub fn start(&mut self) {
        if self.reentered("start") {
            return;
        }
        match self.state {
            SceneState::Running => {
                warn!("Scene '{}' is already running", self.name);
                return;
            }
            SceneState::Ended => info!("Restarting scene '{}'", self.name),
            SceneState::Created => info!("Starting scene '{}' ({} actors)", self.name, self.len()),
        }
        self.state = SceneState::Running;

        let order = self.begin_pass();
        for id in order {
            if self.is_live(id) {
                self.start_actor(id);
            }
        }
        self.end_pass();
    }

    /// One tick: per actor in order, lazy start, update, then its collision pass
    pub fn update(&mut self, ctx: &mut TickContext<'_>) {
        if self.reentered("update") {
            return;
        }
        if self.state != SceneState::Running {
            self.start();
        }

        let order = self.begin_pass();
        for &id in &order {
            if !self.is_live(id) {
                continue;
            }
            self.start_actor(id);
            self.update_actor(id, ctx);
            self.collision_pass(id, &order, ctx);
        }
        self.end_pass();
        self.stats.ticks += 1;
    }

    /// Hand every actor to `sink` in tick order
    pub fn draw(&mut self, sink: &mut dyn RenderSink) {
        if self.reentered("draw") {
            return;
        }
        if self.state != SceneState::Running {
            self.start();
        }

        let order = self.begin_pass();
        for id in order {
            if !self.is_live(id) {
                continue;
            }
            self.start_actor(id);
            if let Some(actor) = self.actors.get(id) {
                match actor.behavior() {
                    Some(behavior) => behavior.draw(actor, sink),
                    None => actor.draw_appearance(sink),
                }
            }
        }
        self.end_pass();
    }

    /// Run every actor's end hook and mark the scene ended
    pub fn end(&mut self) {
        if self.reentered("end") {
            return;
        }
        if self.state == SceneState::Ended {
            warn!("Scene '{}' has already ended", self.name);
            return;
        }

        let order = self.begin_pass();
        for id in order {
            if !self.is_live(id) {
                continue;
            }
            self.start_actor(id);
            if let Some(mut behavior) = self.actors.get_mut(id).and_then(Actor::take_behavior) {
                behavior.end(id, self);
                self.restore_behavior(id, behavior);
            }
        }
        self.end_pass();

        self.state = SceneState::Ended;
        info!("Ended scene '{}' after {} ticks", self.name, self.stats.ticks);
    }

    fn reentered(&self, pass: &str) -> bool {
        if self.iterating {
            warn!("Scene '{}': {} called from inside a pass, ignored", self.name, pass);
        }
        self.iterating
    }

    fn begin_pass(&mut self) -> Vec<ActorId> {
        self.iterating = true;
        self.tick_order()
    }

    fn end_pass(&mut self) {
        self.iterating = false;

        let mutations = self.pending.drain();
        if !mutations.is_empty() {
            debug!("Scene '{}': applying {} deferred mutation(s)", self.name, mutations.len());
        }
        for mutation in mutations {
            match mutation {
                Mutation::Register(id) => {
                    let unparented = self.actors.get(id).is_some_and(|actor| actor.parent().is_none());
                    if unparented && !self.roots.contains(&id) {
                        self.roots.push(id);
                    }
                }
                Mutation::Remove(id) => {
                    self.remove_now(id);
                }
                Mutation::Attach { parent, child } => {
                    self.attach_now(parent, child);
                }
                Mutation::Detach { parent, child } => {
                    self.detach_now(parent, child);
                }
            }
        }
    }

    fn start_actor(&mut self, id: ActorId) {
        let behavior = match self.actors.get_mut(id) {
            Some(actor) if !actor.started() => {
                actor.start();
                actor.take_behavior()
            }
            _ => return,
        };
        trace!("Scene '{}': started {:?}", self.name, id);

        if let Some(mut behavior) = behavior {
            behavior.start(id, self);
            self.restore_behavior(id, behavior);
        }
    }

    fn update_actor(&mut self, id: ActorId, ctx: &mut TickContext<'_>) {
        if let Some(mut behavior) = self.actors.get_mut(id).and_then(Actor::take_behavior) {
            behavior.update(id, self, ctx);
            self.restore_behavior(id, behavior);
        }
        self.refresh_transform(id);
    }

    fn collision_pass(&mut self, id: ActorId, order: &[ActorId], ctx: &mut TickContext<'_>) {
        for &other in order {
            if other == id {
                continue;
            }
            if !self.is_live(id) {
                break;
            }
            if !self.is_live(other) {
                continue;
            }

            let hit = match (self.actors.get(id), self.actors.get(other)) {
                (Some(actor), Some(target)) => actor.check_for_collision(target),
                _ => false,
            };
            if !hit {
                continue;
            }

            trace!("Scene '{}': {:?} hit {:?}", self.name, id, other);
            self.stats.collisions += 1;
            if let Some(mut behavior) = self.actors.get_mut(id).and_then(Actor::take_behavior) {
                behavior.on_collision(id, other, self, ctx);
                self.restore_behavior(id, behavior);
            }
        }
    }

    fn restore_behavior(&mut self, id: ActorId, behavior: Box<dyn Behavior>) {
        if let Some(actor) = self.actors.get_mut(id) {
            actor.restore_behavior(behavior);
        }
    }

    fn refresh_transform(&mut self, id: ActorId) {
        let parent_world = self.parent_world(id);
        if let Some(actor) = self.actors.get_mut(id) {
            actor.transform_mut().update_transforms(parent_world.as_ref());
        }
    }

    fn refresh_subtree(&mut self, root: ActorId) {
        for id in self.subtree(root) {
            self.refresh_transform(id);
        }
    }

    fn subtree(&self, root: ActorId) -> Vec<ActorId> {
        let mut out = Vec::new();
        self.collect_subtree(root, &mut out);
        out
    }

    fn collect_subtree(&self, root: ActorId, out: &mut Vec<ActorId>) {
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            if self.actors.contains_key(id) {
                out.push(id);
                stack.extend(self.children_of(id).into_iter().rev());
            }
        }
    }

    /// Parent after queued edits apply
    fn parent_of(&self, id: ActorId) -> Option<ActorId> {
        self.pending
            .pending_parent(id)
            .unwrap_or_else(|| self.actors.get(id).and_then(Actor::parent))
    }

    /// Children after queued edits apply, in the order the commit leaves them
    fn children_of(&self, id: ActorId) -> Vec<ActorId> {
        let Some(actor) = self.actors.get(id) else {
            return Vec::new();
        };
        actor
            .children()
            .iter()
            .copied()
            .filter(|child| self.pending.pending_parent(*child).is_none())
            .chain(self.pending.adopted_by(id))
            .collect()
    }

    fn child_named(&self, parent: ActorId, name: &str) -> Option<ActorId> {
        self.children_of(parent)
            .into_iter()
            .find(|child| self.actors.get(*child).is_some_and(|actor| actor.name() == name))
    }

    fn validate_attach(&self, parent: ActorId, child: ActorId) -> Result<(), &'static str> {
        if parent == child {
            return Err("an actor cannot parent itself");
        }
        if !self.is_live(parent) || !self.is_live(child) {
            return Err("unknown or removed actor");
        }
        if self.parent_of(child) == Some(parent) {
            return Err("already a child of this parent");
        }

        let mut cursor = Some(parent);
        while let Some(id) = cursor {
            if id == child {
                return Err("would create a cycle");
            }
            cursor = self.parent_of(id);
        }
        Ok(())
    }

    fn attach_now(&mut self, parent: ActorId, child: ActorId) -> bool {
        if let Err(reason) = self.validate_attach(parent, child) {
            warn!("Scene '{}': cannot attach {:?} to {:?}: {}", self.name, child, parent, reason);
            return false;
        }

        self.unlink(child);
        if let Some(actor) = self.actors.get_mut(child) {
            actor.set_parent(Some(parent));
        }
        if let Some(actor) = self.actors.get_mut(parent) {
            actor.push_child(child);
        }
        self.refresh_subtree(child);
        debug!("Scene '{}': attached {:?} to {:?}", self.name, child, parent);
        true
    }

    fn detach_now(&mut self, parent: ActorId, child: ActorId) -> bool {
        let removed = self
            .actors
            .get_mut(parent)
            .is_some_and(|actor| actor.remove_child_id(child));
        if !removed {
            return false;
        }

        if let Some(actor) = self.actors.get_mut(child) {
            actor.set_parent(None);
        }
        self.roots.push(child);
        self.refresh_subtree(child);
        debug!("Scene '{}': detached {:?} from {:?}", self.name, child, parent);
        true
    }

    /// Drop the link from the child's current parent, or from the registry
    fn unlink(&mut self, child: ActorId) {
        match self.actors.get(child).and_then(Actor::parent) {
            Some(parent) => {
                if let Some(actor) = self.actors.get_mut(parent) {
                    actor.remove_child_id(child);
                }
            }
            None => self.roots.retain(|root| *root != child),
        }
    }

    fn remove_now(&mut self, id: ActorId) -> bool {
        if !self.actors.contains_key(id) {
            return false;
        }

        self.unlink(id);
        for doomed in self.subtree(id) {
            if let Some(actor) = self.actors.remove(doomed) {
                debug!("Scene '{}': removed '{}' {:?}", self.name, actor.name(), doomed);
                self.stats.removed += 1;
            }
        }
        true
    }
}
