//! Structural changes recorded while a scene pass is iterating

use crate::foundation::collections::ActorId;
use std::collections::HashSet;

/// A deferred structural change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Mutation {
    /// Actor already lives in the arena; add it to the root registry
    Register(ActorId),
    /// Remove an actor and its descendants
    Remove(ActorId),
    Attach { parent: ActorId, child: ActorId },
    Detach { parent: ActorId, child: ActorId },
}

/// Queue of deferred mutations plus the set of actors already doomed
///
/// Doomed actors are skipped for the rest of the pass and cannot be removed
/// a second time. Queued attach/detach edits are mirrored as parent
/// overrides so hierarchy queries made later in the pass see the topology
/// the queue will produce.
#[derive(Debug, Default)]
pub(crate) struct PendingMutations {
    queue: Vec<Mutation>,
    doomed: HashSet<ActorId>,
    reparented: Vec<(ActorId, Option<ActorId>)>,
}

impl PendingMutations {
    pub(crate) fn push(&mut self, mutation: Mutation) {
        self.queue.push(mutation);
    }

    pub(crate) fn doom(&mut self, ids: impl IntoIterator<Item = ActorId>) {
        self.doomed.extend(ids);
    }

    pub(crate) fn is_doomed(&self, id: ActorId) -> bool {
        self.doomed.contains(&id)
    }

    /// Record that `child` will end the pass under `parent` (`None` = root)
    ///
    /// The latest override moves to the back, matching the order in which
    /// the commit appends the child to its new parent.
    pub(crate) fn reparent(&mut self, child: ActorId, parent: Option<ActorId>) {
        self.reparented.retain(|(id, _)| *id != child);
        self.reparented.push((child, parent));
    }

    /// Parent `child` will have once the queue is applied, if it was overridden
    pub(crate) fn pending_parent(&self, child: ActorId) -> Option<Option<ActorId>> {
        self.reparented
            .iter()
            .find(|(id, _)| *id == child)
            .map(|(_, parent)| *parent)
    }

    /// Children queued for attachment under `parent`, in attachment order
    pub(crate) fn adopted_by(&self, parent: ActorId) -> impl Iterator<Item = ActorId> + '_ {
        self.reparented
            .iter()
            .filter(move |(_, new_parent)| *new_parent == Some(parent))
            .map(|(child, _)| *child)
    }

    /// Take every queued mutation in recording order and forget the doomed set
    pub(crate) fn drain(&mut self) -> Vec<Mutation> {
        self.doomed.clear();
        self.reparented.clear();
        std::mem::take(&mut self.queue)
    }
}
