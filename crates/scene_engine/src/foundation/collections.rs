//! Specialized collection types

pub use slotmap::SlotMap;

slotmap::new_key_type! {
    /// Stable generational handle to an actor in a scene's arena
    ///
    /// Handles of removed actors never alias actors created later in the
    /// same slot.
    pub struct ActorId;
}

/// Arena of values keyed by [`ActorId`]
pub type ActorArena<T> = SlotMap<ActorId, T>;
