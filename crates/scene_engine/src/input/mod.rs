//! Input management
//!
//! Actors see input only through [`InputSource`]: a boolean query per logical
//! action, polled once per tick. Where the answers come from (keyboard,
//! gamepad, a replay script) is up to the implementor.

use bitflags::bitflags;
use std::collections::VecDeque;

bitflags! {
    /// Logical input actions
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct InputActions: u32 {
        /// Move up
        const MOVE_UP = 1 << 0;
        /// Move down
        const MOVE_DOWN = 1 << 1;
        /// Move left
        const MOVE_LEFT = 1 << 2;
        /// Move right
        const MOVE_RIGHT = 1 << 3;
        /// Primary action (shoot)
        const FIRE = 1 << 4;
        /// Request shutdown
        const QUIT = 1 << 5;
    }
}

/// Read-only view of input for one tick
pub trait InputSource {
    /// Whether every action in `actions` is currently held
    fn is_down(&self, actions: InputActions) -> bool;

    /// Whether every action in `actions` went down this tick
    fn was_pressed(&self, actions: InputActions) -> bool;
}

/// Input source that never reports anything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoInput;

impl InputSource for NoInput {
    fn is_down(&self, _actions: InputActions) -> bool {
        false
    }

    fn was_pressed(&self, _actions: InputActions) -> bool {
        false
    }
}

/// Held/pressed action state fed by platform events
#[derive(Debug, Clone, Default)]
pub struct InputState {
    held: InputActions,
    pressed: InputActions,
}

impl InputState {
    /// Create an empty input state
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear per-tick edges; call once at the start of every tick
    pub fn begin_frame(&mut self) {
        self.pressed = InputActions::empty();
    }

    /// Record an action going down or up
    pub fn handle_action(&mut self, actions: InputActions, down: bool) {
        if down {
            self.pressed |= actions & !self.held;
            self.held |= actions;
        } else {
            self.held &= !actions;
        }
    }

    /// Currently held actions
    pub fn held(&self) -> InputActions {
        self.held
    }
}

impl InputSource for InputState {
    fn is_down(&self, actions: InputActions) -> bool {
        self.held.contains(actions)
    }

    fn was_pressed(&self, actions: InputActions) -> bool {
        self.pressed.contains(actions)
    }
}

/// Replays a fixed list of held-action frames, one per tick
///
/// After the script runs out nothing is held.
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    frames: VecDeque<InputActions>,
    state: InputState,
}

impl ScriptedInput {
    /// Create from per-tick held actions
    pub fn new(frames: impl IntoIterator<Item = InputActions>) -> Self {
        Self {
            frames: frames.into_iter().collect(),
            state: InputState::new(),
        }
    }

    /// Advance to the next scripted frame
    pub fn advance(&mut self) {
        let next = self.frames.pop_front().unwrap_or_else(InputActions::empty);
        self.state.begin_frame();
        self.state.handle_action(!next & InputActions::all(), false);
        self.state.handle_action(next, true);
    }

    /// Frames left in the script
    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

impl InputSource for ScriptedInput {
    fn is_down(&self, actions: InputActions) -> bool {
        self.state.is_down(actions)
    }

    fn was_pressed(&self, actions: InputActions) -> bool {
        self.state.was_pressed(actions)
    }
}

/// Input sources that advance once per tick under the frame driver
pub trait FrameInput: InputSource {
    /// Called by the driver before each tick
    fn begin_frame(&mut self);
}

impl FrameInput for NoInput {
    fn begin_frame(&mut self) {}
}

impl FrameInput for InputState {
    fn begin_frame(&mut self) {
        InputState::begin_frame(self);
    }
}

impl FrameInput for ScriptedInput {
    fn begin_frame(&mut self) {
        self.advance();
    }
}
