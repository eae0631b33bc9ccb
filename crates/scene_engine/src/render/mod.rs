//! # Rendering Sink
//!
//! The scene never rasterizes anything itself. Each tick it hands every
//! visible actor's world matrix and [`Appearance`] to a [`RenderSink`];
//! pixel and vertex formats belong to whatever sits behind the sink.
//!
//! - [`DrawList`] records commands (tests, replay, batching front-ends)
//! - [`LogSink`] traces each draw through the `log` facade

use crate::foundation::math::{Mat3, Mat3Ext};
use serde::{Deserialize, Serialize};

/// RGBA color, 8 bits per channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    /// Red
    pub r: u8,
    /// Green
    pub g: u8,
    /// Blue
    pub b: u8,
    /// Alpha
    pub a: u8,
}

impl Color {
    /// Opaque white
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    /// Opaque black
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    /// Opaque red
    pub const RED: Color = Color::rgb(230, 41, 55);
    /// Opaque green
    pub const GREEN: Color = Color::rgb(0, 228, 48);
    /// Opaque blue
    pub const BLUE: Color = Color::rgb(0, 121, 241);
    /// Opaque yellow
    pub const YELLOW: Color = Color::rgb(253, 249, 0);

    /// Opaque color from RGB
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

/// Shape descriptor handed to the render sink
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Appearance {
    /// Filled circle centered on the actor
    Circle {
        /// Radius in world units
        radius: f32,
        /// Fill color
        color: Color,
    },
    /// Filled rectangle centered on the actor
    Rectangle {
        /// Width in world units
        width: f32,
        /// Height in world units
        height: f32,
        /// Fill color
        color: Color,
    },
    /// Single character cell
    Glyph {
        /// Character to draw
        symbol: char,
        /// Glyph color
        color: Color,
    },
    /// Text box anchored at the actor
    Text {
        /// Text content
        text: String,
        /// Font size in world units
        font_size: f32,
        /// Text color
        color: Color,
    },
}

/// Receiver of per-actor draw calls
pub trait RenderSink {
    /// Called by the frame driver before each draw pass
    fn begin_frame(&mut self) {}

    /// Draw `appearance` with the given world matrix
    fn draw(&mut self, world: &Mat3, appearance: &Appearance);
}

/// One recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub struct DrawCommand {
    /// Pre-computed world matrix
    pub world: Mat3,
    /// What to draw
    pub appearance: Appearance,
}

/// Sink that records every draw call in order
#[derive(Debug, Clone, Default)]
pub struct DrawList {
    commands: Vec<DrawCommand>,
}

impl DrawList {
    /// Create an empty draw list
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded commands
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Number of recorded commands
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Whether nothing was recorded
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Drop all recorded commands
    pub fn clear(&mut self) {
        self.commands.clear();
    }
}

impl RenderSink for DrawList {
    fn draw(&mut self, world: &Mat3, appearance: &Appearance) {
        self.commands.push(DrawCommand {
            world: *world,
            appearance: appearance.clone(),
        });
    }
}

/// Sink that traces each draw call
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl RenderSink for LogSink {
    fn draw(&mut self, world: &Mat3, appearance: &Appearance) {
        let position = world.translation_part();
        log::trace!("draw {:?} at ({:.2}, {:.2})", appearance, position.x, position.y);
    }
}
