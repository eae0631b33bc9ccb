//! Foundation module - Core utilities and types
//!
//! This module provides fundamental utilities used throughout the engine:
//! - Math types and degenerate-input guards
//! - Generational handles for the actor arena
//! - Time management for the frame driver
//! - Logging setup

pub mod math;
pub mod collections;
pub mod time;
pub mod logging;
