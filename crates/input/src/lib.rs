//! Terminal input module (engine-facing).
//!
//! Independent of any UI framework: maps `crossterm` key events to control
//! intents and turns presses into one [`ControlInput`](crate::types::ControlInput)
//! per tick, including on terminals that never report key releases.

pub mod handler;
pub mod map;

pub use harvester_types as types;

pub use handler::InputHandler;
pub use map::{intent_for_key, should_quit, should_restart, Intent};
