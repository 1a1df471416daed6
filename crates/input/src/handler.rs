//! Hold-timer input handler for terminal environments.
//!
//! Terminals usually report key presses (and auto-repeats) but no releases.
//! Each press keeps its intent active for a short hold window; repeats refresh
//! it. Once a release event is seen the handler switches to exact press/release
//! tracking for the rest of the session.

use crossterm::event::KeyCode;

use crate::map::{intent_for_key, Intent};
use crate::types::ControlInput;

// Long enough to bridge the gap between terminal auto-repeats, short enough
// that a single tap reads as a tap.
const DEFAULT_HOLD_MS: u32 = 150;

/// Tracks which intents are held and samples them once per tick.
#[derive(Debug, Clone)]
pub struct InputHandler {
    /// Remaining hold time per intent, indexed by `Intent::index`.
    remaining_ms: [u32; 4],
    /// Pressed state when the terminal reports releases.
    pressed: [bool; 4],
    hold_ms: u32,
    release_events: bool,
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl InputHandler {
    pub fn new() -> Self {
        Self::with_hold_ms(DEFAULT_HOLD_MS)
    }

    pub fn with_hold_ms(hold_ms: u32) -> Self {
        Self {
            remaining_ms: [0; 4],
            pressed: [false; 4],
            hold_ms,
            release_events: false,
        }
    }

    pub fn hold_ms(&self) -> u32 {
        self.hold_ms
    }

    /// Whether key releases have been observed on this terminal.
    pub fn release_events(&self) -> bool {
        self.release_events
    }

    /// Handle a press or auto-repeat. Returns the intent it drove, if any.
    pub fn handle_key_press(&mut self, code: KeyCode) -> Option<Intent> {
        let intent = intent_for_key(code)?;
        let i = intent.index();
        self.pressed[i] = true;
        self.remaining_ms[i] = self.hold_ms;
        Some(intent)
    }

    pub fn handle_key_release(&mut self, code: KeyCode) {
        self.release_events = true;
        if let Some(intent) = intent_for_key(code) {
            let i = intent.index();
            self.pressed[i] = false;
            self.remaining_ms[i] = 0;
        }
    }

    /// Drop every held intent (e.g. when focus is lost).
    pub fn clear(&mut self) {
        self.remaining_ms = [0; 4];
        self.pressed = [false; 4];
    }

    /// Sample the intents active for the coming tick, then age the hold
    /// timers by `elapsed_ms`.
    pub fn sample(&mut self, elapsed_ms: u32) -> ControlInput {
        let active = |i: usize| {
            if self.release_events {
                self.pressed[i]
            } else {
                self.remaining_ms[i] > 0
            }
        };
        let input = ControlInput {
            thrust: active(Intent::Thrust.index()),
            brake: active(Intent::Brake.index()),
            left: active(Intent::Left.index()),
            right: active(Intent::Right.index()),
        };
        for t in &mut self.remaining_ms {
            *t = t.saturating_sub(elapsed_ms);
        }
        input
    }
}
