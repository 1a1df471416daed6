//! Shared types and constants.
//!
//! Pure data with no engine behaviour, usable from the core, the terminal host
//! and the C boundary alike.
//!
//! # Timing
//!
//! The engine is driven at a reference rate of 60 Hz, but `step` accepts any
//! non-negative delta. Large deltas are split into substeps:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_HZ` | 60 | Reference host loop rate |
//! | `REFERENCE_TICK_SECS` | 0.016 | Tick the per-tick friction factors are calibrated against |
//! | `MAX_SUBSTEP_SECS` | 1/60 | Longest single integration step (clamp-substep) |
//! | `MAX_FRAME_SECS` | 0.25 | Most simulated time applied by one `step` call |
//!
//! # Flight model
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `THRUST_ACCEL` | 30 | Units/s² along the heading while thrusting |
//! | `FRICTION_PER_TICK` | 0.999 | Passive velocity retention per reference tick |
//! | `BRAKE_FRICTION_PER_TICK` | 0.92 | Velocity retention per reference tick while braking |
//! | `MAX_SPEED` | 80 | Speed limit in units/s |
//! | `STOP_SPEED` | 0.1 | Below this (and not thrusting) the ship stops |
//! | `TURN_RATE` | 9.375 | Radians/s (0.15 rad per reference tick) |
//! | `FUEL_CAPACITY` | 100 | Starting fuel |
//! | `FUEL_BURN_PER_SEC` | 2 | Fuel consumed per second of thrust |
//!
//! # Examples
//!
//! ```
//! use harvester_types::{Cell, ControlInput, Rgb, Style};
//!
//! let input = ControlInput { thrust: true, ..ControlInput::IDLE };
//! assert_eq!(input.steer(), 0.0);
//!
//! let cell = Cell::default();
//! assert!(cell.is_background());
//! assert_eq!(cell.fg, Rgb::WHITE);
//! assert_eq!(Style::BOLD.bits(), 2);
//! ```

use bitflags::bitflags;

/// Reference host loop rate.
pub const TICK_HZ: u32 = 60;

/// Tick length the per-tick friction factors were tuned for.
pub const REFERENCE_TICK_SECS: f64 = 0.016;

/// Longest single integration step the engine will take.
pub const MAX_SUBSTEP_SECS: f64 = 1.0 / 60.0;

/// Upper bound on simulated time per `step` call (host stalls are dropped).
pub const MAX_FRAME_SECS: f64 = 0.25;

/// Thrust acceleration in units/s².
pub const THRUST_ACCEL: f64 = 30.0;

/// Passive friction, expressed as velocity retained per reference tick.
pub const FRICTION_PER_TICK: f64 = 0.999;

/// Brake friction, expressed as velocity retained per reference tick.
pub const BRAKE_FRICTION_PER_TICK: f64 = 0.92;

/// Speed limit in units/s.
pub const MAX_SPEED: f64 = 80.0;

/// Drift below this speed is cancelled when not thrusting.
pub const STOP_SPEED: f64 = 0.1;

/// Steering rate in radians/s.
pub const TURN_RATE: f64 = 0.15 / REFERENCE_TICK_SECS;

/// Fuel on spawn.
pub const FUEL_CAPACITY: f64 = 100.0;

/// Fuel burned per second of thrust.
pub const FUEL_BURN_PER_SEC: f64 = 2.0;

/// Maximum number of celestial bodies in a world.
pub const MAX_BODIES: usize = 16;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flight_constants_match_reference_tick() {
        // 0.15 rad per 16ms tick.
        assert!((TURN_RATE * REFERENCE_TICK_SECS - 0.15).abs() < 1e-12);
        assert!(MAX_SUBSTEP_SECS <= MAX_FRAME_SECS);
        assert!(STOP_SPEED < THRUST_ACCEL * REFERENCE_TICK_SECS);
    }

    #[test]
    fn style_bits_match_desktop_host() {
        assert_eq!(Style::empty().bits(), 0);
        assert_eq!(Style::BOLD.bits(), 2);
        assert_eq!(Style::ITALIC.bits(), 4);
        assert_eq!(Style::UNDERLINE.bits(), 8);
        assert_eq!(Style::DIM.bits(), 16);
        assert_eq!(Style::REVERSE.bits(), 32);
    }

    #[test]
    fn steer_cancels_when_both_pressed() {
        let both = ControlInput {
            left: true,
            right: true,
            ..ControlInput::IDLE
        };
        assert_eq!(both.steer(), 0.0);
        assert_eq!(
            ControlInput {
                left: true,
                ..ControlInput::IDLE
            }
            .steer(),
            -1.0
        );
    }

    #[test]
    fn background_ignores_position() {
        let cell = Cell {
            x: 7,
            y: 3,
            ..Cell::default()
        };
        assert!(cell.is_background());
        let star = Cell {
            glyph: '.',
            ..Cell::default()
        };
        assert!(!star.is_background());
    }
}

/// 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Linear blend of `self` over `under`.
    ///
    /// `alpha` is clamped to `[0, 1]`; `1.0` returns `self` unchanged.
    pub fn over(self, under: Rgb, alpha: f32) -> Rgb {
        let a = if alpha.is_nan() { 1.0 } else { alpha.clamp(0.0, 1.0) };
        let mix = |top: u8, bottom: u8| -> u8 {
            let v = f32::from(top) * a + f32::from(bottom) * (1.0 - a);
            v.round().clamp(0.0, 255.0) as u8
        };
        Rgb::new(mix(self.r, under.r), mix(self.g, under.g), mix(self.b, under.b))
    }
}

bitflags! {
    /// Text attributes carried by a cell.
    ///
    /// Bit values are part of the wire format and must not change.
    #[derive(Default)]
    pub struct Style: u32 {
        const BOLD = 1 << 1;
        const ITALIC = 1 << 2;
        const UNDERLINE = 1 << 3;
        const DIM = 1 << 4;
        const REVERSE = 1 << 5;
    }
}

/// One character cell of a glyph grid.
///
/// `x`/`y` are grid-local and 0-based. A cell is only ever stored in a grid
/// when its position lies inside the grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
    pub glyph: char,
    pub fg: Rgb,
    pub bg: Rgb,
    pub style: Style,
    /// Translucency in `[0, 1]`; `1.0` is opaque.
    pub alpha: f32,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            x: 0,
            y: 0,
            glyph: ' ',
            fg: Rgb::WHITE,
            bg: Rgb::BLACK,
            style: Style::empty(),
            alpha: 1.0,
        }
    }
}

impl Cell {
    /// Default background cell at a position.
    pub fn blank(x: i32, y: i32) -> Self {
        Self {
            x,
            y,
            ..Self::default()
        }
    }

    /// Whether the cell looks like untouched background (position ignored).
    pub fn is_background(&self) -> bool {
        let d = Cell::default();
        self.glyph == d.glyph
            && self.fg == d.fg
            && self.bg == d.bg
            && self.style == d.style
            && self.alpha == d.alpha
    }
}

/// Discrete control intents sampled once per tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ControlInput {
    pub thrust: bool,
    pub brake: bool,
    pub left: bool,
    pub right: bool,
}

impl ControlInput {
    /// No intents active.
    pub const IDLE: ControlInput = ControlInput {
        thrust: false,
        brake: false,
        left: false,
        right: false,
    };

    /// Steering direction: `-1` left, `1` right, `0` when neither or both.
    pub fn steer(&self) -> f64 {
        match (self.left, self.right) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            _ => 0.0,
        }
    }

    pub fn is_idle(&self) -> bool {
        *self == Self::IDLE
    }
}
