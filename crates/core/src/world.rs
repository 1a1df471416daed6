//! Simulation state: the ship, the bodies around it and the star field.
//!
//! World space is unbounded and uses screen orientation (x right, y down).
//! Positions map to grid cells through a camera that keeps the ship centred.

use std::f64::consts::{FRAC_PI_4, FRAC_PI_8, TAU};

use arrayvec::ArrayVec;

use crate::config::{Body, EngineConfig};
use crate::grid::Canvas;
use crate::rng::{cell_seed, SimpleRng};
use crate::types::*;

const SHIP_COLOR: Rgb = Rgb::new(255, 255, 0);
const STAR_COLOR: Rgb = Rgb::new(100, 100, 100);
const STAR_ALPHA: f32 = 0.6;

/// Heading arrows, clockwise from east in 45° sectors.
const SHIP_GLYPHS: [char; 8] = ['→', '↘', '↓', '↙', '←', '↖', '↑', '↗'];

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    /// Create a vector from its components.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean length.
    pub fn length(&self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Grid cell containing this point.
    fn cell(&self) -> (i32, i32) {
        (self.x.floor() as i32, self.y.floor() as i32)
    }
}

/// The player ship.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ship {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Radians in `[0, 2π)`, 0 pointing right.
    pub heading: f64,
    pub fuel: f64,
}

impl Ship {
    fn spawn(config: &EngineConfig) -> Self {
        Self {
            pos: config.spawn,
            vel: Vec2::ZERO,
            heading: config.spawn_heading.rem_euclid(TAU),
            fuel: FUEL_CAPACITY,
        }
    }

    /// Speed in units/s.
    pub fn speed(&self) -> f64 {
        self.vel.length()
    }

    /// Arrow glyph for the current heading.
    pub fn glyph(&self) -> char {
        let sector = ((self.heading + FRAC_PI_8) / FRAC_PI_4).floor() as usize % SHIP_GLYPHS.len();
        SHIP_GLYPHS[sector]
    }

    /// One integration step of length `h` (at most [`MAX_SUBSTEP_SECS`]).
    fn integrate(&mut self, h: f64, input: ControlInput) {
        self.heading = (self.heading + input.steer() * TURN_RATE * h).rem_euclid(TAU);

        let thrusting = input.thrust && self.fuel > 0.0;
        if thrusting {
            self.vel.x += self.heading.cos() * THRUST_ACCEL * h;
            self.vel.y += self.heading.sin() * THRUST_ACCEL * h;
            self.fuel = (self.fuel - FUEL_BURN_PER_SEC * h).max(0.0);
        }

        let per_tick = if input.brake {
            BRAKE_FRICTION_PER_TICK
        } else {
            FRICTION_PER_TICK
        };
        let retain = per_tick.powf(h / REFERENCE_TICK_SECS);
        self.vel.x *= retain;
        self.vel.y *= retain;

        let speed = self.speed();
        if speed > MAX_SPEED {
            self.vel.x = self.vel.x / speed * MAX_SPEED;
            self.vel.y = self.vel.y / speed * MAX_SPEED;
        } else if !thrusting && speed < STOP_SPEED {
            self.vel = Vec2::ZERO;
        }

        self.pos.x += self.vel.x * h;
        self.pos.y += self.vel.y * h;
    }
}

/// A background star at a fixed world cell.
///
/// Stars are not stored: whether a cell holds one is a pure function of the
/// seed and the cell, so the field is endless and identical on every visit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Star {
    pub x: i32,
    pub y: i32,
    pub glyph: char,
}

/// Authoritative world model mutated by `step`.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationState {
    pub(crate) ship: Ship,
    pub(crate) bodies: ArrayVec<Body, MAX_BODIES>,
    pub(crate) star_seed: u32,
    pub(crate) star_sparsity: u32,
    pub(crate) elapsed_secs: f64,
    pub(crate) ticks: u64,
}

impl SimulationState {
    /// Build the starting world for a configuration.
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            ship: Ship::spawn(config),
            bodies: config.bodies.clone(),
            star_seed: config.seed,
            star_sparsity: config.star_sparsity,
            elapsed_secs: 0.0,
            ticks: 0,
        }
    }

    pub fn ship(&self) -> &Ship {
        &self.ship
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    /// The star in world cell `(x, y)`, if there is one.
    pub fn star_at(&self, x: i32, y: i32) -> Option<Star> {
        if self.star_sparsity == 0 {
            return None;
        }
        let mut rng = SimpleRng::new(cell_seed(self.star_seed, x, y));
        if rng.next_range(self.star_sparsity) != 0 {
            return None;
        }
        let glyph = if rng.next_range(5) == 0 { '*' } else { '.' };
        Some(Star { x, y, glyph })
    }

    /// Stars in the world cells a `width x height` grid shows, row-major.
    pub fn stars_in_view(&self, width: u16, height: u16) -> impl Iterator<Item = Star> + '_ {
        let (cx, cy) = self.camera(width, height);
        (0..i32::from(height)).flat_map(move |gy| {
            (0..i32::from(width))
                .filter_map(move |gx| self.star_at(cx.saturating_add(gx), cy.saturating_add(gy)))
        })
    }

    /// Simulated seconds since spawn, after clamping.
    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed_secs
    }

    /// Number of non-zero steps taken.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Advance by `dt` seconds.
    ///
    /// `dt` is capped at [`MAX_FRAME_SECS`] and split into equal substeps no
    /// longer than [`MAX_SUBSTEP_SECS`]. A zero `dt` leaves the state untouched.
    pub fn advance(&mut self, dt: f64, input: ControlInput) {
        let total = dt.min(MAX_FRAME_SECS);
        if total <= 0.0 {
            return;
        }
        let substeps = (total / MAX_SUBSTEP_SECS).ceil().max(1.0) as u32;
        let h = total / f64::from(substeps);
        for _ in 0..substeps {
            self.ship.integrate(h, input);
        }
        self.elapsed_secs += total;
        self.ticks += 1;
    }

    /// Grid-space origin of the camera for a grid of the given size.
    pub fn camera(&self, width: u16, height: u16) -> (i32, i32) {
        let (x, y) = self.ship.pos.cell();
        (
            x.saturating_sub(i32::from(width / 2)),
            y.saturating_sub(i32::from(height / 2)),
        )
    }

    /// Draw all entities: stars, then bodies, then the ship on top.
    pub fn draw(&self, canvas: &mut Canvas<'_>) {
        let (cx, cy) = self.camera(canvas.width(), canvas.height());

        for star in self.stars_in_view(canvas.width(), canvas.height()) {
            canvas.put(Cell {
                x: star.x.saturating_sub(cx),
                y: star.y.saturating_sub(cy),
                glyph: star.glyph,
                fg: STAR_COLOR,
                bg: Rgb::BLACK,
                style: Style::DIM,
                alpha: STAR_ALPHA,
            });
        }

        for body in &self.bodies {
            let (bx, by) = body.pos.cell();
            canvas.put(Cell {
                x: bx.saturating_sub(cx),
                y: by.saturating_sub(cy),
                glyph: body.glyph,
                fg: body.color,
                bg: Rgb::BLACK,
                style: Style::empty(),
                alpha: 1.0,
            });
        }

        let (px, py) = self.ship.pos.cell();
        canvas.put(Cell {
            x: px.saturating_sub(cx),
            y: py.saturating_sub(cy),
            glyph: self.ship.glyph(),
            fg: SHIP_COLOR,
            bg: Rgb::BLACK,
            style: Style::BOLD,
            alpha: 1.0,
        });
    }

    /// Number of distinct grid cells occupied by entities in view.
    pub fn visible_cells(&self, width: u16, height: u16) -> usize {
        let (cx, cy) = self.camera(width, height);
        let in_view = |(x, y): (i32, i32)| {
            let (gx, gy) = (x.saturating_sub(cx), y.saturating_sub(cy));
            gx >= 0 && gy >= 0 && gx < i32::from(width) && gy < i32::from(height)
        };

        // Bodies and the ship, minus cells a star already counts for.
        let mut others: ArrayVec<(i32, i32), { MAX_BODIES + 1 }> = self
            .bodies
            .iter()
            .map(|b| b.pos.cell())
            .chain(std::iter::once(self.ship.pos.cell()))
            .filter(|&c| in_view(c) && self.star_at(c.0, c.1).is_none())
            .collect();
        others.sort_unstable();
        let mut distinct = others.len();
        for pair in others.windows(2) {
            if pair[0] == pair[1] {
                distinct -= 1;
            }
        }

        self.stars_in_view(width, height).count() + distinct
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    fn ship_only() -> SimulationState {
        SimulationState::new(&EngineConfig::empty())
    }

    const THRUST: ControlInput = ControlInput {
        thrust: true,
        brake: false,
        left: false,
        right: false,
    };

    #[test]
    fn thrust_increases_speed() {
        let mut s = ship_only();
        s.advance(0.016, THRUST);
        assert!(s.ship.speed() > 0.0);
        // Facing up: y decreases.
        assert!(s.ship.vel.y < 0.0);
        assert!(s.ship.vel.x.abs() < 1e-9);
    }

    #[test]
    fn braking_decreases_speed() {
        let mut s = ship_only();
        for _ in 0..10 {
            s.advance(0.016, THRUST);
        }
        let before = s.ship.speed();
        s.advance(
            0.016,
            ControlInput {
                brake: true,
                ..ControlInput::IDLE
            },
        );
        assert!(s.ship.speed() < before);
    }

    #[test]
    fn steering_changes_heading() {
        let mut s = ship_only();
        let initial = s.ship.heading;
        s.advance(
            0.016,
            ControlInput {
                right: true,
                ..ControlInput::IDLE
            },
        );
        assert!((s.ship.heading - (initial + 0.15)).abs() < 1e-9);
    }

    #[test]
    fn heading_stays_normalized() {
        let mut s = ship_only();
        let left = ControlInput {
            left: true,
            ..ControlInput::IDLE
        };
        for _ in 0..500 {
            s.advance(0.016, left);
            assert!((0.0..TAU).contains(&s.ship.heading));
        }
    }

    #[test]
    fn speed_is_limited() {
        let mut s = ship_only();
        for _ in 0..2000 {
            s.advance(0.25, THRUST);
        }
        assert!(s.ship.speed() <= MAX_SPEED + 1e-9);
    }

    #[test]
    fn slow_drift_snaps_to_rest() {
        let mut s = ship_only();
        s.ship.vel = Vec2::new(0.05, 0.0);
        s.advance(0.016, ControlInput::IDLE);
        assert_eq!(s.ship.vel, Vec2::ZERO);
    }

    #[test]
    fn fuel_burns_and_empty_tank_stops_thrust() {
        let mut s = ship_only();
        s.advance(0.25, THRUST);
        assert!(s.ship.fuel < FUEL_CAPACITY);

        s.ship.fuel = 0.0;
        s.ship.vel = Vec2::ZERO;
        s.advance(0.016, THRUST);
        assert_eq!(s.ship.vel, Vec2::ZERO);
    }

    #[test]
    fn ship_glyph_follows_heading() {
        let mut ship = ship_only().ship;
        for (heading, glyph) in [
            (0.0, '→'),
            (FRAC_PI_2, '↓'),
            (PI, '←'),
            (3.0 * FRAC_PI_2, '↑'),
            (TAU - 0.01, '→'),
            (FRAC_PI_4, '↘'),
        ] {
            ship.heading = heading;
            assert_eq!(ship.glyph(), glyph, "heading {heading}");
        }
    }

    #[test]
    fn stars_are_seeded() {
        let config = EngineConfig::default();
        let a = SimulationState::new(&config);
        let b = SimulationState::new(&config);
        let c = SimulationState::new(&config.clone().with_seed(2));
        let field = |s: &SimulationState| s.stars_in_view(80, 24).collect::<Vec<_>>();
        assert_eq!(field(&a), field(&b));
        assert_ne!(field(&a), field(&c));
    }

    #[test]
    fn star_density_follows_sparsity() {
        let s = SimulationState::new(&EngineConfig::default());
        // 200 x 100 cells at one star in 21.
        let n = s.stars_in_view(200, 100).count();
        assert!((700..1300).contains(&n), "{n} stars");
        assert_eq!(ship_only().stars_in_view(200, 100).count(), 0);
    }

    #[test]
    fn star_field_has_no_edge() {
        let mut s = SimulationState::new(&EngineConfig::default());
        for (x, y) in [(40.0, 12.0), (1.0e6, -3.0e5), (-7.5e7, 2.0e7)] {
            s.ship.pos = Vec2::new(x, y);
            assert!(s.stars_in_view(80, 24).count() > 40, "no stars at ({x}, {y})");
        }
    }

    #[test]
    fn visible_cells_match_drawn_cells() {
        let mut s = SimulationState::new(&EngineConfig::default());
        let mut grid = crate::grid::GlyphGrid::new(30, 10);
        for i in 0..200 {
            s.ship.pos = Vec2::new(f64::from(i) * 0.7 - 40.0, f64::from(i % 13) * 1.3);
            grid.compose(30, 10, |c| s.draw(c));
            assert_eq!(s.visible_cells(30, 10), grid.count(), "at step {i}");
        }
    }

    #[test]
    fn camera_centres_ship() {
        let s = ship_only();
        let (cx, cy) = s.camera(10, 5);
        assert_eq!((cx, cy), (35, 10));
    }
}
