//! Starting configuration of a simulation.

use arrayvec::ArrayVec;

use crate::types::{Rgb, MAX_BODIES};
use crate::world::Vec2;

/// A fixed celestial body drawn in world space.
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    pub name: String,
    pub pos: Vec2,
    pub glyph: char,
    pub color: Rgb,
}

impl Body {
    /// A body at world position `(x, y)`.
    pub fn new(name: &str, x: f64, y: f64, glyph: char, color: Rgb) -> Self {
        Self {
            name: name.to_string(),
            pos: Vec2::new(x, y),
            glyph,
            color,
        }
    }
}

/// Everything `initialize` needs to build the starting world.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Seed for the star field.
    pub seed: u32,
    /// Ship spawn position.
    pub spawn: Vec2,
    /// Ship spawn heading in radians (screen space, y down).
    pub spawn_heading: f64,
    /// On average one world cell in this many holds a star; `0` disables stars.
    pub star_sparsity: u32,
    pub bodies: ArrayVec<Body, MAX_BODIES>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        let mut bodies = ArrayVec::new();
        bodies.push(Body::new("Earth", 20.0, 8.0, '●', Rgb::new(0, 100, 255)));
        bodies.push(Body::new("Saturn", 60.0, 18.0, '◎', Rgb::new(200, 180, 100)));
        bodies.push(Body::new("Mars", 15.0, 20.0, '●', Rgb::new(255, 50, 50)));
        bodies.push(Body::new("Moon", 70.0, 5.0, '○', Rgb::new(220, 220, 220)));
        Self {
            seed: 1,
            spawn: Vec2::new(40.0, 12.0),
            spawn_heading: -std::f64::consts::FRAC_PI_2,
            star_sparsity: 21,
            bodies,
        }
    }
}

impl EngineConfig {
    /// Set the star field seed.
    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = seed;
        self
    }

    /// Set where the ship starts.
    pub fn with_spawn(mut self, x: f64, y: f64) -> Self {
        self.spawn = Vec2::new(x, y);
        self
    }

    /// Set the star density; see [`EngineConfig::star_sparsity`].
    pub fn with_star_sparsity(mut self, star_sparsity: u32) -> Self {
        self.star_sparsity = star_sparsity;
        self
    }

    /// An empty sky: no stars and no bodies, only the ship.
    pub fn empty() -> Self {
        Self {
            star_sparsity: 0,
            bodies: ArrayVec::new(),
            ..Self::default()
        }
    }

    /// Add a body; returns `false` when the world is already full.
    pub fn push_body(&mut self, body: Body) -> bool {
        self.bodies.try_push(body).is_ok()
    }
}
