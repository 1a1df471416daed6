//! Core simulation: deterministic, fixed-timestep, glyph-grid output.
//!
//! This crate contains the world model, the flight physics and the render
//! contract. It has no dependencies on terminals, windowing or I/O, and it
//! never logs: every failure is returned as an [`EngineError`].
//!
//! - **Deterministic**: identical `(dt, input)` sequences produce identical grids
//! - **Bounded**: a stalled host cannot push more than `MAX_FRAME_SECS` into one tick
//! - **Sparse output**: renders list only cells that differ from the background
//!
//! # Module Structure
//!
//! - [`engine`]: lifecycle (`initialize`, `step`, `render`, `reset`)
//! - [`world`]: ship, bodies, star field and the flight model
//! - [`grid`]: the glyph grid and its composing canvas
//! - [`wire`]: flat count-prefixed exchange format
//! - [`config`]: starting configuration
//! - [`snapshot`]: read-only flight telemetry
//! - [`control`]: decoding of raw integer control flags
//!
//! # Example
//!
//! ```
//! use harvester_core::Engine;
//! use harvester_types::ControlInput;
//!
//! let mut engine = Engine::new();
//! engine.initialize(80, 24).unwrap();
//!
//! let input = ControlInput { thrust: true, ..ControlInput::IDLE };
//! engine.step(1.0 / 60.0, input).unwrap();
//!
//! let grid = engine.render().unwrap();
//! assert_eq!((grid.width(), grid.height()), (80, 24));
//! assert!(grid.count() >= 1); // at least the ship
//! ```

pub mod config;
pub mod control;
pub mod engine;
pub mod error;
pub mod grid;
pub mod rng;
pub mod snapshot;
pub mod wire;
pub mod world;

pub use harvester_types as types;

pub use config::{Body, EngineConfig};
pub use control::control_from_raw;
pub use engine::Engine;
pub use error::{EngineError, EngineResult};
pub use grid::{Canvas, GlyphGrid};
pub use rng::SimpleRng;
pub use snapshot::FlightSnapshot;
pub use wire::{WireCell, WireGrid};
pub use world::{Ship, SimulationState, Star, Vec2};
