//! Engine: lifecycle and the `initialize` / `step` / `render` contract.

use crate::config::EngineConfig;
use crate::error::{EngineError, EngineResult};
use crate::grid::GlyphGrid;
use crate::snapshot::FlightSnapshot;
use crate::types::ControlInput;
use crate::world::SimulationState;

#[derive(Debug, Clone, PartialEq)]
enum Phase {
    Uninitialized,
    Ready {
        width: u16,
        height: u16,
        state: SimulationState,
    },
}

/// Owns the simulation and drives it one tick at a time.
///
/// Single-threaded by contract: every mutating call takes `&mut self`.
#[derive(Debug, Clone, PartialEq)]
pub struct Engine {
    config: EngineConfig,
    phase: Phase,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    /// Create an uninitialized engine with the default world.
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    /// Create an uninitialized engine that builds its world from `config`.
    ///
    /// ```
    /// use harvester_core::{Engine, EngineConfig};
    ///
    /// let mut engine = Engine::with_config(EngineConfig::empty().with_seed(3));
    /// assert_eq!(engine.config().seed, 3);
    /// assert!(!engine.is_ready());
    /// engine.initialize(20, 10).unwrap();
    /// assert_eq!(engine.snapshot().unwrap().ticks, 0);
    /// ```
    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            config,
            phase: Phase::Uninitialized,
        }
    }

    /// The world configuration used by `initialize` and `reset`.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Whether `initialize` has succeeded since creation or the last reset.
    pub fn is_ready(&self) -> bool {
        matches!(self.phase, Phase::Ready { .. })
    }

    /// Grid dimensions fixed at `initialize`.
    pub fn dimensions(&self) -> Option<(u16, u16)> {
        match &self.phase {
            Phase::Ready { width, height, .. } => Some((*width, *height)),
            Phase::Uninitialized => None,
        }
    }

    /// Fix the grid size and build the starting world.
    ///
    /// Dimensions are always validated. Once the engine is ready, further calls
    /// are ignored until [`Engine::reset`].
    pub fn initialize(&mut self, width: i32, height: i32) -> EngineResult<()> {
        let (w, h) = validate_dimensions(width, height)?;
        if self.is_ready() {
            return Ok(());
        }
        self.phase = Phase::Ready {
            width: w,
            height: h,
            state: SimulationState::new(&self.config),
        };
        Ok(())
    }

    /// Drop the world so the next `initialize` takes effect (e.g. on resize).
    pub fn reset(&mut self) {
        self.phase = Phase::Uninitialized;
    }

    /// Advance the simulation by `dt` seconds under `input`.
    ///
    /// `dt == 0` is a no-op. Negative or non-finite deltas are rejected.
    pub fn step(&mut self, dt: f32, input: ControlInput) -> EngineResult<()> {
        let Phase::Ready { state, .. } = &mut self.phase else {
            return Err(EngineError::UninitializedEngine);
        };
        if !dt.is_finite() || dt < 0.0 {
            return Err(EngineError::OutOfRangeInput(format!(
                "delta time must be finite and non-negative, got {dt}"
            )));
        }
        state.advance(f64::from(dt), input);
        Ok(())
    }

    /// Render the current state into a fresh grid.
    pub fn render(&self) -> EngineResult<GlyphGrid> {
        let (width, height) = self.dimensions().ok_or(EngineError::UninitializedEngine)?;
        let mut grid = GlyphGrid::new(width, height);
        self.render_into(&mut grid)?;
        Ok(grid)
    }

    /// Render into an existing grid, reusing its allocation.
    pub fn render_into(&self, grid: &mut GlyphGrid) -> EngineResult<()> {
        let Phase::Ready {
            width,
            height,
            state,
        } = &self.phase
        else {
            return Err(EngineError::UninitializedEngine);
        };
        grid.compose(*width, *height, |canvas| state.draw(canvas));
        Ok(())
    }

    /// Copy out the current flight telemetry without touching the state.
    pub fn snapshot(&self) -> EngineResult<FlightSnapshot> {
        match &self.phase {
            Phase::Ready {
                width,
                height,
                state,
            } => Ok(FlightSnapshot::capture(state, *width, *height)),
            Phase::Uninitialized => Err(EngineError::UninitializedEngine),
        }
    }

    /// Number of grid cells occupied by entities in view.
    pub fn visible_entity_count(&self) -> EngineResult<usize> {
        match &self.phase {
            Phase::Ready {
                width,
                height,
                state,
            } => Ok(state.visible_cells(*width, *height)),
            Phase::Uninitialized => Err(EngineError::UninitializedEngine),
        }
    }
}

fn validate_dimensions(width: i32, height: i32) -> EngineResult<(u16, u16)> {
    match (u16::try_from(width), u16::try_from(height)) {
        (Ok(w), Ok(h)) if w > 0 && h > 0 => Ok((w, h)),
        _ => Err(EngineError::InvalidDimensions { width, height }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const THRUST: ControlInput = ControlInput {
        thrust: true,
        brake: false,
        left: false,
        right: false,
    };

    #[test]
    fn step_before_initialize_fails() {
        let mut engine = Engine::new();
        assert_eq!(
            engine.step(0.016, THRUST),
            Err(EngineError::UninitializedEngine)
        );
        assert_eq!(engine.render(), Err(EngineError::UninitializedEngine));
        assert!(engine.snapshot().is_err());
    }

    #[test]
    fn invalid_dimensions_are_rejected() {
        let mut engine = Engine::new();
        for (w, h) in [(0, 24), (80, 0), (-1, 5), (70_000, 10)] {
            assert_eq!(
                engine.initialize(w, h),
                Err(EngineError::InvalidDimensions {
                    width: w,
                    height: h
                })
            );
        }
        assert!(!engine.is_ready());
    }

    #[test]
    fn second_initialize_is_ignored() {
        let mut engine = Engine::new();
        engine.initialize(80, 24).unwrap();
        engine.step(0.1, THRUST).unwrap();
        let before = engine.clone();

        engine.initialize(40, 10).unwrap();
        assert_eq!(engine, before);
        assert_eq!(engine.dimensions(), Some((80, 24)));
    }

    #[test]
    fn reset_allows_reinitialize() {
        let mut engine = Engine::new();
        engine.initialize(80, 24).unwrap();
        engine.reset();
        assert!(!engine.is_ready());
        engine.initialize(40, 10).unwrap();
        assert_eq!(engine.dimensions(), Some((40, 10)));
    }

    #[test]
    fn bad_delta_times_are_rejected() {
        let mut engine = Engine::new();
        engine.initialize(10, 5).unwrap();
        for dt in [-0.1, f32::NAN, f32::INFINITY] {
            assert!(matches!(
                engine.step(dt, THRUST),
                Err(EngineError::OutOfRangeInput(_))
            ));
        }
    }

    #[test]
    fn render_does_not_mutate() {
        let mut engine = Engine::new();
        engine.initialize(80, 24).unwrap();
        engine.step(0.016, THRUST).unwrap();
        let before = engine.clone();
        let a = engine.render().unwrap();
        let b = engine.render().unwrap();
        assert_eq!(a, b);
        assert_eq!(engine, before);
    }

    #[test]
    fn ship_is_drawn_at_grid_centre() {
        let mut engine = Engine::with_config(EngineConfig::empty());
        engine.initialize(10, 5).unwrap();
        let grid = engine.render().unwrap();
        assert_eq!(grid.count(), 1);
        assert_eq!(grid.get(5, 2).unwrap().glyph, '↑');
    }
}
