//! Headless scripted runs.
//!
//! A script fixes the seed, the grid size and a list of control segments; the
//! report carries the final telemetry and the rendered grid in wire form.
//!
//! ```json
//! { "seed": 7, "width": 80, "height": 24, "dt": 0.0166,
//!   "steps": [ { "thrust": true, "ticks": 30 }, { "left": true, "ticks": 4 } ] }
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::{Engine, EngineConfig, FlightSnapshot, WireGrid};
use crate::types::{ControlInput, TICK_HZ};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SimScript {
    /// Falls back to the host seed when absent.
    #[serde(default)]
    pub seed: Option<u32>,
    pub width: i32,
    pub height: i32,
    #[serde(default = "default_dt")]
    pub dt: f32,
    #[serde(default)]
    pub steps: Vec<SimStep>,
}

/// One control segment held for `ticks` consecutive steps.
///
/// A segment always runs at least one step, so `"ticks": 0` behaves like `1`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SimStep {
    #[serde(default)]
    pub thrust: bool,
    #[serde(default)]
    pub brake: bool,
    #[serde(default)]
    pub left: bool,
    #[serde(default)]
    pub right: bool,
    #[serde(default = "default_ticks")]
    pub ticks: u32,
}

impl SimStep {
    pub fn input(&self) -> ControlInput {
        ControlInput {
            thrust: self.thrust,
            brake: self.brake,
            left: self.left,
            right: self.right,
        }
    }
}

fn default_dt() -> f32 {
    1.0 / TICK_HZ as f32
}

fn default_ticks() -> u32 {
    1
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimReport {
    pub snapshot: FlightSnapshot,
    pub grid: WireGrid,
}

/// Run `script` on a fresh engine.
pub fn run(script: &SimScript, default_seed: u32) -> Result<SimReport> {
    let seed = script.seed.unwrap_or(default_seed);
    let mut engine = Engine::with_config(EngineConfig::default().with_seed(seed));
    engine
        .initialize(script.width, script.height)
        .context("sim: initialize")?;

    let mut ticks = 0u64;
    for (i, step) in script.steps.iter().enumerate() {
        let input = step.input();
        let n = step.ticks.max(1);
        for _ in 0..n {
            engine
                .step(script.dt, input)
                .with_context(|| format!("sim: step segment {i}"))?;
        }
        ticks += u64::from(n);
    }

    let grid = engine.render()?;
    let snapshot = engine.snapshot()?;
    tracing::info!(seed, ticks, cells = grid.count(), "sim finished");
    Ok(SimReport {
        snapshot,
        grid: WireGrid::from(&grid),
    })
}

/// Parse a JSON script and return the report as pretty JSON.
pub fn run_json(input: &str, default_seed: u32) -> Result<String> {
    let script: SimScript = serde_json::from_str(input).context("sim: invalid script")?;
    let report = run(&script, default_seed)?;
    Ok(serde_json::to_string_pretty(&report)?)
}
