//! Read-only telemetry copied out of the simulation.

use serde::Serialize;

use crate::world::SimulationState;

/// Flight telemetry at the end of the last tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightSnapshot {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    pub heading: f64,
    pub speed: f64,
    pub fuel: f64,
    pub elapsed_secs: f64,
    pub ticks: u64,
    pub camera_x: i32,
    pub camera_y: i32,
}

impl FlightSnapshot {
    pub(crate) fn capture(state: &SimulationState, width: u16, height: u16) -> Self {
        let ship = state.ship();
        let (camera_x, camera_y) = state.camera(width, height);
        Self {
            x: ship.pos.x,
            y: ship.pos.y,
            vx: ship.vel.x,
            vy: ship.vel.y,
            heading: ship.heading,
            speed: ship.speed(),
            fuel: ship.fuel,
            elapsed_secs: state.elapsed_secs(),
            ticks: state.ticks(),
            camera_x,
            camera_y,
        }
    }
}
