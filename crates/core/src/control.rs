//! Decoding of raw control flags coming from foreign hosts.

use crate::error::{EngineError, EngineResult};
use crate::types::ControlInput;

/// Build a [`ControlInput`] from integer flags.
///
/// Only `0` and `1` are accepted; anything else is a malformed snapshot.
pub fn control_from_raw(thrust: i32, brake: i32, left: i32, right: i32) -> EngineResult<ControlInput> {
    Ok(ControlInput {
        thrust: flag("thrust", thrust)?,
        brake: flag("brake", brake)?,
        left: flag("left", left)?,
        right: flag("right", right)?,
    })
}

fn flag(name: &str, value: i32) -> EngineResult<bool> {
    match value {
        0 => Ok(false),
        1 => Ok(true),
        other => Err(EngineError::OutOfRangeInput(format!(
            "{name} flag must be 0 or 1, got {other}"
        ))),
    }
}
