//! Engine error taxonomy.
//!
//! Every error is local to the offending call and recoverable by the host.

use thiserror::Error;

/// Errors surfaced by [`crate::Engine`] operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    /// `step`, `render` or `snapshot` was called before `initialize`.
    #[error("engine used before initialize")]
    UninitializedEngine,

    /// `initialize` was given a non-positive or oversized dimension.
    #[error("invalid grid dimensions {width}x{height}")]
    InvalidDimensions {
        /// Requested width.
        width: i32,
        /// Requested height.
        height: i32,
    },

    /// A delta time or raw control value outside its accepted range.
    #[error("input out of range: {0}")]
    OutOfRangeInput(String),
}

impl EngineError {
    /// Stable numeric code used across the C boundary.
    pub fn code(&self) -> i32 {
        match self {
            EngineError::UninitializedEngine => 1,
            EngineError::InvalidDimensions { .. } => 2,
            EngineError::OutOfRangeInput(_) => 3,
        }
    }
}

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;
