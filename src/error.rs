//! Error types for the simulation core.

use thiserror::Error;

/// Errors raised while setting up a simulation.
///
/// Stepping a frame never fails; only construction validates its inputs.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimError {
    /// World width and height must be finite and positive.
    #[error("world bounds must be finite and positive (got {width}x{height})")]
    InvalidWorldBounds { width: f32, height: f32 },
}
