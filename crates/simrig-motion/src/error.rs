//! Error types for trajectory generation.

use thiserror::Error;

/// Errors that can occur while computing joint targets.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MotionError {
    /// Slowdown factor of zero would divide the frame index by zero.
    #[error("slowdown factor must be positive, got {0}")]
    DivisionByZero(u32),
}

/// Result type for motion operations.
pub type Result<T> = std::result::Result<T, MotionError>;
