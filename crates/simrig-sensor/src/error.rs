//! Error types for sensor buffers and frame export.

use thiserror::Error;

/// Errors that can occur while handling camera buffers.
#[derive(Error, Debug)]
pub enum SensorError {
    /// Buffer has no pixels.
    #[error("image has no pixels ({width}x{height})")]
    EmptyImage {
        /// Width in pixels.
        width: u32,
        /// Height in pixels.
        height: u32,
    },

    /// Buffer length does not match the declared dimensions.
    #[error("buffer of {len} values does not match {width}x{height} (expected {expected})")]
    ShapeMismatch {
        /// Width in pixels.
        width: u32,
        /// Height in pixels.
        height: u32,
        /// Expected number of values.
        expected: usize,
        /// Actual number of values.
        len: usize,
    },

    /// Rows of a nested buffer have different lengths.
    #[error("row {row} has {len} values, expected {expected}")]
    RaggedRows {
        /// Offending row index.
        row: usize,
        /// Expected row length.
        expected: usize,
        /// Actual row length.
        len: usize,
    },

    /// Depth value is NaN or infinite.
    #[error("non-finite depth at pixel ({x}, {y})")]
    NonFiniteDepth {
        /// Column.
        x: u32,
        /// Row.
        y: u32,
    },

    /// Save interval of zero.
    #[error("save interval must be positive")]
    InvalidSaveInterval,

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Image encoding error.
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
}

/// Result type for sensor operations.
pub type Result<T> = std::result::Result<T, SensorError>;
