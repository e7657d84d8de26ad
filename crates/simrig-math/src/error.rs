//! Error types for pose conversions.

use thiserror::Error;

/// Errors that can occur while converting orientations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PoseError {
    /// Quaternion has zero (or non-finite) magnitude and encodes no rotation.
    #[error("invalid orientation: quaternion ({w}, {x}, {y}, {z}) has no usable magnitude")]
    InvalidOrientation {
        /// Scalar component.
        w: f64,
        /// X component.
        x: f64,
        /// Y component.
        y: f64,
        /// Z component.
        z: f64,
    },
}

/// Result type for pose operations.
pub type Result<T> = std::result::Result<T, PoseError>;
