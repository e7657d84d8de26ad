//! Error types for scene setup and the session driver.

use std::path::PathBuf;

use simrig_math::PoseError;
use simrig_motion::MotionError;
use simrig_sensor::SensorError;
use thiserror::Error;

use crate::host::HostError;

/// Errors that can occur while configuring or driving a session.
#[derive(Error, Debug)]
pub enum SceneError {
    /// Configuration is well-formed TOML but semantically invalid.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// Configuration file could not be read.
    #[error("failed to read config {path}: {source}")]
    ReadConfig {
        /// File that was requested.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Configuration file is not valid TOML for the schema.
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// Name does not match any known color.
    #[error("unknown color: {0}")]
    UnknownColor(String),

    /// No robot with this name in the session.
    #[error("robot not found: {0}")]
    MissingRobot(String),

    /// Frame stepped before the host was reset.
    #[error("session must be initialized before stepping")]
    NotInitialized,

    /// Orientation conversion failed.
    #[error(transparent)]
    Pose(#[from] PoseError),

    /// Joint target computation failed.
    #[error(transparent)]
    Motion(#[from] MotionError),

    /// Frame export failed.
    #[error(transparent)]
    Sensor(#[from] SensorError),

    /// The simulation host rejected a call.
    #[error(transparent)]
    Host(#[from] HostError),
}

/// Result type for scene operations.
pub type Result<T> = std::result::Result<T, SceneError>;
