//! Interface to the simulation engine that owns the scene.
//!
//! The engine (world, physics, rendering, prims) lives outside this crate.
//! Implement [`SimulationHost`] to connect a session to it.

use simrig_math::{Pose, Position};
use simrig_sensor::DepthImage;
use thiserror::Error;

use crate::config::AppConfig;

/// Error reported by a host implementation.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("host call `{operation}` failed: {message}")]
pub struct HostError {
    /// Name of the failing host call.
    pub operation: String,
    /// Host-provided description.
    pub message: String,
}

impl HostError {
    /// Create a host error.
    pub fn new(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            message: message.into(),
        }
    }
}

/// Result type for host calls.
pub type HostResult<T> = std::result::Result<T, HostError>;

/// Opaque handle to an actor created by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActorId(pub u64);

/// A dynamic cuboid to add to the scene.
#[derive(Debug, Clone, PartialEq)]
pub struct CubeSpec {
    /// Actor name.
    pub name: String,
    /// Scene path, `/World/{name}`.
    pub prim_path: String,
    /// Center position.
    pub position: Position,
    /// Edge lengths along x, y, z.
    pub size: [f64; 3],
    /// Normalized display color.
    pub color: [f64; 3],
}

/// One camera capture.
#[derive(Debug, Clone, PartialEq)]
pub struct CameraFrame {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Packed 8-bit RGB, row-major.
    pub rgb: Vec<u8>,
    /// Distance to the image plane per pixel, if the sensor provides it.
    pub depth: Option<DepthImage>,
}

/// Scene and sensor calls a session makes into the simulation engine.
pub trait SimulationHost {
    /// Apply window and renderer settings. Called once, before any scene call.
    fn configure(&mut self, app: &AppConfig) -> HostResult<()>;

    /// Add the default ground plane.
    fn add_ground_plane(&mut self) -> HostResult<()>;

    /// Reference an environment asset into the scene.
    fn load_environment(&mut self, location: &str) -> HostResult<()>;

    /// Add a dynamic cuboid.
    fn add_cube(&mut self, cube: &CubeSpec) -> HostResult<ActorId>;

    /// Reference a robot asset at `prim_path` and place it at `pose`.
    fn add_robot(&mut self, prim_path: &str, location: &str, pose: &Pose) -> HostResult<ActorId>;

    /// Move an actor. Hosts read the orientation via [`Pose::quaternion`].
    fn set_pose(&mut self, actor: ActorId, pose: &Pose) -> HostResult<()>;

    /// Create a camera at `prim_path` translated to `position`.
    fn add_camera(&mut self, prim_path: &str, position: Position) -> HostResult<()>;

    /// Reset the world and initialize articulations.
    fn reset(&mut self) -> HostResult<()>;

    /// Number of controllable joints of an articulation.
    fn joint_count(&self, actor: ActorId) -> HostResult<usize>;

    /// Command joint positions in radians.
    fn set_joint_positions(&mut self, actor: ActorId, positions: &[f64]) -> HostResult<()>;

    /// Advance the simulation by one frame.
    fn step(&mut self, render: bool) -> HostResult<()>;

    /// Latest camera frame, if a camera is available.
    fn capture(&mut self) -> HostResult<Option<CameraFrame>>;
}
