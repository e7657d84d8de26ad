#![warn(missing_docs)]

//! Scene setup and session driving for simrig.
//!
//! This crate describes a simulation session (robots, primitive shapes,
//! camera, environment) in a TOML file, resolves assets through explicit
//! catalogs, and drives an external simulation engine through the
//! [`SimulationHost`] trait: placing actors with quaternion poses, stepping
//! frames, exporting camera captures and animating joints.
//!
//! # Example
//!
//! ```ignore
//! use simrig_scene::{Session, SessionConfig};
//!
//! let config = SessionConfig::load("session.toml")?;
//! let mut session = Session::build(config, my_host)?;
//! session.initialize()?;
//! session.run(600)?;
//! ```

mod assets;
mod color;
mod config;
mod error;
mod host;
mod session;

pub use assets::{
    AssetCatalog, EnvironmentAsset, EnvironmentKind, RobotAsset, RobotKind, DEFAULT_CONTENT_URL,
};
pub use color::Color;
pub use config::{
    prim_path, AnimationConfig, AppConfig, CameraConfig, CubeConfig, EulerOrientation,
    OrientationConfig, QuaternionOrientation, RobotConfig, SessionConfig,
};
pub use error::{Result, SceneError};
pub use host::{ActorId, CameraFrame, CubeSpec, HostError, HostResult, SimulationHost};
pub use session::{FrameReport, RobotHandle, Session};
