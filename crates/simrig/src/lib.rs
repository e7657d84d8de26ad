#![warn(missing_docs)]

//! simrig: drive a robotics simulation session from Rust.
//!
//! Facade over the simrig crates. Re-exports pose math, joint animation,
//! depth-buffer utilities and the scene/session layer.
//!
//! # Example
//!
//! ```
//! use simrig::math::Orientation;
//! use simrig::motion::compute_joint_targets;
//!
//! let q = Orientation::new(0.0, 0.0, std::f64::consts::FRAC_PI_2).to_quaternion();
//! assert!((q.norm() - 1.0).abs() < 1e-12);
//!
//! let joints = compute_joint_targets(30, 6, 30, 0.0).unwrap();
//! assert!((joints[0] - 1.0_f64.sin()).abs() < 1e-12);
//! ```

pub use simrig_math as math;
pub use simrig_motion as motion;
pub use simrig_scene as scene;
pub use simrig_sensor as sensor;

pub use simrig_math::{Orientation, Pose, PoseError, Position, Quaternion};
pub use simrig_motion::{compute_joint_targets, JointTrajectory, MotionError};
pub use simrig_scene::{SceneError, Session, SessionConfig, SimulationHost};
pub use simrig_sensor::{normalize_depth, DepthImage, NormalizedDepth, SensorError};
