#![warn(missing_docs)]

//! Open-loop joint animation for simrig.
//!
//! Produces deterministic joint target vectors from a frame counter, used to
//! drive idle/demo motion of articulated robots. There is no feedback and no
//! physics awareness: the same inputs always give the same targets.
//!
//! # Example
//!
//! ```
//! use simrig_motion::compute_joint_targets;
//!
//! let targets = compute_joint_targets(30, 6, 30, 0.0).unwrap();
//! assert_eq!(targets.len(), 6);
//! ```

mod error;
mod trajectory;

pub use error::{MotionError, Result};
pub use trajectory::{
    animation_time, compute_joint_targets, joint_targets_at, phase_offsets, JointTrajectory,
    DEFAULT_SLOWDOWN_FACTOR, JOINT_GAINS, MAX_ANIMATED_JOINTS,
};
