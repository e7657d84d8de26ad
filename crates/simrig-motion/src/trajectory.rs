//! Sinusoidal joint target profiles.

use serde::{Deserialize, Serialize};

use crate::error::{MotionError, Result};

/// Number of joints driven by the profile. Higher joints stay at 0.
pub const MAX_ANIMATED_JOINTS: usize = 6;

/// Per-joint gain applied to `sin(t)`.
pub const JOINT_GAINS: [f64; MAX_ANIMATED_JOINTS] = [1.0, 0.5, 0.5, 0.7, -0.7, 1.0];

/// Default frames per radian of animation time.
pub const DEFAULT_SLOWDOWN_FACTOR: u32 = 30;

/// Animation time for a frame: `frame / slowdown_factor + phase_offset`.
pub fn animation_time(frame: u64, slowdown_factor: u32, phase_offset: f64) -> Result<f64> {
    if slowdown_factor == 0 {
        return Err(MotionError::DivisionByZero(slowdown_factor));
    }
    Ok(frame as f64 / slowdown_factor as f64 + phase_offset)
}

/// Evaluate the joint profile at animation time `t`.
///
/// Returns `joint_count` angles in radians.
pub fn joint_targets_at(t: f64, joint_count: usize) -> Vec<f64> {
    let s = t.sin();
    let mut joints = vec![0.0; joint_count];
    for (joint, gain) in joints.iter_mut().zip(JOINT_GAINS) {
        *joint = s * gain;
    }
    joints
}

/// Joint targets for `frame`.
///
/// Pure function of its inputs; the caller owns and advances the frame
/// counter.
pub fn compute_joint_targets(
    frame: u64,
    joint_count: usize,
    slowdown_factor: u32,
    phase_offset: f64,
) -> Result<Vec<f64>> {
    let t = animation_time(frame, slowdown_factor, phase_offset)?;
    Ok(joint_targets_at(t, joint_count))
}

/// Evenly spaced phase offsets in `[0, spread)` for `actor_count` actors.
pub fn phase_offsets(actor_count: usize, spread: f64) -> Vec<f64> {
    (0..actor_count)
        .map(|i| spread * i as f64 / actor_count as f64)
        .collect()
}

/// Animation parameters for one actor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JointTrajectory {
    /// Frames per radian of animation time. Must be positive.
    pub slowdown_factor: u32,
    /// Time shift in radians, used to desynchronize actors.
    pub phase_offset: f64,
}

impl JointTrajectory {
    /// Create a trajectory, rejecting a zero slowdown factor.
    pub fn new(slowdown_factor: u32, phase_offset: f64) -> Result<Self> {
        let trajectory = Self {
            slowdown_factor,
            phase_offset,
        };
        trajectory.validate()?;
        Ok(trajectory)
    }

    /// Same trajectory shifted to a different phase.
    pub fn with_phase_offset(self, phase_offset: f64) -> Self {
        Self {
            phase_offset,
            ..self
        }
    }

    /// Check the parameters.
    pub fn validate(&self) -> Result<()> {
        if self.slowdown_factor == 0 {
            return Err(MotionError::DivisionByZero(self.slowdown_factor));
        }
        Ok(())
    }

    /// Animation time at `frame`.
    pub fn time_at(&self, frame: u64) -> Result<f64> {
        animation_time(frame, self.slowdown_factor, self.phase_offset)
    }

    /// Joint targets at `frame` for an articulation with `joint_count` joints.
    pub fn targets(&self, frame: u64, joint_count: usize) -> Result<Vec<f64>> {
        compute_joint_targets(frame, joint_count, self.slowdown_factor, self.phase_offset)
    }
}

impl Default for JointTrajectory {
    fn default() -> Self {
        Self {
            slowdown_factor: DEFAULT_SLOWDOWN_FACTOR,
            phase_offset: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::{PI, TAU};

    #[test]
    fn test_concrete_frame() {
        let joints = compute_joint_targets(30, 6, 30, 0.0).unwrap();
        let s = 1.0_f64.sin();
        let expected = [s, s * 0.5, s * 0.5, s * 0.7, -s * 0.7, s];
        assert_eq!(joints.len(), 6);
        for (got, want) in joints.iter().zip(expected) {
            assert_abs_diff_eq!(*got, want, epsilon = 1e-12);
        }
        assert_abs_diff_eq!(joints[0], 0.8415, epsilon = 1e-4);
        assert_abs_diff_eq!(joints[3], 0.5891, epsilon = 1e-4);
        assert_abs_diff_eq!(joints[4], -0.5891, epsilon = 1e-4);
    }

    #[test]
    fn test_zero_joints() {
        assert!(compute_joint_targets(12, 0, 30, 0.0).unwrap().is_empty());
    }

    #[test]
    fn test_extra_joints_stay_zero() {
        let joints = compute_joint_targets(17, 8, 30, 0.0).unwrap();
        assert_eq!(joints.len(), 8);
        assert_eq!(joints[6], 0.0);
        assert_eq!(joints[7], 0.0);
        assert!(joints[0] != 0.0);
    }

    #[test]
    fn test_partial_joint_count() {
        let joints = compute_joint_targets(30, 3, 30, 0.0).unwrap();
        assert_eq!(joints.len(), 3);
        assert_abs_diff_eq!(joints[2], 1.0_f64.sin() * 0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_zero_slowdown_rejected() {
        assert_eq!(
            compute_joint_targets(10, 6, 0, 0.0),
            Err(MotionError::DivisionByZero(0))
        );
        assert!(JointTrajectory::new(0, 0.0).is_err());
    }

    #[test]
    fn test_periodicity_in_time() {
        for &t in &[0.0, 0.3, 1.0, 2.5, -4.0] {
            let a = joint_targets_at(t, 6);
            let b = joint_targets_at(t + TAU, 6);
            for (x, y) in a.iter().zip(&b) {
                assert_abs_diff_eq!(*x, *y, epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn test_periodicity_in_frames() {
        // Frame 2π·sf is not an integer; a large slowdown keeps the rounding
        // error of the nearest frame below 1e-6 rad.
        let sf = 1_000_000;
        let period = (TAU * sf as f64).round() as u64;
        let a = compute_joint_targets(0, 6, sf, 0.0).unwrap();
        let b = compute_joint_targets(period, 6, sf, 0.0).unwrap();
        for (x, y) in a.iter().zip(&b) {
            assert_abs_diff_eq!(*x, *y, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_phase_offset_shifts_time() {
        let base = compute_joint_targets(30, 6, 30, 0.0).unwrap();
        let shifted = compute_joint_targets(0, 6, 30, 1.0).unwrap();
        for (x, y) in base.iter().zip(&shifted) {
            assert_abs_diff_eq!(*x, *y, epsilon = 1e-12);
        }
        let half_turn = compute_joint_targets(30, 6, 30, PI).unwrap();
        assert_abs_diff_eq!(half_turn[0], -base[0], epsilon = 1e-12);
    }

    #[test]
    fn test_trajectory_value_object() {
        let traj = JointTrajectory::default().with_phase_offset(0.5);
        assert_eq!(traj.slowdown_factor, DEFAULT_SLOWDOWN_FACTOR);
        assert_abs_diff_eq!(traj.time_at(60).unwrap(), 2.5, epsilon = 1e-12);
        assert_eq!(
            traj.targets(60, 6).unwrap(),
            compute_joint_targets(60, 6, 30, 0.5).unwrap()
        );
    }

    #[test]
    fn test_phase_offsets_spacing() {
        assert!(phase_offsets(0, TAU).is_empty());
        let offsets = phase_offsets(4, TAU);
        assert_eq!(offsets.len(), 4);
        assert_eq!(offsets[0], 0.0);
        assert_abs_diff_eq!(offsets[2], PI, epsilon = 1e-12);
    }
}
