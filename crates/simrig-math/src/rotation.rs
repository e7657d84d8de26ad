//! Euler angle and quaternion orientations.
//!
//! Convention: `R = Rz(yaw) * Ry(pitch) * Rx(roll)`. Roll is applied about x
//! first, then pitch about y, then yaw about z. Quaternions are scalar-first
//! `(w, x, y, z)`.
//!
//! Recovering Euler angles is singular at `pitch = ±π/2`, where only
//! `yaw - roll` (or `yaw + roll`) is defined. There roll is reported as 0 and
//! the remaining rotation is reported as yaw.

use std::f64::consts::FRAC_PI_2;

use nalgebra::UnitQuaternion;
use serde::{Deserialize, Serialize};

use crate::error::{PoseError, Result};

/// Distance of `|sin(pitch)|` from 1 below which the gimbal lock branch is taken.
///
/// A few ulps: only rounding noise of an exact ±π/2 pitch lands inside it.
pub const GIMBAL_LOCK_EPSILON: f64 = 16.0 * f64::EPSILON;

/// A rotation quaternion in scalar-first order.
///
/// Not necessarily normalized; use [`Quaternion::to_unit_quaternion`] for a
/// validated unit rotation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quaternion {
    /// Scalar component.
    pub w: f64,
    /// X component.
    pub x: f64,
    /// Y component.
    pub y: f64,
    /// Z component.
    pub z: f64,
}

impl Quaternion {
    /// The identity rotation `(1, 0, 0, 0)`.
    pub const IDENTITY: Self = Self {
        w: 1.0,
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    /// Create a quaternion from scalar-first components.
    pub const fn new(w: f64, x: f64, y: f64, z: f64) -> Self {
        Self { w, x, y, z }
    }

    /// Components as `[w, x, y, z]`.
    pub fn to_vector(&self) -> [f64; 4] {
        [self.w, self.x, self.y, self.z]
    }

    /// Build from `[w, x, y, z]`.
    pub fn from_vector(v: [f64; 4]) -> Self {
        Self::new(v[0], v[1], v[2], v[3])
    }

    /// Euclidean magnitude.
    ///
    /// Scaled by the largest component first, so tiny and huge inputs neither
    /// underflow nor overflow.
    pub fn norm(&self) -> f64 {
        let scale = self.max_abs();
        if scale == 0.0 || !scale.is_finite() {
            return scale;
        }
        let [w, x, y, z] = self.to_vector().map(|c| c / scale);
        scale * (w * w + x * x + y * y + z * z).sqrt()
    }

    fn max_abs(&self) -> f64 {
        self.to_vector().iter().fold(0.0, |m, c| m.max(c.abs()))
    }

    /// The antipodal quaternion. Represents the same rotation.
    pub fn negated(&self) -> Self {
        Self::new(-self.w, -self.x, -self.y, -self.z)
    }

    /// Normalized copy, or `InvalidOrientation` for a zero or non-finite input.
    pub fn normalized(&self) -> Result<Self> {
        let finite = self.to_vector().iter().all(|c| c.is_finite());
        let scale = self.max_abs();
        if !finite || scale == 0.0 {
            return Err(PoseError::InvalidOrientation {
                w: self.w,
                x: self.x,
                y: self.y,
                z: self.z,
            });
        }
        let [w, x, y, z] = self.to_vector().map(|c| c / scale);
        let n = (w * w + x * x + y * y + z * z).sqrt();
        Ok(Self::new(w / n, x / n, y / n, z / n))
    }

    /// Convert to a nalgebra unit quaternion.
    pub fn to_unit_quaternion(&self) -> Result<UnitQuaternion<f64>> {
        let q = self.normalized()?;
        Ok(UnitQuaternion::new_unchecked(nalgebra::Quaternion::new(
            q.w, q.x, q.y, q.z,
        )))
    }

    /// Dot product of the raw components.
    pub fn dot(&self, other: &Quaternion) -> f64 {
        self.w * other.w + self.x * other.x + self.y * other.y + self.z * other.z
    }
}

impl Default for Quaternion {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl From<UnitQuaternion<f64>> for Quaternion {
    fn from(q: UnitQuaternion<f64>) -> Self {
        Self::new(q.w, q.i, q.j, q.k)
    }
}

/// Convert roll/pitch/yaw (radians) to a unit quaternion.
///
/// Angles outside `[-π, π]` are accepted as-is; no wrapping is done.
pub fn euler_to_quaternion(roll: f64, pitch: f64, yaw: f64) -> Quaternion {
    UnitQuaternion::from_euler_angles(roll, pitch, yaw).into()
}

/// Convert a scalar-first quaternion to roll/pitch/yaw (radians).
///
/// The input is normalized first. `q` and `-q` give the same angles. Pitch is
/// in `[-π/2, π/2]`; see the module docs for the gimbal lock convention.
pub fn quaternion_to_euler(w: f64, x: f64, y: f64, z: f64) -> Result<(f64, f64, f64)> {
    let Quaternion { w, x, y, z } = Quaternion::new(w, x, y, z).normalized()?;

    let sin_pitch = (2.0 * (w * y - z * x)).clamp(-1.0, 1.0);

    if 1.0 - sin_pitch.abs() < GIMBAL_LOCK_EPSILON {
        let pitch = FRAC_PI_2.copysign(sin_pitch);
        let yaw = (2.0 * (w * z - x * y)).atan2(1.0 - 2.0 * (x * x + z * z));
        return Ok((0.0, pitch, yaw));
    }

    let roll = (2.0 * (w * x + y * z)).atan2(1.0 - 2.0 * (x * x + y * y));
    let yaw_sin = 2.0 * (w * z + x * y);
    let yaw_cos = 1.0 - 2.0 * (y * y + z * z);
    // cos(pitch) from the first matrix column keeps precision near ±π/2.
    let pitch = sin_pitch.atan2(yaw_sin.hypot(yaw_cos));
    let yaw = yaw_sin.atan2(yaw_cos);
    Ok((roll, pitch, yaw))
}

/// An orientation stored as roll/pitch/yaw in radians.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Orientation {
    /// Rotation about x.
    pub roll: f64,
    /// Rotation about y.
    pub pitch: f64,
    /// Rotation about z.
    pub yaw: f64,
}

impl Orientation {
    /// Create an orientation from radians.
    pub const fn new(roll: f64, pitch: f64, yaw: f64) -> Self {
        Self { roll, pitch, yaw }
    }

    /// No rotation.
    pub const fn identity() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    /// Create an orientation from degrees.
    pub fn from_degrees(roll: f64, pitch: f64, yaw: f64) -> Self {
        Self::new(roll.to_radians(), pitch.to_radians(), yaw.to_radians())
    }

    /// Scalar-first unit quaternion for this rotation.
    pub fn to_quaternion(&self) -> Quaternion {
        euler_to_quaternion(self.roll, self.pitch, self.yaw)
    }

    /// Recover Euler angles from a quaternion.
    pub fn from_quaternion(q: Quaternion) -> Result<Self> {
        let (roll, pitch, yaw) = quaternion_to_euler(q.w, q.x, q.y, q.z)?;
        Ok(Self::new(roll, pitch, yaw))
    }

    /// The quaternion as `[w, x, y, z]`, the layout host pose APIs expect.
    pub fn to_vector(&self) -> [f64; 4] {
        self.to_quaternion().to_vector()
    }

    /// Convert to a nalgebra unit quaternion.
    pub fn to_unit_quaternion(&self) -> UnitQuaternion<f64> {
        UnitQuaternion::from_euler_angles(self.roll, self.pitch, self.yaw)
    }
}

impl From<Orientation> for Quaternion {
    fn from(o: Orientation) -> Self {
        o.to_quaternion()
    }
}

impl TryFrom<Quaternion> for Orientation {
    type Error = PoseError;

    fn try_from(q: Quaternion) -> Result<Self> {
        Self::from_quaternion(q)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::PI;

    const TOL: f64 = 1e-9;

    fn sample_angles() -> Vec<(f64, f64, f64)> {
        let mut out = Vec::new();
        for &roll in &[-3.0, -1.2, 0.0, 0.4, 2.9] {
            for &pitch in &[-1.5, -0.7, 0.0, 0.3, 1.4] {
                for &yaw in &[-3.1, -0.5, 0.0, 1.1, 3.0] {
                    out.push((roll, pitch, yaw));
                }
            }
        }
        out
    }

    #[test]
    fn test_identity() {
        let q = euler_to_quaternion(0.0, 0.0, 0.0);
        assert_eq!(q.to_vector(), [1.0, 0.0, 0.0, 0.0]);
        assert_eq!(quaternion_to_euler(1.0, 0.0, 0.0, 0.0).unwrap(), (0.0, 0.0, 0.0));
        assert_eq!(Orientation::identity().to_quaternion(), Quaternion::IDENTITY);
    }

    #[test]
    fn test_round_trip() {
        for (roll, pitch, yaw) in sample_angles() {
            let q = euler_to_quaternion(roll, pitch, yaw);
            let (r, p, y) = quaternion_to_euler(q.w, q.x, q.y, q.z).unwrap();
            assert_abs_diff_eq!(r, roll, epsilon = 1e-6);
            assert_abs_diff_eq!(p, pitch, epsilon = 1e-6);
            assert_abs_diff_eq!(y, yaw, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_unit_norm() {
        for (roll, pitch, yaw) in sample_angles() {
            let q = euler_to_quaternion(roll * 3.0, pitch * 5.0, yaw * 7.0);
            assert_abs_diff_eq!(q.norm(), 1.0, epsilon = TOL);
        }
    }

    #[test]
    fn test_double_cover() {
        for (roll, pitch, yaw) in sample_angles() {
            let q = euler_to_quaternion(roll, pitch, yaw);
            let a = quaternion_to_euler(q.w, q.x, q.y, q.z).unwrap();
            let n = q.negated();
            let b = quaternion_to_euler(n.w, n.x, n.y, n.z).unwrap();
            assert_abs_diff_eq!(a.0, b.0, epsilon = TOL);
            assert_abs_diff_eq!(a.1, b.1, epsilon = TOL);
            assert_abs_diff_eq!(a.2, b.2, epsilon = TOL);
        }
    }

    #[test]
    fn test_out_of_range_angles_not_wrapped() {
        // 2π + 0.3 about x is the same rotation as 0.3, up to sign.
        let a = euler_to_quaternion(2.0 * PI + 0.3, 0.0, 0.0);
        let b = euler_to_quaternion(0.3, 0.0, 0.0);
        assert_abs_diff_eq!(a.dot(&b).abs(), 1.0, epsilon = TOL);
        // The half angle is not normalized, so the sign flips.
        assert!(a.w < 0.0);
    }

    #[test]
    fn test_single_axis_rotations() {
        let q = euler_to_quaternion(0.0, 0.0, PI / 2.0);
        let h = (PI / 4.0).cos();
        assert_abs_diff_eq!(q.w, h, epsilon = TOL);
        assert_abs_diff_eq!(q.z, h, epsilon = TOL);
        assert_abs_diff_eq!(q.x, 0.0, epsilon = TOL);
        assert_abs_diff_eq!(q.y, 0.0, epsilon = TOL);

        let q = euler_to_quaternion(PI / 2.0, 0.0, 0.0);
        assert_abs_diff_eq!(q.x, h, epsilon = TOL);
    }

    #[test]
    fn test_unnormalized_input() {
        let q = euler_to_quaternion(0.2, -0.4, 1.0);
        let (r, p, y) = quaternion_to_euler(q.w * 3.0, q.x * 3.0, q.y * 3.0, q.z * 3.0).unwrap();
        assert_abs_diff_eq!(r, 0.2, epsilon = 1e-9);
        assert_abs_diff_eq!(p, -0.4, epsilon = 1e-9);
        assert_abs_diff_eq!(y, 1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_zero_quaternion_rejected() {
        let err = quaternion_to_euler(0.0, 0.0, 0.0, 0.0).unwrap_err();
        assert!(matches!(err, PoseError::InvalidOrientation { .. }));
        assert!(Orientation::from_quaternion(Quaternion::new(0.0, 0.0, 0.0, 0.0)).is_err());
        assert!(Quaternion::new(f64::NAN, 0.0, 0.0, 1.0).to_unit_quaternion().is_err());
    }

    #[test]
    fn test_gimbal_lock_positive_pitch() {
        let q = euler_to_quaternion(0.3, PI / 2.0, 0.5);
        let (r, p, y) = quaternion_to_euler(q.w, q.x, q.y, q.z).unwrap();
        assert_eq!(r, 0.0);
        assert_eq!(p, PI / 2.0);
        assert_abs_diff_eq!(y, 0.2, epsilon = 1e-6);
    }

    #[test]
    fn test_gimbal_lock_negative_pitch() {
        let q = euler_to_quaternion(0.3, -PI / 2.0, 0.5);
        let (r, p, y) = quaternion_to_euler(q.w, q.x, q.y, q.z).unwrap();
        assert_eq!(r, 0.0);
        assert_eq!(p, -PI / 2.0);
        assert_abs_diff_eq!(y, 0.8, epsilon = 1e-6);
    }

    #[test]
    fn test_near_gimbal_lock_keeps_roll() {
        for &offset in &[1e-5, 1e-6] {
            for &sign in &[1.0, -1.0] {
                let pitch = sign * (PI / 2.0 - offset);
                let q = euler_to_quaternion(0.3, pitch, 0.5);
                let (r, p, y) = quaternion_to_euler(q.w, q.x, q.y, q.z).unwrap();
                assert_abs_diff_eq!(r, 0.3, epsilon = 1e-6);
                assert_abs_diff_eq!(p, pitch, epsilon = 1e-9);
                assert_abs_diff_eq!(y, 0.5, epsilon = 1e-6);
            }
        }
    }

    #[test]
    fn test_near_gimbal_lock_round_trip() {
        for (roll, _, yaw) in sample_angles() {
            for &pitch in &[1.5707, -1.5707, 1.57079, -1.57079] {
                let q = euler_to_quaternion(roll, pitch, yaw);
                let (r, p, y) = quaternion_to_euler(q.w, q.x, q.y, q.z).unwrap();
                assert_abs_diff_eq!(r, roll, epsilon = 1e-6);
                assert_abs_diff_eq!(p, pitch, epsilon = 1e-9);
                assert_abs_diff_eq!(y, yaw, epsilon = 1e-6);
            }
        }
    }

    #[test]
    fn test_double_cover_unnormalized() {
        let base = Quaternion::new(0.3, -2.0, 0.7, 1.1);
        for &scale in &[1e-3, 1.0, 50.0] {
            let q = Quaternion::new(base.w * scale, base.x * scale, base.y * scale, base.z * scale);
            let n = q.negated();
            let a = quaternion_to_euler(q.w, q.x, q.y, q.z).unwrap();
            let b = quaternion_to_euler(n.w, n.x, n.y, n.z).unwrap();
            assert_eq!(a, b);
            let c = quaternion_to_euler(base.w, base.x, base.y, base.z).unwrap();
            assert_abs_diff_eq!(a.0, c.0, epsilon = 1e-12);
            assert_abs_diff_eq!(a.1, c.1, epsilon = 1e-12);
            assert_abs_diff_eq!(a.2, c.2, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_extreme_magnitudes_normalize() {
        assert_eq!(quaternion_to_euler(1e-170, 0.0, 0.0, 0.0).unwrap(), (0.0, 0.0, 0.0));
        assert_eq!(quaternion_to_euler(1e200, 0.0, 0.0, 0.0).unwrap(), (0.0, 0.0, 0.0));
        assert_abs_diff_eq!(Quaternion::new(1e200, 1e200, 0.0, 0.0).norm(), 2f64.sqrt() * 1e200, epsilon = 1e186);
        assert_abs_diff_eq!(Quaternion::new(3e-170, 4e-170, 0.0, 0.0).norm(), 5e-170, epsilon = 1e-184);

        let q = euler_to_quaternion(0.2, -0.4, 1.0);
        for &scale in &[1e-170, 1e200] {
            let (r, p, y) =
                quaternion_to_euler(q.w * scale, q.x * scale, q.y * scale, q.z * scale).unwrap();
            assert_abs_diff_eq!(r, 0.2, epsilon = 1e-9);
            assert_abs_diff_eq!(p, -0.4, epsilon = 1e-9);
            assert_abs_diff_eq!(y, 1.0, epsilon = 1e-9);
        }
        assert!(Quaternion::new(f64::INFINITY, 0.0, 0.0, 0.0).normalized().is_err());
        assert!(Quaternion::new(1.0, f64::NAN, 0.0, 0.0).normalized().is_err());
    }

    #[test]
    fn test_gimbal_lock_preserves_rotation() {
        let o = Orientation::new(-0.7, PI / 2.0, 1.3);
        let back = Orientation::from_quaternion(o.to_quaternion()).unwrap();
        let dot = o.to_quaternion().dot(&back.to_quaternion());
        assert_abs_diff_eq!(dot.abs(), 1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_matches_nalgebra_rotation() {
        let o = Orientation::new(0.1, 0.2, 0.3);
        let ours = o.to_quaternion().to_unit_quaternion().unwrap();
        let theirs = o.to_unit_quaternion();
        assert_abs_diff_eq!(ours.coords.dot(&theirs.coords).abs(), 1.0, epsilon = 1e-9);
        let (r, p, y) = theirs.euler_angles();
        assert_abs_diff_eq!(r, 0.1, epsilon = 1e-9);
        assert_abs_diff_eq!(p, 0.2, epsilon = 1e-9);
        assert_abs_diff_eq!(y, 0.3, epsilon = 1e-9);
    }

    #[test]
    fn test_from_degrees() {
        let o = Orientation::from_degrees(0.0, 0.0, 90.0);
        assert_abs_diff_eq!(o.yaw, PI / 2.0, epsilon = TOL);
        let v = o.to_vector();
        assert_abs_diff_eq!(v[0], 0.7071067811865476, epsilon = TOL);
        assert_abs_diff_eq!(v[3], 0.7071067811865476, epsilon = TOL);
    }
}
