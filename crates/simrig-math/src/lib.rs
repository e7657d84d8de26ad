#![warn(missing_docs)]

//! Pose math for simrig.
//!
//! Small value types for placing actors in a simulated scene: positions,
//! Euler/quaternion orientations, and combined poses, with explicit
//! conversions to nalgebra and to the flat arrays host engines consume.

mod error;
mod rotation;

pub use error::{PoseError, Result};
pub use rotation::{
    euler_to_quaternion, quaternion_to_euler, Orientation, Quaternion, GIMBAL_LOCK_EPSILON,
};

use nalgebra::{Isometry3, Translation3, Vector3};
use serde::{Deserialize, Serialize};

/// A point in 3D space.
pub type Point3 = nalgebra::Point3<f64>;

/// A vector in 3D space.
pub type Vec3 = Vector3<f64>;

/// A position in scene-world units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    /// X coordinate.
    pub x: f64,
    /// Y coordinate.
    pub y: f64,
    /// Z coordinate.
    pub z: f64,
}

impl Position {
    /// The world origin.
    pub const ORIGIN: Self = Self::new(0.0, 0.0, 0.0);

    /// Create a position.
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Coordinates as `[x, y, z]`.
    pub fn to_vector(&self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }

    /// Build from `[x, y, z]`.
    pub fn from_vector(v: [f64; 3]) -> Self {
        Self::new(v[0], v[1], v[2])
    }
}

impl From<Position> for Point3 {
    fn from(p: Position) -> Self {
        Point3::new(p.x, p.y, p.z)
    }
}

impl From<Position> for Vec3 {
    fn from(p: Position) -> Self {
        Vec3::new(p.x, p.y, p.z)
    }
}

impl From<Point3> for Position {
    fn from(p: Point3) -> Self {
        Self::new(p.x, p.y, p.z)
    }
}

/// Position plus orientation of an actor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    /// Placement in world units.
    pub position: Position,
    /// Rotation relative to the world frame.
    pub orientation: Orientation,
}

impl Pose {
    /// Create a pose.
    pub const fn new(position: Position, orientation: Orientation) -> Self {
        Self {
            position,
            orientation,
        }
    }

    /// A pose at `position` with no rotation.
    pub const fn from_position(position: Position) -> Self {
        Self::new(position, Orientation::identity())
    }

    /// Scalar-first quaternion of the orientation.
    pub fn quaternion(&self) -> Quaternion {
        self.orientation.to_quaternion()
    }

    /// Rigid transform for this pose.
    pub fn to_isometry(&self) -> Isometry3<f64> {
        let t = Translation3::new(self.position.x, self.position.y, self.position.z);
        Isometry3::from_parts(t, self.orientation.to_unit_quaternion())
    }

    /// Transform a point from the actor frame into the world frame.
    pub fn apply_point(&self, p: &Point3) -> Point3 {
        self.to_isometry().transform_point(p)
    }
}

/// Tolerances for comparing positions and orientations.
#[derive(Debug, Clone, Copy)]
pub struct Tolerance {
    /// Linear distance tolerance in world units.
    pub linear: f64,
    /// Angular tolerance in radians.
    pub angular: f64,
}

impl Tolerance {
    /// Default tolerances (1e-6 linear, 1e-6 rad angular).
    pub const DEFAULT: Self = Self {
        linear: 1e-6,
        angular: 1e-6,
    };

    /// Check if two positions coincide within tolerance.
    pub fn positions_equal(&self, a: &Position, b: &Position) -> bool {
        (Vec3::from(*a) - Vec3::from(*b)).norm() < self.linear
    }

    /// Check if two angles are equal modulo a full turn.
    pub fn angles_equal(&self, a: f64, b: f64) -> bool {
        let d = (a - b).rem_euclid(std::f64::consts::TAU);
        d < self.angular || std::f64::consts::TAU - d < self.angular
    }

    /// Check if two orientations describe the same rotation.
    ///
    /// Compares rotations, not Euler triples, so gimbal-lock aliases and
    /// `q`/`-q` pairs are equal.
    pub fn orientations_equal(&self, a: &Orientation, b: &Orientation) -> bool {
        a.to_unit_quaternion().angle_to(&b.to_unit_quaternion()) < self.angular
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::DEFAULT
    }
}
