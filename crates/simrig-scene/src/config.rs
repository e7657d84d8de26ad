//! Session configuration loaded from TOML.
//!
//! ```toml
//! [app]
//! headless = true
//!
//! [assets]
//! assets_root = "/data/assets"
//!
//! [[robots]]
//! name = "arm"
//! asset = "franka"
//! position = [1.0, 0.0, 0.0]
//! orientation = { quaternion = [0.7071, 0.0, 0.0, 0.7071] }
//!
//! [[cubes]]
//! name = "cube1"
//! position = [2.0, 0.0, 0.5]
//! color = "green"
//! ```

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use simrig_math::{Orientation, Pose, Position, Quaternion};
use simrig_motion::{JointTrajectory, DEFAULT_SLOWDOWN_FACTOR};

use crate::assets::{AssetCatalog, EnvironmentAsset, RobotAsset};
use crate::color::Color;
use crate::error::{Result, SceneError};
use crate::host::CubeSpec;

/// Scene path for an actor name.
pub fn prim_path(name: &str) -> String {
    format!("/World/{name}")
}

/// Application window and renderer settings handed to the host at launch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// Render width in pixels.
    pub width: u32,
    /// Render height in pixels.
    pub height: u32,
    /// Window width in pixels.
    pub window_width: u32,
    /// Window height in pixels.
    pub window_height: u32,
    /// Run without a window.
    pub headless: bool,
    /// Hide the editor UI.
    pub hide_ui: bool,
    /// Renderer name.
    pub renderer: String,
    /// Host display option bitmask.
    pub display_options: u32,
    /// Render on every simulation step.
    pub render: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            window_width: 1920,
            window_height: 1080,
            headless: true,
            hide_ui: false,
            renderer: "RaytracedLighting".to_string(),
            display_options: 3286,
            render: true,
        }
    }
}

/// Camera placement and capture settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CameraConfig {
    /// Create a camera at all.
    pub enabled: bool,
    /// Scene path of the camera.
    pub prim_path: String,
    /// Camera translation.
    pub position: [f64; 3],
    /// Read a frame from the camera every step.
    pub capture: bool,
    /// Write captured frames to disk.
    pub save_images: bool,
    /// Save every N frames.
    pub save_interval: u64,
    /// Directory for saved frames.
    pub output_dir: PathBuf,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            prim_path: "/World/MyCamera".to_string(),
            position: [0.0, 0.0, 5.0],
            capture: false,
            save_images: false,
            save_interval: 10,
            output_dir: PathBuf::from("."),
        }
    }
}

/// Joint animation settings shared by all robots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnimationConfig {
    /// Drive joints every step.
    pub enabled: bool,
    /// Frames per radian of animation time.
    pub slowdown_factor: u32,
    /// Spread robots evenly over this many radians, overriding their
    /// individual phase offsets.
    pub phase_spread: Option<f64>,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            slowdown_factor: DEFAULT_SLOWDOWN_FACTOR,
            phase_spread: None,
        }
    }
}

/// `{ quaternion = [w, x, y, z] }`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct QuaternionOrientation {
    /// Components, scalar first.
    pub quaternion: [f64; 4],
}

/// `{ roll = .., pitch = .., yaw = .. }` in radians; missing angles are 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EulerOrientation {
    /// Rotation about x.
    pub roll: f64,
    /// Rotation about y.
    pub pitch: f64,
    /// Rotation about z.
    pub yaw: f64,
}

/// Orientation as written in config: Euler angles or a scalar-first quaternion.
///
/// Misspelled keys are rejected rather than read as an identity rotation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OrientationConfig {
    /// Scalar-first quaternion.
    Quaternion(QuaternionOrientation),
    /// Euler angles.
    Euler(EulerOrientation),
}

impl OrientationConfig {
    /// Convert to an orientation, rejecting zero quaternions.
    pub fn resolve(&self) -> Result<Orientation> {
        match *self {
            OrientationConfig::Quaternion(QuaternionOrientation { quaternion }) => {
                Ok(Orientation::from_quaternion(Quaternion::from_vector(quaternion))?)
            }
            OrientationConfig::Euler(EulerOrientation { roll, pitch, yaw }) => {
                Ok(Orientation::new(roll, pitch, yaw))
            }
        }
    }
}

impl Default for OrientationConfig {
    fn default() -> Self {
        OrientationConfig::Euler(EulerOrientation::default())
    }
}

/// A robot to reference into the scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RobotConfig {
    /// Unique actor name.
    pub name: String,
    /// Catalog entry. Ignored when `usd_path` is set.
    #[serde(default)]
    pub asset: Option<RobotAsset>,
    /// Explicit asset location.
    #[serde(default)]
    pub usd_path: Option<String>,
    /// World position.
    #[serde(default)]
    pub position: [f64; 3],
    /// World orientation.
    #[serde(default)]
    pub orientation: OrientationConfig,
    /// Animation phase offset in radians.
    #[serde(default)]
    pub phase_offset: f64,
}

impl RobotConfig {
    /// Asset location, preferring the explicit path over the catalog.
    pub fn location(&self, catalog: &AssetCatalog) -> Result<String> {
        match (&self.usd_path, self.asset) {
            (Some(path), _) => Ok(path.clone()),
            (None, Some(asset)) => Ok(catalog.robot_path(asset)),
            (None, None) => Err(SceneError::InvalidConfig(format!(
                "robot `{}` needs either `asset` or `usd_path`",
                self.name
            ))),
        }
    }

    /// Resolved placement.
    pub fn pose(&self) -> Result<Pose> {
        Ok(Pose::new(
            Position::from_vector(self.position),
            self.orientation.resolve()?,
        ))
    }
}

fn default_cube_size() -> [f64; 3] {
    [1.0, 1.0, 1.0]
}

fn default_cube_color() -> Color {
    Color::Green
}

/// A dynamic cuboid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CubeConfig {
    /// Unique actor name.
    pub name: String,
    /// Center position.
    #[serde(default)]
    pub position: [f64; 3],
    /// Edge lengths.
    #[serde(default = "default_cube_size")]
    pub size: [f64; 3],
    /// Display color.
    #[serde(default = "default_cube_color")]
    pub color: Color,
}

impl CubeConfig {
    /// Host-facing description of this cube.
    pub fn to_spec(&self) -> CubeSpec {
        CubeSpec {
            name: self.name.clone(),
            prim_path: prim_path(&self.name),
            position: Position::from_vector(self.position),
            size: self.size,
            color: self.color.rgb(),
        }
    }
}

/// Complete description of a simulation session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SessionConfig {
    /// Window and renderer settings.
    pub app: AppConfig,
    /// Asset roots.
    pub assets: AssetCatalog,
    /// Add the default ground plane.
    pub ground_plane: bool,
    /// Optional environment to load.
    pub environment: Option<EnvironmentAsset>,
    /// Camera settings.
    pub camera: CameraConfig,
    /// Animation settings.
    pub animation: AnimationConfig,
    /// Robots to spawn.
    pub robots: Vec<RobotConfig>,
    /// Cubes to spawn.
    pub cubes: Vec<CubeConfig>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            app: AppConfig::default(),
            assets: AssetCatalog::default(),
            ground_plane: true,
            environment: None,
            camera: CameraConfig::default(),
            animation: AnimationConfig::default(),
            robots: Vec::new(),
            cubes: Vec::new(),
        }
    }
}

impl SessionConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: SessionConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| SceneError::ReadConfig {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Serialize back to TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| SceneError::InvalidConfig(format!("cannot serialize config: {e}")))
    }

    /// Trajectory for a robot under the shared animation settings.
    pub fn trajectory(&self, robot: &RobotConfig) -> Result<JointTrajectory> {
        Ok(JointTrajectory::new(
            self.animation.slowdown_factor,
            robot.phase_offset,
        )?)
    }

    /// Check cross-field constraints.
    pub fn validate(&self) -> Result<()> {
        JointTrajectory::new(self.animation.slowdown_factor, 0.0)?;

        if self.camera.save_images && self.camera.save_interval == 0 {
            return Err(SceneError::InvalidConfig(
                "camera.save_interval must be positive".to_string(),
            ));
        }
        if let Some(spread) = self.animation.phase_spread {
            if !spread.is_finite() {
                return Err(SceneError::InvalidConfig(
                    "animation.phase_spread must be finite".to_string(),
                ));
            }
        }

        let mut names = HashSet::new();
        let all_names = self
            .robots
            .iter()
            .map(|r| &r.name)
            .chain(self.cubes.iter().map(|c| &c.name));
        for name in all_names {
            if name.is_empty() {
                return Err(SceneError::InvalidConfig("actor name is empty".to_string()));
            }
            if !names.insert(name.as_str()) {
                return Err(SceneError::InvalidConfig(format!(
                    "duplicate actor name `{name}`"
                )));
            }
        }

        for robot in &self.robots {
            robot.location(&self.assets)?;
            robot.pose()?;
        }

        for cube in &self.cubes {
            if cube.size.iter().any(|s| !s.is_finite() || *s <= 0.0) {
                return Err(SceneError::InvalidConfig(format!(
                    "cube `{}` has non-positive size {:?}",
                    cube.name, cube.size
                )));
            }
        }

        Ok(())
    }
}
