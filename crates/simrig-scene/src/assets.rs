//! Asset catalogs for robots and environments.
//!
//! Asset locations are relative paths joined onto an explicit root taken from
//! the session configuration. Nothing is resolved at load time.

use serde::{Deserialize, Serialize};

/// Default content server for environment assets.
pub const DEFAULT_CONTENT_URL: &str =
    "https://omniverse-content-production.s3-us-west-2.amazonaws.com";

/// Broad robot category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RobotKind {
    /// Fixed-base arm.
    Manipulator,
    /// Wheeled base.
    Mobile,
}

/// Robot models available under the assets root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RobotAsset {
    /// Franka Panda arm.
    Franka,
    /// Second manipulator model.
    Robot2,
    /// Third manipulator model.
    Robot3,
    /// Nova Carter mobile base.
    NovaCarter,
    /// Second mobile model.
    MobileRobot2,
    /// Third mobile model.
    MobileRobot3,
}

impl RobotAsset {
    /// Every robot in the catalog.
    pub const ALL: [RobotAsset; 6] = [
        RobotAsset::Franka,
        RobotAsset::Robot2,
        RobotAsset::Robot3,
        RobotAsset::NovaCarter,
        RobotAsset::MobileRobot2,
        RobotAsset::MobileRobot3,
    ];

    /// Category of this robot.
    pub fn kind(self) -> RobotKind {
        match self {
            RobotAsset::Franka | RobotAsset::Robot2 | RobotAsset::Robot3 => RobotKind::Manipulator,
            RobotAsset::NovaCarter | RobotAsset::MobileRobot2 | RobotAsset::MobileRobot3 => {
                RobotKind::Mobile
            }
        }
    }

    /// Path relative to the assets root.
    pub fn relative_path(self) -> &'static str {
        match self {
            RobotAsset::Franka => "Isaac/Robots/FrankaRobotics/FrankaPanda/franka.usd",
            RobotAsset::Robot2 => "Isaac/Robots/Robot2/robot2.usd",
            RobotAsset::Robot3 => "Isaac/Robots/Robot3/robot3.usd",
            RobotAsset::NovaCarter => "Isaac/Robots/NVIDIA/NovaCarter/nova_carter.usd",
            RobotAsset::MobileRobot2 => "Isaac/Robots/MobileRobot2/mobile_robot2.usd",
            RobotAsset::MobileRobot3 => "Isaac/Robots/MobileRobot3/mobile_robot3.usd",
        }
    }
}

/// Environment category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnvironmentKind {
    /// Interior scene.
    Indoor,
    /// Exterior scene.
    Outdoor,
}

/// Environments available on the content server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnvironmentAsset {
    /// Hospital interior.
    Hospital,
    /// Rivermark outdoor block.
    Rivermark,
}

impl EnvironmentAsset {
    /// Category of this environment.
    pub fn kind(self) -> EnvironmentKind {
        match self {
            EnvironmentAsset::Hospital => EnvironmentKind::Indoor,
            EnvironmentAsset::Rivermark => EnvironmentKind::Outdoor,
        }
    }

    /// Path relative to the content url.
    pub fn relative_path(self) -> &'static str {
        match self {
            EnvironmentAsset::Hospital => {
                "Assets/Isaac/5.0/Isaac/Environments/Hospital/hospital.usd"
            }
            EnvironmentAsset::Rivermark => {
                "Assets/Isaac/5.0/Isaac/Environments/Outdoor/Rivermark/rivermark.usd"
            }
        }
    }
}

/// Roots used to resolve catalog entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AssetCatalog {
    /// Root for robot assets (local directory or url).
    pub assets_root: String,
    /// Root for environment assets.
    pub content_url: String,
}

impl AssetCatalog {
    /// Create a catalog with explicit roots.
    pub fn new(assets_root: impl Into<String>, content_url: impl Into<String>) -> Self {
        Self {
            assets_root: assets_root.into(),
            content_url: content_url.into(),
        }
    }

    /// Full location of a robot asset.
    pub fn robot_path(&self, asset: RobotAsset) -> String {
        join(&self.assets_root, asset.relative_path())
    }

    /// Full location of an environment asset.
    pub fn environment_path(&self, asset: EnvironmentAsset) -> String {
        join(&self.content_url, asset.relative_path())
    }
}

impl Default for AssetCatalog {
    fn default() -> Self {
        Self::new("", DEFAULT_CONTENT_URL)
    }
}

fn join(root: &str, relative: &str) -> String {
    let root = root.trim_end_matches('/');
    if root.is_empty() {
        relative.to_string()
    } else {
        format!("{root}/{relative}")
    }
}
