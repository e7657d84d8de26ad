//! Session driver: builds the scene on a host and steps it frame by frame.

use simrig_math::{Pose, Position};
use simrig_motion::{phase_offsets, JointTrajectory};
use simrig_sensor::{DepthRange, FrameExporter};
use tracing::{debug, info, warn};

use crate::config::{prim_path, CubeConfig, RobotConfig, SessionConfig};
use crate::error::{Result, SceneError};
use crate::host::{ActorId, SimulationHost};

/// A robot placed in the scene.
#[derive(Debug, Clone, PartialEq)]
pub struct RobotHandle {
    /// Actor name.
    pub name: String,
    /// Scene path.
    pub prim_path: String,
    /// Host handle.
    pub actor: ActorId,
    /// Current placement.
    pub pose: Pose,
    /// Animation parameters.
    pub trajectory: JointTrajectory,
}

/// What happened during one [`Session::step_frame`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FrameReport {
    /// Frame index that was simulated.
    pub frame: u64,
    /// Center pixel `(x, y, distance)` of the depth capture.
    pub center_distance: Option<(u32, u32, f32)>,
    /// Range of the saved depth frame.
    pub saved_depth: Option<DepthRange>,
    /// Whether the RGB frame was written.
    pub saved_rgb: bool,
    /// Number of robots that received joint targets.
    pub animated_robots: usize,
    /// Capture or export failure. The frame itself still advanced.
    pub capture_error: Option<String>,
}

/// A running simulation session.
///
/// Owns the frame counter. Each [`step_frame`](Session::step_frame) steps the
/// host, optionally captures and exports camera data, then commands joint
/// targets for every robot. The counter advances as soon as the host step
/// succeeds, so a failed export never repeats a frame index.
pub struct Session<H: SimulationHost> {
    host: H,
    config: SessionConfig,
    robots: Vec<RobotHandle>,
    cubes: Vec<(String, ActorId)>,
    exporter: Option<FrameExporter>,
    frame: u64,
    initialized: bool,
}

impl<H: SimulationHost> Session<H> {
    /// Populate `host` from `config`.
    ///
    /// Hands the app settings to the host, then adds the ground plane,
    /// environment, cubes, camera and robots in that order. The session still
    /// needs [`initialize`](Session::initialize).
    pub fn build(config: SessionConfig, mut host: H) -> Result<Self> {
        config.validate()?;

        host.configure(&config.app)?;

        let exporter = if config.camera.save_images {
            Some(FrameExporter::new(
                config.camera.output_dir.clone(),
                config.camera.save_interval,
            )?)
        } else {
            None
        };

        let mut session = Self {
            host,
            config,
            robots: Vec::new(),
            cubes: Vec::new(),
            exporter,
            frame: 0,
            initialized: false,
        };

        if session.config.ground_plane {
            session.host.add_ground_plane()?;
        }

        if let Some(env) = session.config.environment {
            let location = session.config.assets.environment_path(env);
            info!(%location, "loading environment");
            session.host.load_environment(&location)?;
        }

        let cubes = session.config.cubes.clone();
        for cube in &cubes {
            session.add_cube(cube)?;
        }

        if session.config.camera.enabled {
            let camera = &session.config.camera;
            session
                .host
                .add_camera(&camera.prim_path, Position::from_vector(camera.position))?;
        }

        let robots = session.config.robots.clone();
        for robot in &robots {
            session.add_robot(robot)?;
        }

        if let Some(spread) = session.config.animation.phase_spread {
            let offsets = phase_offsets(session.robots.len(), spread);
            for (robot, offset) in session.robots.iter_mut().zip(offsets) {
                robot.trajectory = robot.trajectory.with_phase_offset(offset);
            }
        }

        info!(
            robots = session.robots.len(),
            cubes = session.cubes.len(),
            "scene built"
        );
        Ok(session)
    }

    /// Spawn a robot. Names must be unique within the session.
    pub fn add_robot(&mut self, robot: &RobotConfig) -> Result<&RobotHandle> {
        self.ensure_unique(&robot.name)?;
        let location = robot.location(&self.config.assets)?;
        let pose = robot.pose()?;
        let trajectory = self.config.trajectory(robot)?;
        let path = prim_path(&robot.name);

        let actor = self.host.add_robot(&path, &location, &pose)?;
        debug!(name = %robot.name, %location, "robot added");

        self.robots.push(RobotHandle {
            name: robot.name.clone(),
            prim_path: path,
            actor,
            pose,
            trajectory,
        });
        let index = self.robots.len() - 1;
        Ok(&self.robots[index])
    }

    /// Spawn a dynamic cube.
    pub fn add_cube(&mut self, cube: &CubeConfig) -> Result<ActorId> {
        self.ensure_unique(&cube.name)?;
        let actor = self.host.add_cube(&cube.to_spec())?;
        debug!(name = %cube.name, color = %cube.color, "cube added");
        self.cubes.push((cube.name.clone(), actor));
        Ok(actor)
    }

    /// Move a robot and remember its new pose.
    pub fn set_robot_pose(&mut self, name: &str, pose: Pose) -> Result<()> {
        let robot = self
            .robots
            .iter_mut()
            .find(|r| r.name == name)
            .ok_or_else(|| SceneError::MissingRobot(name.to_string()))?;
        self.host.set_pose(robot.actor, &pose)?;
        robot.pose = pose;
        Ok(())
    }

    /// Reset the host world and articulations.
    pub fn initialize(&mut self) -> Result<()> {
        self.host.reset()?;
        self.initialized = true;
        info!("session initialized");
        Ok(())
    }

    /// Simulate one frame and advance the frame counter.
    pub fn step_frame(&mut self) -> Result<FrameReport> {
        if !self.initialized {
            return Err(SceneError::NotInitialized);
        }

        let frame = self.frame;
        let mut report = FrameReport {
            frame,
            ..FrameReport::default()
        };

        self.host.step(self.config.app.render)?;
        self.frame += 1;

        if self.config.camera.enabled && self.config.camera.capture {
            if let Err(err) = self.capture(frame, &mut report) {
                warn!(frame, error = %err, "camera capture failed");
                report.capture_error = Some(err.to_string());
            }
        }

        if self.config.animation.enabled {
            for robot in &self.robots {
                let joint_count = self.host.joint_count(robot.actor)?;
                let targets = robot.trajectory.targets(frame, joint_count)?;
                self.host.set_joint_positions(robot.actor, &targets)?;
                debug!(robot = %robot.name, joint_count, "joint targets set");
            }
            report.animated_robots = self.robots.len();
        }

        Ok(report)
    }

    /// Step `frames` frames.
    pub fn run(&mut self, frames: u64) -> Result<Vec<FrameReport>> {
        (0..frames).map(|_| self.step_frame()).collect()
    }

    fn capture(&mut self, frame: u64, report: &mut FrameReport) -> Result<()> {
        let Some(capture) = self.host.capture()? else {
            debug!(frame, "no camera frame available");
            return Ok(());
        };

        if let Some(depth) = &capture.depth {
            report.center_distance = depth.center_pixel();
            if let Some((x, y, distance)) = report.center_distance {
                debug!(frame, x, y, distance, "center pixel distance");
            }
        }

        let Some(exporter) = &self.exporter else {
            return Ok(());
        };
        if !exporter.should_save(frame) {
            return Ok(());
        }

        if let Some(depth) = &capture.depth {
            report.saved_depth = Some(exporter.save_depth(frame, depth)?.range);
        }
        if !capture.rgb.is_empty() {
            exporter.save_rgb(frame, capture.width, capture.height, &capture.rgb)?;
            report.saved_rgb = true;
        }
        Ok(())
    }

    fn ensure_unique(&self, name: &str) -> Result<()> {
        let taken = self.robots.iter().any(|r| r.name == name)
            || self.cubes.iter().any(|(n, _)| n == name);
        if taken {
            return Err(SceneError::InvalidConfig(format!(
                "duplicate actor name `{name}`"
            )));
        }
        Ok(())
    }

    /// Next frame to be simulated.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Robots in spawn order.
    pub fn robots(&self) -> &[RobotHandle] {
        &self.robots
    }

    /// Look up a robot by name.
    pub fn robot(&self, name: &str) -> Option<&RobotHandle> {
        self.robots.iter().find(|r| r.name == name)
    }

    /// Session configuration.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// The underlying host.
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Mutable access to the host.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Tear down the session and return the host.
    pub fn into_host(self) -> H {
        self.host
    }
}
