//! PNG export of captured camera frames.

use std::path::{Path, PathBuf};

use image::{GrayImage, RgbImage};
use tracing::{info, warn};

use crate::depth::{normalize_depth, DepthImage, DepthRange, NormalizedDepth};
use crate::error::{Result, SensorError};

/// Writes RGB and depth frames as PNG files named by zero-padded frame index.
#[derive(Debug, Clone)]
pub struct FrameExporter {
    output_dir: PathBuf,
    save_interval: u64,
}

impl FrameExporter {
    /// Export into `output_dir` every `save_interval` frames.
    pub fn new(output_dir: impl Into<PathBuf>, save_interval: u64) -> Result<Self> {
        if save_interval == 0 {
            return Err(SensorError::InvalidSaveInterval);
        }
        Ok(Self {
            output_dir: output_dir.into(),
            save_interval,
        })
    }

    /// Target directory.
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Whether `frame` falls on the save interval.
    pub fn should_save(&self, frame: u64) -> bool {
        frame % self.save_interval == 0
    }

    /// `rgb_frame_0042.png` for frame 42.
    pub fn rgb_path(&self, frame: u64) -> PathBuf {
        self.output_dir.join(format!("rgb_frame_{frame:04}.png"))
    }

    /// `depth_frame_0042.png` for frame 42.
    pub fn depth_path(&self, frame: u64) -> PathBuf {
        self.output_dir.join(format!("depth_frame_{frame:04}.png"))
    }

    /// Write a packed 8-bit RGB buffer.
    pub fn save_rgb(&self, frame: u64, width: u32, height: u32, rgb: &[u8]) -> Result<PathBuf> {
        let expected = width as usize * height as usize * 3;
        let mismatch = || SensorError::ShapeMismatch {
            width,
            height,
            expected,
            len: rgb.len(),
        };
        if rgb.len() != expected {
            return Err(mismatch());
        }
        let img = RgbImage::from_raw(width, height, rgb.to_vec()).ok_or_else(mismatch)?;

        std::fs::create_dir_all(&self.output_dir)?;
        let path = self.rgb_path(frame);
        img.save(&path)?;
        info!(path = %path.display(), width, height, "saved rgb frame");
        Ok(path)
    }

    /// Normalize a depth buffer and write it as 8-bit grayscale.
    ///
    /// A flat field is still written (all black) and is reported through the
    /// returned [`NormalizedDepth::range`].
    pub fn save_depth(&self, frame: u64, depth: &DepthImage) -> Result<NormalizedDepth> {
        let normalized = normalize_depth(depth)?;
        if let DepthRange::FlatField { value } = normalized.range {
            warn!(frame, value, "depth frame has no dynamic range");
        }

        let img = GrayImage::from_raw(
            normalized.width,
            normalized.height,
            normalized.pixels.clone(),
        )
        .ok_or_else(|| SensorError::ShapeMismatch {
            width: normalized.width,
            height: normalized.height,
            expected: normalized.width as usize * normalized.height as usize,
            len: normalized.pixels.len(),
        })?;

        std::fs::create_dir_all(&self.output_dir)?;
        let path = self.depth_path(frame);
        img.save(&path)?;
        info!(
            path = %path.display(),
            width = normalized.width,
            height = normalized.height,
            "saved depth frame"
        );
        Ok(normalized)
    }
}
