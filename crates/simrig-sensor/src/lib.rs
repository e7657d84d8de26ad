#![warn(missing_docs)]

//! Camera buffer utilities for simrig.
//!
//! Normalizes per-pixel distance buffers into displayable 8-bit images and
//! exports RGB/depth frames as PNG files for offline inspection.
//!
//! # Example
//!
//! ```
//! use simrig_sensor::{normalize_depth, DepthImage};
//!
//! let depth = DepthImage::from_rows(&[vec![0.0, 10.0], vec![5.0, 10.0]]).unwrap();
//! let out = normalize_depth(&depth).unwrap();
//! assert_eq!(out.pixels, vec![0, 255, 128, 255]);
//! ```

mod depth;
mod error;
mod export;

pub use depth::{normalize_depth, DepthImage, DepthRange, NormalizedDepth};
pub use error::{Result, SensorError};
pub use export::FrameExporter;
