//! Depth buffers and 8-bit normalization.

use crate::error::{Result, SensorError};

/// Per-pixel distance buffer in row-major order.
#[derive(Debug, Clone, PartialEq)]
pub struct DepthImage {
    width: u32,
    height: u32,
    data: Vec<f32>,
}

impl DepthImage {
    /// Wrap a row-major buffer of `width * height` distances.
    pub fn new(width: u32, height: u32, data: Vec<f32>) -> Result<Self> {
        let expected = width as usize * height as usize;
        if data.len() != expected {
            return Err(SensorError::ShapeMismatch {
                width,
                height,
                expected,
                len: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Build from nested rows. All rows must have the same length.
    pub fn from_rows(rows: &[Vec<f32>]) -> Result<Self> {
        let width = rows.first().map_or(0, Vec::len);
        let mut data = Vec::with_capacity(width * rows.len());
        for (row, values) in rows.iter().enumerate() {
            if values.len() != width {
                return Err(SensorError::RaggedRows {
                    row,
                    expected: width,
                    len: values.len(),
                });
            }
            data.extend_from_slice(values);
        }
        Self::new(width as u32, rows.len() as u32, data)
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw distances.
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// Distance at `(x, y)`. Returns None if out of bounds.
    pub fn get(&self, x: u32, y: u32) -> Option<f32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.data.get(y as usize * self.width as usize + x as usize).copied()
    }

    /// The pixel at `(width / 2, height / 2)` and its distance.
    pub fn center_pixel(&self) -> Option<(u32, u32, f32)> {
        let (x, y) = (self.width / 2, self.height / 2);
        self.get(x, y).map(|d| (x, y, d))
    }

    /// Smallest and largest finite distance.
    pub fn min_max(&self) -> Option<(f32, f32)> {
        self.data
            .iter()
            .copied()
            .filter(|d| d.is_finite())
            .fold(None, |acc, d| match acc {
                None => Some((d, d)),
                Some((lo, hi)) => Some((lo.min(d), hi.max(d))),
            })
    }
}

/// Dynamic range found while normalizing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DepthRange {
    /// Distances span `[min, max]` with `min < max`.
    Span {
        /// Nearest distance, mapped to 0.
        min: f32,
        /// Farthest distance, mapped to 255.
        max: f32,
    },
    /// Every pixel has the same distance. The output is all zeros.
    FlatField {
        /// The shared distance.
        value: f32,
    },
}

/// An 8-bit view of a depth buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedDepth {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Row-major grayscale values.
    pub pixels: Vec<u8>,
    /// Range used for the mapping.
    pub range: DepthRange,
}

impl NormalizedDepth {
    /// True if the source had no dynamic range.
    pub fn is_flat_field(&self) -> bool {
        matches!(self.range, DepthRange::FlatField { .. })
    }

    /// Value at `(x, y)`. Returns None if out of bounds.
    pub fn get(&self, x: u32, y: u32) -> Option<u8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels
            .get(y as usize * self.width as usize + x as usize)
            .copied()
    }
}

/// Map distances linearly onto `0..=255`.
///
/// `out = floor((d - min) / (max - min) * 255 + 0.5)`, clamped to `[0, 255]`
/// (round half up). A buffer with `min == max` yields all zeros and
/// [`DepthRange::FlatField`].
pub fn normalize_depth(image: &DepthImage) -> Result<NormalizedDepth> {
    if image.data.is_empty() {
        return Err(SensorError::EmptyImage {
            width: image.width,
            height: image.height,
        });
    }

    if let Some(i) = image.data.iter().position(|d| !d.is_finite()) {
        let width = image.width as usize;
        return Err(SensorError::NonFiniteDepth {
            x: (i % width) as u32,
            y: (i / width) as u32,
        });
    }

    let Some((min, max)) = image.min_max() else {
        return Err(SensorError::EmptyImage {
            width: image.width,
            height: image.height,
        });
    };

    let (pixels, range) = if max > min {
        let lo = f64::from(min);
        let span = f64::from(max) - lo;
        let pixels = image
            .data
            .iter()
            .map(|&d| {
                let v = (f64::from(d) - lo) / span * 255.0;
                (v + 0.5).floor().clamp(0.0, 255.0) as u8
            })
            .collect();
        (pixels, DepthRange::Span { min, max })
    } else {
        (vec![0; image.data.len()], DepthRange::FlatField { value: min })
    };

    Ok(NormalizedDepth {
        width: image.width,
        height: image.height,
        pixels,
        range,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_field() {
        let img = DepthImage::from_rows(&[vec![1.0, 1.0], vec![1.0, 1.0]]).unwrap();
        let out = normalize_depth(&img).unwrap();
        assert_eq!(out.pixels, vec![0, 0, 0, 0]);
        assert!(out.is_flat_field());
        assert_eq!(out.range, DepthRange::FlatField { value: 1.0 });
    }

    #[test]
    fn test_round_half_up() {
        let img = DepthImage::from_rows(&[vec![0.0, 10.0], vec![5.0, 10.0]]).unwrap();
        let out = normalize_depth(&img).unwrap();
        assert_eq!(out.pixels, vec![0, 255, 128, 255]);
        assert!(!out.is_flat_field());
        assert_eq!(out.get(0, 1), Some(128));
    }

    #[test]
    fn test_offset_range() {
        let img = DepthImage::new(3, 1, vec![2.0, 3.0, 6.0]).unwrap();
        let out = normalize_depth(&img).unwrap();
        // 1/4 * 255 = 63.75
        assert_eq!(out.pixels, vec![0, 64, 255]);
        assert_eq!(out.range, DepthRange::Span { min: 2.0, max: 6.0 });
    }

    #[test]
    fn test_empty_image() {
        let img = DepthImage::new(0, 0, vec![]).unwrap();
        assert!(matches!(
            normalize_depth(&img),
            Err(SensorError::EmptyImage { .. })
        ));
    }

    #[test]
    fn test_non_finite_reported() {
        let img = DepthImage::new(2, 2, vec![1.0, 2.0, f32::INFINITY, 3.0]).unwrap();
        match normalize_depth(&img) {
            Err(SensorError::NonFiniteDepth { x, y }) => assert_eq!((x, y), (0, 1)),
            other => panic!("expected NonFiniteDepth, got {other:?}"),
        }
    }

    #[test]
    fn test_shape_checks() {
        assert!(matches!(
            DepthImage::new(2, 2, vec![0.0; 3]),
            Err(SensorError::ShapeMismatch { expected: 4, len: 3, .. })
        ));
        assert!(matches!(
            DepthImage::from_rows(&[vec![0.0, 1.0], vec![0.0]]),
            Err(SensorError::RaggedRows { row: 1, .. })
        ));
    }

    #[test]
    fn test_center_pixel() {
        let img = DepthImage::new(4, 3, (0..12).map(|v| v as f32).collect()).unwrap();
        assert_eq!(img.center_pixel(), Some((2, 1, 6.0)));
        assert_eq!(img.get(4, 0), None);
        assert_eq!(img.min_max(), Some((0.0, 11.0)));
    }
}
