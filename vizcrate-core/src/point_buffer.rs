//! Dense point buffers
//!
//! A `PointBuffer` is a `rows x cols` grid of points stored as interleaved
//! `f32` or `f64` channels, the shape in which organized point clouds and
//! sampled curves usually arrive from sensors and image libraries. Only the
//! first three channels carry the position; a fourth channel is padding.

use crate::{Error, Point3f, Result};
use serde::{Deserialize, Serialize};

/// Element storage of a point buffer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PointElements {
    F32(Vec<f32>),
    F64(Vec<f64>),
}

impl PointElements {
    pub fn depth_name(&self) -> &'static str {
        match self {
            PointElements::F32(_) => "f32",
            PointElements::F64(_) => "f64",
        }
    }

    pub fn len(&self) -> usize {
        match self {
            PointElements::F32(v) => v.len(),
            PointElements::F64(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A row-major grid of points with 3 or 4 channels per point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointBuffer {
    rows: usize,
    cols: usize,
    channels: usize,
    elements: PointElements,
}

impl PointBuffer {
    /// Create a buffer, checking the channel count and element count
    pub fn new(rows: usize, cols: usize, channels: usize, elements: PointElements) -> Result<Self> {
        if channels != 3 && channels != 4 {
            return Err(Error::UnsupportedPointFormat {
                depth: elements.depth_name(),
                channels,
            });
        }
        let expected = rows * cols * channels;
        if elements.len() != expected {
            return Err(Error::InvalidData(format!(
                "point buffer of {}x{}x{} needs {} elements, got {}",
                rows,
                cols,
                channels,
                expected,
                elements.len()
            )));
        }
        Ok(Self {
            rows,
            cols,
            channels,
            elements,
        })
    }

    /// A single row of `f32` points with three channels
    pub fn from_points(points: &[Point3f]) -> Self {
        let data = points.iter().flat_map(|p| [p.x, p.y, p.z]).collect();
        Self {
            rows: 1,
            cols: points.len(),
            channels: 3,
            elements: PointElements::F32(data),
        }
    }

    /// A single row of `f64` points with three channels
    pub fn from_points_f64(points: &[[f64; 3]]) -> Self {
        let data = points.iter().flat_map(|p| p.iter().copied()).collect();
        Self {
            rows: 1,
            cols: points.len(),
            channels: 3,
            elements: PointElements::F64(data),
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn channels(&self) -> usize {
        self.channels
    }

    pub fn elements(&self) -> &PointElements {
        &self.elements
    }

    /// Number of points, `rows * cols`
    pub fn total(&self) -> usize {
        self.rows * self.cols
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// Positions in row-major order. Double precision input is narrowed to `f32`.
    pub fn positions(&self) -> Vec<Point3f> {
        let chs = self.channels;
        match &self.elements {
            PointElements::F32(data) => data
                .chunks_exact(chs)
                .map(|p| Point3f::new(p[0], p[1], p[2]))
                .collect(),
            PointElements::F64(data) => data
                .chunks_exact(chs)
                .map(|p| Point3f::new(p[0] as f32, p[1] as f32, p[2] as f32))
                .collect(),
        }
    }
}

impl From<Vec<Point3f>> for PointBuffer {
    fn from(points: Vec<Point3f>) -> Self {
        Self::from_points(&points)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_four_channel_positions_ignore_padding() {
        let buffer = PointBuffer::new(
            2,
            1,
            4,
            PointElements::F64(vec![1.0, 2.0, 3.0, 99.0, 4.0, 5.0, 6.0, 99.0]),
        )
        .unwrap();
        assert_eq!(buffer.total(), 2);
        assert_eq!(
            buffer.positions(),
            vec![Point3f::new(1.0, 2.0, 3.0), Point3f::new(4.0, 5.0, 6.0)]
        );
    }

    #[test]
    fn test_rejects_two_channels() {
        let result = PointBuffer::new(1, 2, 2, PointElements::F32(vec![0.0; 4]));
        assert!(matches!(
            result,
            Err(Error::UnsupportedPointFormat { depth: "f32", channels: 2 })
        ));
    }

    #[test]
    fn test_rejects_length_mismatch() {
        let result = PointBuffer::new(2, 2, 3, PointElements::F32(vec![0.0; 9]));
        assert!(matches!(result, Err(Error::InvalidData(_))));
    }

    #[test]
    fn test_from_points() {
        let points = vec![Point3f::new(0.0, 0.0, 0.0), Point3f::new(1.0, 2.0, 3.0)];
        let buffer = PointBuffer::from(points.clone());
        assert_eq!(buffer.rows(), 1);
        assert_eq!(buffer.cols(), 2);
        assert_eq!(buffer.positions(), points);
    }
}
