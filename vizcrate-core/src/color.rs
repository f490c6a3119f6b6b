//! Colors in blue-green-red order
//!
//! Callers hand colors to widgets in the `(blue, green, red)` layout used by
//! common image libraries, with components in `[0, 255]`. Materials and point
//! scalars expect red-green-blue, so conversions live here.

use serde::{Deserialize, Serialize};

/// A color with components in `[0, 255]`, stored blue first
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub b: f64,
    pub g: f64,
    pub r: f64,
}

impl Color {
    /// Create a color from blue, green and red components
    pub fn new(b: f64, g: f64, r: f64) -> Self {
        Self { b, g, r }
    }

    pub fn black() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    pub fn white() -> Self {
        Self::new(255.0, 255.0, 255.0)
    }

    pub fn red() -> Self {
        Self::new(0.0, 0.0, 255.0)
    }

    pub fn green() -> Self {
        Self::new(0.0, 255.0, 0.0)
    }

    pub fn blue() -> Self {
        Self::new(255.0, 0.0, 0.0)
    }

    pub fn cyan() -> Self {
        Self::new(255.0, 255.0, 0.0)
    }

    pub fn magenta() -> Self {
        Self::new(255.0, 0.0, 255.0)
    }

    pub fn yellow() -> Self {
        Self::new(0.0, 255.0, 255.0)
    }

    pub fn gray() -> Self {
        Self::new(128.0, 128.0, 128.0)
    }

    /// Normalized red-green-blue triple for material properties
    pub fn to_rgb_f32(&self) -> [f32; 3] {
        [
            (self.r / 255.0) as f32,
            (self.g / 255.0) as f32,
            (self.b / 255.0) as f32,
        ]
    }

    /// Red-green-blue bytes for per-point scalars, saturating out of range values
    pub fn to_rgb_u8(&self) -> [u8; 3] {
        [
            self.r.round().clamp(0.0, 255.0) as u8,
            self.g.round().clamp(0.0, 255.0) as u8,
            self.b.round().clamp(0.0, 255.0) as u8,
        ]
    }

    /// Inverse of [`Color::to_rgb_f32`], rounded to whole channel values
    pub fn from_rgb_f32(rgb: [f32; 3]) -> Self {
        let channel = |v: f32| (f64::from(v) * 255.0).round();
        Self::new(channel(rgb[2]), channel(rgb[1]), channel(rgb[0]))
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::white()
    }
}

/// Per-axis colors of coordinate frames: X red, Y green, Z blue
pub const AXIS_COLORS: [[u8; 3]; 3] = [[255, 0, 0], [0, 255, 0], [0, 0, 255]];
