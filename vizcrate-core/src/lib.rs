//! Core data structures and traits for vizcrate
//!
//! This crate provides the value types shared by the geometry sources and the
//! shape widgets: points, transforms, colors, polygonal data, images and
//! point buffers, plus the common error type.

pub mod point;
pub mod color;
pub mod point_buffer;
pub mod poly_data;
pub mod image;
pub mod traits;
pub mod transform;
pub mod error;

pub use point::*;
pub use color::*;
pub use point_buffer::*;
pub use poly_data::*;
pub use image::*;
pub use traits::*;
pub use transform::*;
pub use error::*;

/// Re-export commonly used types from nalgebra
pub use nalgebra::{Point3, Vector2, Vector3, Matrix3, Matrix4, UnitQuaternion};
