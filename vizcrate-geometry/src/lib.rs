//! # vizcrate geometry
//!
//! Procedural geometry for scene widgets.
//!
//! This crate provides the sources (lines, planes, spheres, arrows, disks,
//! boxes, axes, structured grids, camera frusta, vector text) and the filters
//! (tube extrusion, edge extraction, texture mapping, image flip and reslice)
//! that the widgets chain together. Everything operates on owned
//! [`vizcrate_core::PolyData`] and [`vizcrate_core::TextureImage`] values.

pub mod sources;
pub mod filters;
pub mod image_ops;
pub mod camera;
pub mod vector_text;

// Re-export commonly used items
pub use sources::*;
pub use filters::*;
pub use image_ops::*;
pub use camera::*;
pub use vector_text::*;
