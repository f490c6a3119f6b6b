//! Shape widgets for 3D scenes
//!
//! Each widget builds its geometry once, from procedural sources and filters,
//! and wraps it in a single display object ([`Prop`]) that a renderer can
//! draw:
//! - Primitive shapes: lines, planes, spheres, arrows, circles, cylinders, cubes
//! - Coordinate frames and camera markers
//! - Polylines, grids and camera trajectories
//! - 3D stroke text and 2D overlay text
//! - Image overlays and textured image planes
//!
//! Concrete widgets convert into the [`Widget`] enum, which dispatches the
//! capabilities only some widget types have.

pub mod prop;
pub mod widget;
pub mod shapes;
pub mod frames;
pub mod paths;
pub mod grid;
pub mod text;
pub mod image;
pub mod config;

pub use prop::*;
pub use widget::*;
pub use shapes::*;
pub use frames::*;
pub use paths::*;
pub use grid::*;
pub use text::*;
pub use image::*;
pub use config::*;
