//! Coordinate frames and camera markers

use nalgebra::Matrix3;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};
use vizcrate_core::{Color, Point3f, PolyData, Transform3D, Vector2f, Vector3f, AXIS_COLORS};
use vizcrate_geometry::{axes_source, extract_edges, frustum_source, tube_filter, Camera};

use crate::prop::{Actor, Prop};
use crate::shapes::{colored_actor, is_degenerate};

/// Near clipping distance of camera frusta
pub const FRUSTUM_NEAR: f32 = 0.01;

/// Tube parameters of coordinate frames
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameStyle {
    pub tube_sides: usize,
    /// Tube radius as a fraction of the axis length
    pub tube_radius_ratio: f32,
}

impl Default for FrameStyle {
    fn default() -> Self {
        Self {
            tube_sides: 6,
            tube_radius_ratio: 1.0 / 50.0,
        }
    }
}

/// Axes of length `scale` at the origin, colored red, green and blue per point
pub(crate) fn colored_axes(scale: f32) -> PolyData {
    let mut axes = axes_source(Point3f::origin(), scale);
    axes.set_colors(AXIS_COLORS.iter().flat_map(|&c| [c, c]).collect());
    axes
}

/// Tubed colored axes placed by `pose`
pub(crate) fn frame_geometry(scale: f32, pose: &Transform3D, style: &FrameStyle) -> PolyData {
    let axes = colored_axes(scale).transformed(pose);
    tube_filter(&axes, scale * style.tube_radius_ratio, style.tube_sides)
}

/// Wireframe of the view volume of `camera`: 8 corners, 12 edges
pub(crate) fn frustum_wireframe(camera: &Camera) -> PolyData {
    extract_edges(&frustum_source(&camera.frustum()))
}

/// Camera at the origin looking along +Z whose frustum matches `k`, far plane at `scale`
pub(crate) fn intrinsics_camera(k: &Matrix3<f32>, scale: f32) -> Camera {
    Camera::from_intrinsics(k, FRUSTUM_NEAR, scale)
}

/// Red, green and blue axes at the origin
#[derive(Debug, Clone, PartialEq)]
pub struct CoordinateSystemWidget {
    pub(crate) prop: Prop,
}

impl CoordinateSystemWidget {
    pub fn new(scale: f32) -> Self {
        Self::with_style(scale, &FrameStyle::default())
    }

    #[instrument(level = "debug")]
    pub fn with_style(scale: f32, style: &FrameStyle) -> Self {
        let geometry = frame_geometry(scale, &Transform3D::identity(), style);
        debug!(points = geometry.point_count(), "built coordinate frame");
        Self {
            prop: Prop::Actor(Actor::with_point_colors(geometry)),
        }
    }
}

/// A camera shown either as a coordinate frame or as its view frustum
#[derive(Debug, Clone, PartialEq)]
pub struct CameraPositionWidget {
    pub(crate) prop: Prop,
}

impl CameraPositionWidget {
    /// Coordinate frame at the origin
    pub fn new(scale: f32) -> Self {
        Self::with_pose(
            Point3f::origin(),
            Point3f::new(0.0, 0.0, 1.0),
            Vector3f::y(),
            scale,
        )
    }

    /// Coordinate frame at `position` whose +Z axis looks at `look_at` and
    /// whose +Y axis is as close to `up` as possible
    #[instrument(level = "debug")]
    pub fn with_pose(position: Point3f, look_at: Point3f, up: Vector3f, scale: f32) -> Self {
        let forward = look_at - position;
        if is_degenerate(&forward) {
            warn!("camera looks at its own position");
        }
        let pose = Transform3D::from_forward_up(position.coords, forward, up);
        let geometry = frame_geometry(scale, &pose, &FrameStyle::default());
        Self {
            prop: Prop::Actor(Actor::with_point_colors(geometry)),
        }
    }

    /// Frustum of the pinhole camera with intrinsic matrix `k`, far plane at `scale`
    pub fn with_intrinsics(k: &Matrix3<f32>, scale: f32, color: Color) -> Self {
        Self::from_camera(&intrinsics_camera(k, scale), color)
    }

    /// Frustum with vertical field of view `fov.y` in radians, square aspect
    pub fn with_fov(fov: Vector2f, scale: f32, color: Color) -> Self {
        let camera = Camera::looking_forward(fov.y, 1.0, FRUSTUM_NEAR, scale);
        Self::from_camera(&camera, color)
    }

    /// Frustum wireframe of an arbitrary camera
    #[instrument(level = "debug")]
    pub fn from_camera(camera: &Camera, color: Color) -> Self {
        let geometry = frustum_wireframe(camera);
        debug!(edges = geometry.line_count(), "built camera frustum");
        Self {
            prop: colored_actor(geometry, color),
        }
    }
}
