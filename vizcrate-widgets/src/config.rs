//! Default widget parameters
//!
//! [`WidgetConfig`] holds the parameters that widget constructors otherwise
//! take explicitly. It can be loaded from JSON with missing fields falling
//! back to their defaults, and [`WidgetFactory`] builds widgets from it.

use nalgebra::{Matrix3, Vector4};
use serde::{Deserialize, Serialize};
use vizcrate_core::{Color, Point2i, Point3f, Transform3D, Vector3f};
use vizcrate_geometry::Camera;

use crate::frames::{CameraPositionWidget, CoordinateSystemWidget, FrameStyle};
use crate::grid::GridWidget;
use crate::paths::TrajectoryWidget;
use crate::shapes::{
    ArrowWidget, CircleWidget, CrossSection, CubeWidget, CylinderWidget, LineWidget, PlaneWidget,
    SphereWidget,
};
use crate::prop::{FontFamily, Justification, Prop};
use crate::text::{Text3DWidget, TextWidget};

/// Widget defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WidgetConfig {
    pub color: Color,
    pub sphere_resolution: usize,
    pub arrow_thickness: f32,
    pub arrow_cross_section: CrossSection,
    pub circle_thickness: f32,
    pub cylinder_sides: usize,
    pub cube_wireframe: bool,
    pub coordinate_system_scale: f32,
    pub plane_size: f32,
    pub grid_dimensions: (usize, usize),
    pub grid_spacing: (f32, f32),
    pub text3d_scale: f32,
    pub text_font_size: u32,
    pub text_font_family: FontFamily,
    pub text_justification: Justification,
    pub text_bold: bool,
    pub text_italic: bool,
    pub trajectory_scale: f32,
    pub trajectory_show_frames: bool,
    pub frame: FrameStyle,
    /// Near clipping distance of camera frusta
    pub frustum_near: f32,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            color: Color::white(),
            sphere_resolution: 10,
            arrow_thickness: 0.03,
            arrow_cross_section: CrossSection::LeastAlignedAxis,
            circle_thickness: 0.01,
            cylinder_sides: 30,
            cube_wireframe: true,
            coordinate_system_scale: 1.0,
            plane_size: 1.0,
            grid_dimensions: (10, 10),
            grid_spacing: (1.0, 1.0),
            text3d_scale: 1.0,
            text_font_size: 10,
            text_font_family: FontFamily::Arial,
            text_justification: Justification::Left,
            text_bold: true,
            text_italic: false,
            trajectory_scale: 1.0,
            trajectory_show_frames: false,
            frame: FrameStyle::default(),
            frustum_near: crate::frames::FRUSTUM_NEAR,
        }
    }
}

/// Builds widgets, filling the parameters the caller leaves out from a [`WidgetConfig`]
#[derive(Debug, Clone, Default)]
pub struct WidgetFactory {
    config: WidgetConfig,
}

impl WidgetFactory {
    pub fn new(config: WidgetConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &WidgetConfig {
        &self.config
    }

    pub fn line(&self, pt1: Point3f, pt2: Point3f) -> LineWidget {
        LineWidget::new(pt1, pt2, self.config.color)
    }

    pub fn plane(&self, coefs: Vector4<f32>) -> PlaneWidget {
        PlaneWidget::new(coefs, self.config.plane_size, self.config.color)
    }

    pub fn sphere(&self, center: Point3f, radius: f32) -> SphereWidget {
        SphereWidget::new(center, radius, self.config.sphere_resolution, self.config.color)
    }

    pub fn arrow(&self, pt1: Point3f, pt2: Point3f) -> ArrowWidget {
        ArrowWidget::with_cross_section(
            pt1,
            pt2,
            self.config.arrow_thickness,
            self.config.color,
            self.config.arrow_cross_section,
        )
    }

    pub fn circle(&self, center: Point3f, radius: f32) -> CircleWidget {
        CircleWidget::new(center, radius, self.config.circle_thickness, self.config.color)
    }

    pub fn cylinder(
        &self,
        pt_on_axis: Point3f,
        axis_direction: Vector3f,
        radius: f32,
    ) -> CylinderWidget {
        CylinderWidget::new(
            pt_on_axis,
            axis_direction,
            radius,
            self.config.cylinder_sides,
            self.config.color,
        )
    }

    pub fn cube(&self, pt_min: Point3f, pt_max: Point3f) -> CubeWidget {
        CubeWidget::new(pt_min, pt_max, self.config.cube_wireframe, self.config.color)
    }

    pub fn coordinate_system(&self) -> CoordinateSystemWidget {
        CoordinateSystemWidget::with_style(self.config.coordinate_system_scale, &self.config.frame)
    }

    pub fn grid(&self) -> GridWidget {
        GridWidget::new(self.config.grid_dimensions, self.config.grid_spacing, self.config.color)
    }

    pub fn text3d(&self, text: &str, position: Point3f) -> Text3DWidget {
        Text3DWidget::new(text, position, self.config.text3d_scale, self.config.color)
    }

    /// 2D text in the configured font
    pub fn text(&self, text: &str, pos: Point2i) -> TextWidget {
        let mut widget = TextWidget::new(text, pos, self.config.text_font_size, self.config.color);
        if let Prop::Text(actor) = &mut widget.prop {
            let property = &mut actor.text_property;
            property.font_family = self.config.text_font_family;
            property.justification = self.config.text_justification;
            property.bold = self.config.text_bold;
            property.italic = self.config.text_italic;
        }
        widget
    }

    /// Frustum of the camera with intrinsics `k`, far plane at `scale`
    pub fn camera_frustum(&self, k: &Matrix3<f32>, scale: f32) -> CameraPositionWidget {
        let camera = Camera::from_intrinsics(k, self.config.frustum_near, scale);
        CameraPositionWidget::from_camera(&camera, self.config.color)
    }

    pub fn trajectory(&self, path: &[Transform3D]) -> TrajectoryWidget {
        TrajectoryWidget::with_style(
            path,
            self.config.color,
            self.config.trajectory_show_frames,
            self.config.trajectory_scale,
            &self.config.frame,
        )
    }
}
