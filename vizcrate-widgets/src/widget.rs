//! The widget container
//!
//! [`Widget`] holds any concrete widget. Capabilities that only some widget
//! types have (text, images, line width) are dispatched here and fail with
//! [`Error::Unsupported`] for the others.

use vizcrate_core::{Bounds, Color, Error, Image, PolyData, Result, Transform3D};

use crate::frames::{CameraPositionWidget, CoordinateSystemWidget};
use crate::grid::GridWidget;
use crate::image::{Image3DWidget, ImageOverlayWidget};
use crate::paths::{PolyLineWidget, TrajectoryWidget};
use crate::prop::Prop;
use crate::shapes::{
    ArrowWidget, CircleWidget, CubeWidget, CylinderWidget, LineWidget, PlaneWidget, SphereWidget,
};
use crate::text::{Text3DWidget, TextWidget};

/// Access to the display object behind a widget
pub trait WidgetAccessor {
    fn prop(&self) -> &Prop;
    fn prop_mut(&mut self) -> &mut Prop;
    fn into_prop(self) -> Prop;

    fn set_color(&mut self, color: Color) -> Result<()> {
        self.prop_mut().set_color(color)
    }

    fn color(&self) -> Result<Color> {
        self.prop().color()
    }

    fn pose(&self) -> Result<Transform3D> {
        self.prop().pose()
    }

    fn set_pose(&mut self, pose: Transform3D) -> Result<()> {
        self.prop_mut().set_pose(pose)
    }

    /// Pre-multiply the current pose by `pose`
    fn update_pose(&mut self, pose: Transform3D) -> Result<()> {
        self.prop_mut().update_pose(pose)
    }

    fn bounds(&self) -> Option<Bounds> {
        self.prop().bounds()
    }
}

macro_rules! widget_types {
    ($($variant:ident($ty:ident) => $as_ref:ident, $as_mut:ident;)*) => {
        /// Name of a widget type
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum WidgetKind {
            $($variant,)*
        }

        impl WidgetKind {
            pub const ALL: &'static [WidgetKind] = &[$(WidgetKind::$variant,)*];

            pub fn name(&self) -> &'static str {
                match self {
                    $(WidgetKind::$variant => stringify!($ty),)*
                }
            }
        }

        /// Any widget
        #[derive(Debug, Clone, PartialEq)]
        pub enum Widget {
            $($variant($ty),)*
        }

        impl Widget {
            pub fn kind(&self) -> WidgetKind {
                match self {
                    $(Widget::$variant(_) => WidgetKind::$variant,)*
                }
            }

            $(
                pub fn $as_ref(&self) -> Option<&$ty> {
                    match self {
                        Widget::$variant(widget) => Some(widget),
                        _ => None,
                    }
                }

                pub fn $as_mut(&mut self) -> Option<&mut $ty> {
                    match self {
                        Widget::$variant(widget) => Some(widget),
                        _ => None,
                    }
                }
            )*
        }

        impl WidgetAccessor for Widget {
            fn prop(&self) -> &Prop {
                match self {
                    $(Widget::$variant(widget) => widget.prop(),)*
                }
            }

            fn prop_mut(&mut self) -> &mut Prop {
                match self {
                    $(Widget::$variant(widget) => widget.prop_mut(),)*
                }
            }

            fn into_prop(self) -> Prop {
                match self {
                    $(Widget::$variant(widget) => widget.into_prop(),)*
                }
            }
        }

        $(
            impl WidgetAccessor for $ty {
                fn prop(&self) -> &Prop {
                    &self.prop
                }

                fn prop_mut(&mut self) -> &mut Prop {
                    &mut self.prop
                }

                fn into_prop(self) -> Prop {
                    self.prop
                }
            }

            impl From<$ty> for Widget {
                fn from(widget: $ty) -> Self {
                    Widget::$variant(widget)
                }
            }

            impl TryFrom<Widget> for $ty {
                type Error = Error;

                fn try_from(widget: Widget) -> Result<Self> {
                    match widget {
                        Widget::$variant(widget) => Ok(widget),
                        other => Err(Error::WidgetKind {
                            expected: stringify!($ty),
                            found: other.kind().name(),
                        }),
                    }
                }
            }
        )*
    };
}

widget_types! {
    Line(LineWidget) => as_line, as_line_mut;
    Plane(PlaneWidget) => as_plane, as_plane_mut;
    Sphere(SphereWidget) => as_sphere, as_sphere_mut;
    Arrow(ArrowWidget) => as_arrow, as_arrow_mut;
    Circle(CircleWidget) => as_circle, as_circle_mut;
    Cylinder(CylinderWidget) => as_cylinder, as_cylinder_mut;
    Cube(CubeWidget) => as_cube, as_cube_mut;
    CoordinateSystem(CoordinateSystemWidget) => as_coordinate_system, as_coordinate_system_mut;
    PolyLine(PolyLineWidget) => as_poly_line, as_poly_line_mut;
    Grid(GridWidget) => as_grid, as_grid_mut;
    Text3D(Text3DWidget) => as_text3d, as_text3d_mut;
    Text(TextWidget) => as_text, as_text_mut;
    ImageOverlay(ImageOverlayWidget) => as_image_overlay, as_image_overlay_mut;
    Image3D(Image3DWidget) => as_image3d, as_image3d_mut;
    CameraPosition(CameraPositionWidget) => as_camera_position, as_camera_position_mut;
    Trajectory(TrajectoryWidget) => as_trajectory, as_trajectory_mut;
}

impl Widget {
    fn unsupported(&self, capability: &str) -> Error {
        Error::Unsupported(format!("{} has no {}", self.kind().name(), capability))
    }

    pub fn set_text(&mut self, text: &str) -> Result<()> {
        match self {
            Widget::Text3D(widget) => widget.set_text(text),
            Widget::Text(widget) => widget.set_text(text),
            other => Err(other.unsupported("text")),
        }
    }

    pub fn text(&self) -> Result<&str> {
        match self {
            Widget::Text3D(widget) => widget.text(),
            Widget::Text(widget) => widget.text(),
            other => Err(other.unsupported("text")),
        }
    }

    pub fn set_image(&mut self, image: &Image) -> Result<()> {
        match self {
            Widget::ImageOverlay(widget) => widget.set_image(image),
            Widget::Image3D(widget) => widget.set_image(image),
            other => Err(other.unsupported("image")),
        }
    }

    pub fn set_line_width(&mut self, line_width: f32) -> Result<()> {
        match self {
            Widget::Line(widget) => widget.set_line_width(line_width),
            Widget::PolyLine(widget) => widget.set_line_width(line_width),
            other => Err(other.unsupported("line width")),
        }
    }

    pub fn line_width(&self) -> Result<f32> {
        match self {
            Widget::Line(widget) => widget.line_width(),
            Widget::PolyLine(widget) => widget.line_width(),
            other => Err(other.unsupported("line width")),
        }
    }

    /// Geometry of a 3D widget with its pose applied
    pub fn world_geometry(&self) -> Option<PolyData> {
        self.prop().world_geometry()
    }
}
