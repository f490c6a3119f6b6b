//! Primitive shape widgets

use nalgebra::Vector4;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};
use vizcrate_core::{Bounds, Color, Point3f, PolyData, Result, Transform3D, Vector3f};
use vizcrate_geometry::{
    arrow_source, cube_source, disk_source, least_aligned_axis, line_source, outline_source,
    sphere_source, tube_filter, ArrowParams, PlaneSource,
};

use crate::prop::{Actor, Prop};

/// Segments around a circle widget
pub const CIRCLE_RESOLUTION: usize = 50;

pub(crate) fn is_degenerate(v: &Vector3f) -> bool {
    v.norm_squared() <= f32::EPSILON * f32::EPSILON
}

/// Actor over `geometry` with `color` as material color
pub(crate) fn colored_actor(geometry: PolyData, color: Color) -> Prop {
    let mut actor = Actor::new(geometry);
    actor.property.color = color.to_rgb_f32();
    Prop::Actor(actor)
}

/// A straight segment
#[derive(Debug, Clone, PartialEq)]
pub struct LineWidget {
    pub(crate) prop: Prop,
}

impl LineWidget {
    #[instrument(level = "debug")]
    pub fn new(pt1: Point3f, pt2: Point3f, color: Color) -> Self {
        Self {
            prop: colored_actor(line_source(pt1, pt2), color),
        }
    }

    pub fn set_line_width(&mut self, line_width: f32) -> Result<()> {
        self.prop.as_actor_mut()?.property.line_width = line_width;
        Ok(())
    }

    pub fn line_width(&self) -> Result<f32> {
        Ok(self.prop.as_actor()?.property.line_width)
    }
}

/// A square patch of the plane `a x + b y + c z + d = 0`
#[derive(Debug, Clone, PartialEq)]
pub struct PlaneWidget {
    pub(crate) prop: Prop,
}

impl PlaneWidget {
    /// Patch of side `size` centered at the point of the plane closest to the origin
    #[instrument(level = "debug")]
    pub fn new(coefs: Vector4<f32>, size: f32, color: Color) -> Self {
        let normal = coefs.xyz();
        if is_degenerate(&normal) {
            warn!("plane normal has zero length");
            return Self::empty(color);
        }
        let mut plane = PlaneSource::new();
        plane.set_normal(normal);
        plane.push(-coefs.w / normal.norm());
        Self::from_source(&plane, size, color)
    }

    /// Patch of side `size` centered at the projection of `pt` onto the plane
    #[instrument(level = "debug")]
    pub fn with_point(coefs: Vector4<f32>, pt: Point3f, size: f32, color: Color) -> Self {
        let normal = coefs.xyz();
        if is_degenerate(&normal) {
            warn!("plane normal has zero length");
            return Self::empty(color);
        }
        let distance = (normal.dot(&pt.coords) + coefs.w) / normal.norm_squared();
        let mut plane = PlaneSource::new();
        plane.set_normal(normal);
        plane.set_center(pt - normal * distance);
        Self::from_source(&plane, size, color)
    }

    fn empty(color: Color) -> Self {
        Self {
            prop: colored_actor(PolyData::new(), color),
        }
    }

    fn from_source(plane: &PlaneSource, size: f32, color: Color) -> Self {
        let center = plane.center();
        let scale = Transform3D::scaling_about(&center, Vector3f::repeat(size));
        let geometry = plane.output().transformed(&scale);
        debug!(center = ?[center.x, center.y, center.z], size, "built plane");
        Self {
            prop: colored_actor(geometry, color),
        }
    }
}

/// A sphere of triangles
#[derive(Debug, Clone, PartialEq)]
pub struct SphereWidget {
    pub(crate) prop: Prop,
}

impl SphereWidget {
    #[instrument(level = "debug")]
    pub fn new(center: Point3f, radius: f32, resolution: usize, color: Color) -> Self {
        let geometry = sphere_source(center, radius, resolution, resolution);
        debug!(points = geometry.point_count(), polys = geometry.poly_count(), "built sphere");
        Self {
            prop: colored_actor(geometry, color),
        }
    }
}

/// How an arrow picks the reference vector for its cross-section frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CrossSection {
    /// The coordinate axis least aligned with the arrow direction
    #[default]
    LeastAlignedAxis,
    /// A vector drawn uniformly from `[-10, 10]^3` by a generator with this seed
    Seeded(u64),
}

impl CrossSection {
    fn reference(&self, direction: &Vector3f) -> Vector3f {
        match *self {
            CrossSection::LeastAlignedAxis => least_aligned_axis(direction),
            CrossSection::Seeded(seed) => {
                let mut rng = StdRng::seed_from_u64(seed);
                Vector3f::new(
                    rng.gen_range(-10.0..10.0),
                    rng.gen_range(-10.0..10.0),
                    rng.gen_range(-10.0..10.0),
                )
            }
        }
    }
}

/// An arrow from `pt1` with its tip at `pt2`
#[derive(Debug, Clone, PartialEq)]
pub struct ArrowWidget {
    pub(crate) prop: Prop,
}

impl ArrowWidget {
    #[instrument(level = "debug")]
    pub fn new(pt1: Point3f, pt2: Point3f, thickness: f32, color: Color) -> Self {
        Self::with_cross_section(pt1, pt2, thickness, color, CrossSection::default())
    }

    /// Arrow whose shaft has radius `thickness` and whose tip has radius
    /// `3 * thickness` and length `10 * thickness`, all relative to the arrow length
    #[instrument(level = "debug")]
    pub fn with_cross_section(
        pt1: Point3f,
        pt2: Point3f,
        thickness: f32,
        color: Color,
        cross_section: CrossSection,
    ) -> Self {
        let direction = pt2 - pt1;
        if is_degenerate(&direction) {
            warn!("arrow end points coincide");
            return Self {
                prop: colored_actor(PolyData::new(), color),
            };
        }
        let length = direction.norm();
        let x = direction / length;
        let z = x.cross(&cross_section.reference(&x)).normalize();
        let y = z.cross(&x);
        let transform = Transform3D::from_basis(x * length, y * length, z * length, pt1.coords);

        let params = ArrowParams {
            shaft_radius: thickness,
            tip_radius: thickness * 3.0,
            tip_length: thickness * 10.0,
            ..ArrowParams::default()
        };
        let geometry = arrow_source(&params).transformed(&transform);
        Self {
            prop: colored_actor(geometry, color),
        }
    }
}

/// A flat ring in the XY plane
#[derive(Debug, Clone, PartialEq)]
pub struct CircleWidget {
    pub(crate) prop: Prop,
}

impl CircleWidget {
    /// Ring between radii `radius - thickness` and `radius + thickness`
    #[instrument(level = "debug")]
    pub fn new(center: Point3f, radius: f32, thickness: f32, color: Color) -> Self {
        let geometry = disk_source(radius - thickness, radius + thickness, 1, CIRCLE_RESOLUTION)
            .transformed(&Transform3D::translation(center.coords));
        Self {
            prop: colored_actor(geometry, color),
        }
    }
}

/// An open tube around a segment of an axis
#[derive(Debug, Clone, PartialEq)]
pub struct CylinderWidget {
    pub(crate) prop: Prop,
}

impl CylinderWidget {
    /// Tube from `pt_on_axis` to `pt_on_axis + axis_direction`
    #[instrument(level = "debug")]
    pub fn new(
        pt_on_axis: Point3f,
        axis_direction: Vector3f,
        radius: f32,
        num_sides: usize,
        color: Color,
    ) -> Self {
        if is_degenerate(&axis_direction) {
            warn!("cylinder axis has zero length");
        }
        let axis = line_source(pt_on_axis, pt_on_axis + axis_direction);
        let geometry = tube_filter(&axis, radius, num_sides);
        Self {
            prop: colored_actor(geometry, color),
        }
    }
}

/// An axis-aligned box, as a wireframe or a solid
#[derive(Debug, Clone, PartialEq)]
pub struct CubeWidget {
    pub(crate) prop: Prop,
}

impl CubeWidget {
    #[instrument(level = "debug")]
    pub fn new(pt_min: Point3f, pt_max: Point3f, wire_frame: bool, color: Color) -> Self {
        let bounds = Bounds {
            min: pt_min,
            max: pt_max,
        };
        let geometry = if wire_frame {
            outline_source(&bounds)
        } else {
            cube_source(&bounds)
        };
        Self {
            prop: colored_actor(geometry, color),
        }
    }
}
