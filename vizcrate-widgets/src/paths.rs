//! Polylines and camera trajectories

use nalgebra::Matrix3;
use tracing::{debug, instrument};
use vizcrate_core::{Color, Point3f, PointBuffer, PolyData, Result, Transform3D};
use vizcrate_geometry::{append_poly_data, Camera};

use crate::frames::{frame_geometry, frustum_wireframe, intrinsics_camera, FrameStyle};
use crate::prop::{Actor, Prop};
use crate::shapes::colored_actor;

/// One polyline cell through all of `points`, none if `points` is empty
fn polyline(points: Vec<Point3f>) -> PolyData {
    if points.is_empty() {
        return PolyData::new();
    }
    let cell = (0..points.len()).collect();
    PolyData::from_lines(points, vec![cell])
}

/// Accumulated poses `M_i = path[i] * M_{i-1}` with `M_{-1}` the identity
pub fn accumulate_poses(path: &[Transform3D]) -> Vec<Transform3D> {
    path.iter()
        .scan(Transform3D::identity(), |pose, step| {
            *pose = step.compose(*pose);
            Some(*pose)
        })
        .collect()
}

/// A connected line through a buffer of points
#[derive(Debug, Clone, PartialEq)]
pub struct PolyLineWidget {
    pub(crate) prop: Prop,
}

impl PolyLineWidget {
    /// Polyline through the buffer in row-major order
    #[instrument(level = "debug", skip(points), fields(points = points.total()))]
    pub fn new(points: &PointBuffer, color: Color) -> Self {
        Self {
            prop: colored_actor(polyline(points.positions()), color),
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

/// The path of a moving camera, given as relative motions
#[derive(Debug, Clone, PartialEq)]
pub struct TrajectoryWidget {
    pub(crate) prop: Prop,
}

impl TrajectoryWidget {
    /// Polyline through the positions reached by applying each step of
    /// `path` in turn to the origin, optionally with a coordinate frame of
    /// size `scale` at every position
    pub fn new(path: &[Transform3D], color: Color, show_frames: bool, scale: f32) -> Self {
        Self::with_style(path, color, show_frames, scale, &FrameStyle::default())
    }

    #[instrument(level = "debug", skip(path), fields(steps = path.len()))]
    pub fn with_style(
        path: &[Transform3D],
        color: Color,
        show_frames: bool,
        scale: f32,
        style: &FrameStyle,
    ) -> Self {
        let poses = accumulate_poses(path);
        let positions = poses
            .iter()
            .map(|pose| pose.transform_point(&Point3f::origin()))
            .collect();

        let mut geometry = polyline(positions);
        geometry.fill_colors(color.to_rgb_u8());

        if show_frames {
            let frame = frame_geometry(scale, &Transform3D::identity(), style);
            let frames: Vec<PolyData> = poses.iter().map(|pose| frame.transformed(pose)).collect();
            geometry = append_poly_data(std::iter::once(&geometry).chain(&frames));
        }
        debug!(points = geometry.point_count(), "built trajectory");
        Self {
            prop: Prop::Actor(Actor::with_point_colors(geometry)),
        }
    }

    /// Frustum of the pinhole camera with intrinsic matrix `k` at every pose of the path
    pub fn with_intrinsics(
        path: &[Transform3D],
        k: &Matrix3<f32>,
        scale: f32,
        color: Color,
    ) -> Self {
        Self::from_camera(path, &intrinsics_camera(k, scale), color)
    }

    /// Frustum of `camera` at every pose of the path
    #[instrument(level = "debug", skip(path), fields(steps = path.len()))]
    pub fn from_camera(path: &[Transform3D], camera: &Camera, color: Color) -> Self {
        let wireframe = frustum_wireframe(camera);
        let frusta: Vec<PolyData> = accumulate_poses(path)
            .iter()
            .map(|pose| wireframe.transformed(pose))
            .collect();
        let geometry = append_poly_data(&frusta);
        debug!(edges = geometry.line_count(), "built frustum trajectory");
        Self {
            prop: colored_actor(geometry, color),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prop::ScalarMode;
    use crate::widget::WidgetAccessor;
    use approx::assert_relative_eq;
    use nalgebra::{UnitQuaternion, Vector3};
    use vizcrate_core::PointElements;

    fn geometry(prop: &Prop) -> &PolyData {
        &prop.as_actor().unwrap().geometry
    }

    fn make_path() -> Vec<Transform3D> {
        let turn = UnitQuaternion::from_axis_angle(&Vector3::z_axis(), std::f32::consts::FRAC_PI_2);
        vec![
            Transform3D::translation(Vector3::new(1.0, 0.0, 0.0)),
            Transform3D::from_translation_rotation(Vector3::new(0.0, 1.0, 0.0), turn),
            Transform3D::translation(Vector3::new(0.0, 0.0, 2.0)),
        ]
    }

    #[test]
    fn test_polyline_row_major_order() {
        let elements = PointElements::F64(vec![
            0.0, 0.0, 0.0, 1.0, 0.0, 0.0, //
            1.0, 1.0, 0.0, 0.0, 1.0, 0.0,
        ]);
        let buffer = PointBuffer::new(2, 2, 3, elements).unwrap();
        let widget = PolyLineWidget::new(&buffer, Color::white());
        let data = geometry(widget.prop());
        assert_eq!(data.point_count(), 4);
        assert_eq!(data.lines, vec![vec![0, 1, 2, 3]]);
        assert_eq!(data.points[2], Point3f::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn test_polyline_narrows_f64() {
        let buffer = PointBuffer::from_points_f64(&[[0.5, 0.25, 0.0], [0.125, 2.0, -1.0]]);
        let widget = PolyLineWidget::new(&buffer, Color::white());
        let data = geometry(widget.prop());
        assert_eq!(data.points[1], Point3f::new(0.125, 2.0, -1.0));
        assert_eq!(data.lines, vec![vec![0, 1]]);
    }

    #[test]
    fn test_polyline_empty_buffer() {
        let buffer = PointBuffer::new(0, 0, 3, PointElements::F64(Vec::new())).unwrap();
        let widget = PolyLineWidget::new(&buffer, Color::white());
        let data = geometry(widget.prop());
        assert!(data.is_empty());
        assert!(data.lines.is_empty());
        assert!(widget.bounds().is_none());

        let widget = PolyLineWidget::new(&PointBuffer::from_points(&[]), Color::white());
        assert!(geometry(widget.prop()).is_empty());
    }

    #[test]
    fn test_polyline_four_channels() {
        let elements = PointElements::F32(vec![1.0, 2.0, 3.0, 9.0, 4.0, 5.0, 6.0, 9.0]);
        let buffer = PointBuffer::new(1, 2, 4, elements).unwrap();
        let mut widget = PolyLineWidget::new(&buffer, Color::white());
        let data = geometry(widget.prop());
        assert_eq!(data.points, vec![Point3f::new(1.0, 2.0, 3.0), Point3f::new(4.0, 5.0, 6.0)]);

        widget.set_line_width(2.5).unwrap();
        assert_eq!(widget.line_width().unwrap(), 2.5);
    }

    #[test]
    fn test_trajectory_accumulates_steps() {
        let path = make_path();
        let widget = TrajectoryWidget::new(&path, Color::green(), false, 1.0);
        let data = geometry(widget.prop());
        assert_eq!(data.point_count(), path.len());
        assert_eq!(data.lines, vec![vec![0, 1, 2]]);
        assert!(data.colors.as_ref().unwrap().iter().all(|&c| c == [0, 255, 0]));

        // point i is path[i] * ... * path[0] applied to the origin
        let mut expected = Point3f::origin();
        for (step, point) in path.iter().zip(&data.points) {
            expected = step.transform_point(&expected);
            assert_relative_eq!(*point, expected, epsilon = 1e-5);
        }
        assert_relative_eq!(data.points[1], Point3f::new(0.0, 2.0, 0.0), epsilon = 1e-5);
    }

    #[test]
    fn test_trajectory_frames() {
        let path = make_path();
        let widget = TrajectoryWidget::new(&path, Color::white(), true, 0.5);
        let data = geometry(widget.prop());
        // polyline points followed by one tubed frame of 36 points per step
        assert_eq!(data.point_count(), path.len() + 36 * path.len());
        assert_eq!(data.colors.as_ref().unwrap().len(), data.point_count());
        assert_eq!(data.poly_count(), 18 * path.len());
    }

    #[test]
    fn test_set_color_on_trajectory_switches_to_material() {
        let mut widget = TrajectoryWidget::new(&make_path(), Color::green(), true, 0.5);
        assert_eq!(widget.prop().as_actor().unwrap().scalar_mode, ScalarMode::UsePointData);
        widget.set_color(Color::gray()).unwrap();
        assert_eq!(widget.prop().as_actor().unwrap().scalar_mode, ScalarMode::Material);
        assert_eq!(widget.color().unwrap(), Color::gray());
    }

    #[test]
    fn test_empty_trajectory() {
        let widget = TrajectoryWidget::new(&[], Color::white(), true, 1.0);
        let data = geometry(widget.prop());
        assert_eq!(data.point_count(), 0);
        assert!(data.lines.is_empty());
        assert!(widget.bounds().is_none());
    }

    #[test]
    fn test_frustum_trajectory() {
        let k = Matrix3::new(400.0, 0.0, 200.0, 0.0, 400.0, 200.0, 0.0, 0.0, 1.0);
        let path = make_path();
        let widget = TrajectoryWidget::with_intrinsics(&path, &k, 1.0, Color::red());
        let data = geometry(widget.prop());
        assert_eq!(data.point_count(), 8 * path.len());
        assert_eq!(data.line_count(), 12 * path.len());
        assert!(data.colors.is_none());
    }
}
