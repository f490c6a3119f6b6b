//! Procedural geometry sources
//!
//! Every source returns a fresh [`PolyData`]. Surfaces carry outward facing
//! polygons and per-point normals; wire sources carry line cells only.

use nalgebra::{Unit, UnitQuaternion};
use std::f32::consts::PI;
use vizcrate_core::{Bounds, Point3f, PolyData, Transform3D, Vector3f};

/// Straight segment between two points, one line cell
pub fn line_source(pt1: Point3f, pt2: Point3f) -> PolyData {
    PolyData::from_lines(vec![pt1, pt2], vec![vec![0, 1]])
}

/// Coordinate axis least aligned with `v`
pub fn least_aligned_axis(v: &Vector3f) -> Vector3f {
    let a = v.abs();
    if a.x <= a.y && a.x <= a.z {
        Vector3f::x()
    } else if a.y <= a.z {
        Vector3f::y()
    } else {
        Vector3f::z()
    }
}

/// A unit vector orthogonal to `v`
pub fn any_perpendicular(v: &Vector3f) -> Vector3f {
    v.cross(&least_aligned_axis(v)).normalize()
}

/// Rectangular plane described by an origin corner and two edge end points.
///
/// The default plane is the unit square centered at the origin with normal
/// +Z. Orientation and placement are changed through [`PlaneSource::set_normal`],
/// [`PlaneSource::set_center`] and [`PlaneSource::push`], which keep the
/// size of the plane.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaneSource {
    origin: Point3f,
    point1: Point3f,
    point2: Point3f,
    x_resolution: usize,
    y_resolution: usize,
}

impl PlaneSource {
    pub fn new() -> Self {
        Self {
            origin: Point3f::new(-0.5, -0.5, 0.0),
            point1: Point3f::new(0.5, -0.5, 0.0),
            point2: Point3f::new(-0.5, 0.5, 0.0),
            x_resolution: 1,
            y_resolution: 1,
        }
    }

    pub fn origin(&self) -> Point3f {
        self.origin
    }

    pub fn point1(&self) -> Point3f {
        self.point1
    }

    pub fn point2(&self) -> Point3f {
        self.point2
    }

    pub fn center(&self) -> Point3f {
        self.origin + ((self.point1 - self.origin) + (self.point2 - self.origin)) * 0.5
    }

    pub fn normal(&self) -> Vector3f {
        (self.point1 - self.origin)
            .cross(&(self.point2 - self.origin))
            .normalize()
    }

    pub fn set_resolution(&mut self, x_resolution: usize, y_resolution: usize) {
        self.x_resolution = x_resolution.max(1);
        self.y_resolution = y_resolution.max(1);
    }

    /// Rotate the plane about its center so that its normal becomes `normal`
    pub fn set_normal(&mut self, normal: Vector3f) {
        let target = normal.normalize();
        let current = self.normal();
        let rotation = match UnitQuaternion::rotation_between(&current, &target) {
            Some(rotation) => rotation,
            // Opposite normals: half turn about an in-plane axis
            None => {
                let axis = Unit::new_normalize(self.point1 - self.origin);
                UnitQuaternion::from_axis_angle(&axis, PI)
            }
        };
        let center = self.center();
        let transform = Transform3D::translation(center.coords)
            .compose(Transform3D::rotation(rotation))
            .compose(Transform3D::translation(-center.coords));
        self.apply(&transform);
    }

    /// Translate the plane so that its center is `center`
    pub fn set_center(&mut self, center: Point3f) {
        let offset = center - self.center();
        self.apply(&Transform3D::translation(offset));
    }

    /// Translate the plane along its normal by `distance`
    pub fn push(&mut self, distance: f32) {
        let offset = self.normal() * distance;
        self.apply(&Transform3D::translation(offset));
    }

    fn apply(&mut self, transform: &Transform3D) {
        self.origin = transform.transform_point(&self.origin);
        self.point1 = transform.transform_point(&self.point1);
        self.point2 = transform.transform_point(&self.point2);
    }

    /// Grid of `x_resolution x y_resolution` quads with texture coordinates in `[0, 1]`
    pub fn output(&self) -> PolyData {
        let v1 = self.point1 - self.origin;
        let v2 = self.point2 - self.origin;
        let normal = self.normal();
        let (xr, yr) = (self.x_resolution, self.y_resolution);

        let mut data = PolyData::new();
        let mut tcoords = Vec::with_capacity((xr + 1) * (yr + 1));
        for j in 0..=yr {
            let t = j as f32 / yr as f32;
            for i in 0..=xr {
                let s = i as f32 / xr as f32;
                data.add_point(self.origin + v1 * s + v2 * t);
                tcoords.push([s, t]);
            }
        }
        for j in 0..yr {
            for i in 0..xr {
                let base = j * (xr + 1) + i;
                data.polys.push(vec![base, base + 1, base + xr + 2, base + xr + 1]);
            }
        }
        data.set_normals(vec![normal; data.point_count()]);
        data.set_tcoords(tcoords);
        data
    }
}

impl Default for PlaneSource {
    fn default() -> Self {
        Self::new()
    }
}

/// UV sphere of triangles with `theta_resolution` meridians and
/// `phi_resolution` latitude steps from pole to pole
pub fn sphere_source(
    center: Point3f,
    radius: f32,
    theta_resolution: usize,
    phi_resolution: usize,
) -> PolyData {
    let theta_res = theta_resolution.max(3);
    let phi_res = phi_resolution.max(3);

    let mut data = PolyData::new();
    let mut normals = Vec::with_capacity(2 + (phi_res - 1) * theta_res);

    data.add_point(center + Vector3f::z() * radius);
    normals.push(Vector3f::z());
    data.add_point(center - Vector3f::z() * radius);
    normals.push(-Vector3f::z());

    for j in 1..phi_res {
        let phi = PI * j as f32 / phi_res as f32;
        for i in 0..theta_res {
            let theta = 2.0 * PI * i as f32 / theta_res as f32;
            let n = Vector3f::new(phi.sin() * theta.cos(), phi.sin() * theta.sin(), phi.cos());
            data.add_point(center + n * radius);
            normals.push(n);
        }
    }

    let ring = |j: usize, i: usize| 2 + (j - 1) * theta_res + (i % theta_res);

    for i in 0..theta_res {
        data.polys.push(vec![0, ring(1, i), ring(1, i + 1)]);
    }
    for j in 1..phi_res - 1 {
        for i in 0..theta_res {
            let (a0, a1) = (ring(j, i), ring(j, i + 1));
            let (b0, b1) = (ring(j + 1, i), ring(j + 1, i + 1));
            data.polys.push(vec![a0, b0, b1]);
            data.polys.push(vec![a0, b1, a1]);
        }
    }
    for i in 0..theta_res {
        data.polys.push(vec![1, ring(phi_res - 1, i + 1), ring(phi_res - 1, i)]);
    }

    data.set_normals(normals);
    data
}

/// Parameters of the canonical arrow running from the origin to (1, 0, 0)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArrowParams {
    pub tip_length: f32,
    pub tip_radius: f32,
    pub shaft_radius: f32,
    pub tip_resolution: usize,
    pub shaft_resolution: usize,
}

impl Default for ArrowParams {
    fn default() -> Self {
        Self {
            tip_length: 0.35,
            tip_radius: 0.1,
            shaft_radius: 0.03,
            tip_resolution: 6,
            shaft_resolution: 6,
        }
    }
}

/// Capped shaft cylinder followed by a capped cone, along +X from 0 to 1
pub fn arrow_source(params: &ArrowParams) -> PolyData {
    let shaft_end = 1.0 - params.tip_length;
    let mut data = PolyData::new();

    let ring = |data: &mut PolyData, x: f32, radius: f32, sides: usize| -> Vec<usize> {
        (0..sides)
            .map(|k| {
                let a = 2.0 * PI * k as f32 / sides as f32;
                data.add_point(Point3f::new(x, radius * a.cos(), radius * a.sin()))
            })
            .collect()
    };

    let shaft_sides = params.shaft_resolution.max(3);
    let start = ring(&mut data, 0.0, params.shaft_radius, shaft_sides);
    let end = ring(&mut data, shaft_end, params.shaft_radius, shaft_sides);
    for k in 0..shaft_sides {
        let k1 = (k + 1) % shaft_sides;
        data.polys.push(vec![start[k], start[k1], end[k1], end[k]]);
    }
    data.polys.push(start.iter().rev().copied().collect());
    data.polys.push(end);

    let tip_sides = params.tip_resolution.max(3);
    let base = ring(&mut data, shaft_end, params.tip_radius, tip_sides);
    let apex = data.add_point(Point3f::new(1.0, 0.0, 0.0));
    for k in 0..tip_sides {
        data.polys.push(vec![base[k], base[(k + 1) % tip_sides], apex]);
    }
    data.polys.push(base.iter().rev().copied().collect());

    data
}

/// Flat annulus in the XY plane centered at the origin
pub fn disk_source(
    inner_radius: f32,
    outer_radius: f32,
    radial_resolution: usize,
    circumferential_resolution: usize,
) -> PolyData {
    let radial = radial_resolution.max(1);
    let circ = circumferential_resolution.max(3);
    let mut data = PolyData::new();

    for r in 0..=radial {
        let radius = inner_radius + (outer_radius - inner_radius) * r as f32 / radial as f32;
        for k in 0..circ {
            let a = 2.0 * PI * k as f32 / circ as f32;
            data.add_point(Point3f::new(radius * a.cos(), radius * a.sin(), 0.0));
        }
    }
    for r in 0..radial {
        for k in 0..circ {
            let k1 = (k + 1) % circ;
            data.polys.push(vec![
                r * circ + k,
                (r + 1) * circ + k,
                (r + 1) * circ + k1,
                r * circ + k1,
            ]);
        }
    }
    data.set_normals(vec![Vector3f::z(); data.point_count()]);
    data
}

fn box_corner(bounds: &Bounds, index: usize) -> Point3f {
    Point3f::new(
        if index & 1 == 0 { bounds.min.x } else { bounds.max.x },
        if index & 2 == 0 { bounds.min.y } else { bounds.max.y },
        if index & 4 == 0 { bounds.min.z } else { bounds.max.z },
    )
}

/// The 12 edges of an axis-aligned box as line cells over its 8 corners
pub fn outline_source(bounds: &Bounds) -> PolyData {
    let points = (0..8).map(|i| box_corner(bounds, i)).collect();
    let lines = [
        [0, 1], [2, 3], [4, 5], [6, 7],
        [0, 2], [1, 3], [4, 6], [5, 7],
        [0, 4], [1, 5], [2, 6], [3, 7],
    ]
    .iter()
    .map(|e| e.to_vec())
    .collect();
    PolyData::from_lines(points, lines)
}

/// Solid axis-aligned box: six quads with their own corner points so that
/// every face carries a flat normal and full texture coordinates
pub fn cube_source(bounds: &Bounds) -> PolyData {
    // corner indices per face, counter-clockwise seen from outside
    const FACES: [([usize; 4], [f32; 3]); 6] = [
        ([0, 4, 6, 2], [-1.0, 0.0, 0.0]),
        ([1, 3, 7, 5], [1.0, 0.0, 0.0]),
        ([0, 1, 5, 4], [0.0, -1.0, 0.0]),
        ([2, 6, 7, 3], [0.0, 1.0, 0.0]),
        ([0, 2, 3, 1], [0.0, 0.0, -1.0]),
        ([4, 5, 7, 6], [0.0, 0.0, 1.0]),
    ];
    const FACE_TCOORDS: [[f32; 2]; 4] = [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]];

    let mut data = PolyData::new();
    let mut normals = Vec::with_capacity(24);
    let mut tcoords = Vec::with_capacity(24);
    for (corners, normal) in FACES.iter() {
        let ids = corners
            .iter()
            .zip(FACE_TCOORDS.iter())
            .map(|(&c, tc)| {
                normals.push(Vector3f::from(*normal));
                tcoords.push(*tc);
                data.add_point(box_corner(bounds, c))
            })
            .collect();
        data.polys.push(ids);
    }
    data.set_normals(normals);
    data.set_tcoords(tcoords);
    data
}

/// Three segments of length `scale` from `origin` along X, Y and Z
/// (points 0-1, 2-3 and 4-5)
pub fn axes_source(origin: Point3f, scale: f32) -> PolyData {
    let points = vec![
        origin,
        origin + Vector3f::x() * scale,
        origin,
        origin + Vector3f::y() * scale,
        origin,
        origin + Vector3f::z() * scale,
    ];
    PolyData::from_lines(points, vec![vec![0, 1], vec![2, 3], vec![4, 5]])
}

/// Regular grid of `dims.0 x dims.1` points in the z = `origin.z` plane.
///
/// Cells are quads when both dimensions exceed one, two-point lines when only
/// one does, and absent otherwise.
pub fn structured_grid_source(
    dims: (usize, usize),
    spacing: (f32, f32),
    origin: Point3f,
) -> PolyData {
    let (nx, ny) = dims;
    let mut data = PolyData::new();
    for j in 0..ny {
        for i in 0..nx {
            data.add_point(Point3f::new(
                origin.x + i as f32 * spacing.0,
                origin.y + j as f32 * spacing.1,
                origin.z,
            ));
        }
    }

    match (nx > 1, ny > 1) {
        (true, true) => {
            for j in 0..ny - 1 {
                for i in 0..nx - 1 {
                    let base = j * nx + i;
                    data.polys.push(vec![base, base + 1, base + nx + 1, base + nx]);
                }
            }
        }
        (true, false) => data.lines.extend((0..nx - 1).map(|i| vec![i, i + 1])),
        (false, true) => data.lines.extend((0..ny - 1).map(|j| vec![j, j + 1])),
        (false, false) => {}
    }
    data
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_plane_source_defaults() {
        let plane = PlaneSource::new();
        assert_relative_eq!(plane.center(), Point3f::origin());
        assert_relative_eq!(plane.normal(), Vector3f::z());

        let data = plane.output();
        assert_eq!(data.point_count(), 4);
        assert_eq!(data.polys, vec![vec![0, 1, 3, 2]]);
        assert_eq!(data.tcoords.as_ref().unwrap()[3], [1.0, 1.0]);
    }

    #[test]
    fn test_plane_set_normal_keeps_center_and_size() {
        let mut plane = PlaneSource::new();
        let target = Vector3f::new(1.0, 1.0, 0.0).normalize();
        plane.set_normal(target);
        assert_relative_eq!(plane.normal(), target, epsilon = 1e-6);
        assert_relative_eq!(plane.center(), Point3f::origin(), epsilon = 1e-6);
        assert_relative_eq!((plane.point1() - plane.origin()).norm(), 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_plane_resolution() {
        let mut plane = PlaneSource::new();
        plane.set_resolution(3, 2);
        let data = plane.output();
        assert_eq!(data.point_count(), 12);
        assert_eq!(data.poly_count(), 6);
        plane.set_resolution(0, 0);
        assert_eq!(plane.output().poly_count(), 1);
    }

    #[test]
    fn test_plane_set_normal_opposite() {
        let mut plane = PlaneSource::new();
        plane.set_normal(-Vector3f::z());
        assert_relative_eq!(plane.normal(), -Vector3f::z(), epsilon = 1e-6);
    }

    #[test]
    fn test_plane_push_and_center() {
        let mut plane = PlaneSource::new();
        plane.push(2.5);
        assert_relative_eq!(plane.center(), Point3f::new(0.0, 0.0, 2.5));
        plane.set_center(Point3f::new(1.0, 2.0, 3.0));
        assert_relative_eq!(plane.center(), Point3f::new(1.0, 2.0, 3.0), epsilon = 1e-6);
    }

    #[test]
    fn test_sphere_points_on_surface() {
        let center = Point3f::new(1.0, -1.0, 2.0);
        let sphere = sphere_source(center, 0.5, 10, 10);
        assert_eq!(sphere.point_count(), 2 + 9 * 10);
        assert_eq!(sphere.poly_count(), 2 * 10 + 8 * 10 * 2);
        for p in &sphere.points {
            assert_relative_eq!((p - center).norm(), 0.5, epsilon = 1e-5);
        }
        assert!(sphere.polys.iter().all(|c| c.len() == 3));
    }

    #[test]
    fn test_sphere_faces_point_outward() {
        let sphere = sphere_source(Point3f::origin(), 1.0, 8, 6);
        for cell in &sphere.polys {
            let [a, b, c] = [cell[0], cell[1], cell[2]].map(|id| sphere.points[id]);
            let n = (b - a).cross(&(c - a));
            let centroid = (a.coords + b.coords + c.coords) / 3.0;
            assert!(n.dot(&centroid) > 0.0);
        }
    }

    #[test]
    fn test_arrow_spans_unit_length() {
        let arrow = arrow_source(&ArrowParams::default());
        let bounds = arrow.bounds().unwrap();
        assert_relative_eq!(bounds.min.x, 0.0);
        assert_relative_eq!(bounds.max.x, 1.0);
        assert_relative_eq!(bounds.max.y, 0.1, epsilon = 1e-6);
    }

    #[test]
    fn test_disk_radii() {
        let disk = disk_source(0.9, 1.1, 1, 50);
        assert_eq!(disk.point_count(), 100);
        assert_eq!(disk.poly_count(), 50);
        for (i, p) in disk.points.iter().enumerate() {
            let expected = if i < 50 { 0.9 } else { 1.1 };
            assert_relative_eq!(p.coords.norm(), expected, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_outline_edges_are_axis_aligned() {
        let bounds = Bounds {
            min: Point3f::new(0.0, 0.0, 0.0),
            max: Point3f::new(1.0, 2.0, 3.0),
        };
        let outline = outline_source(&bounds);
        assert_eq!(outline.point_count(), 8);
        assert_eq!(outline.line_count(), 12);
        for cell in &outline.lines {
            let d = outline.points[cell[1]] - outline.points[cell[0]];
            assert_eq!(d.iter().filter(|c| **c != 0.0).count(), 1);
        }
    }

    #[test]
    fn test_cube_normals_point_outward() {
        let bounds = Bounds {
            min: Point3f::new(-1.0, -1.0, -1.0),
            max: Point3f::new(1.0, 2.0, 3.0),
        };
        let cube = cube_source(&bounds);
        assert_eq!(cube.point_count(), 24);
        assert_eq!(cube.poly_count(), 6);
        assert_eq!(cube.bounds().unwrap(), bounds);

        let normals = cube.normals.as_ref().unwrap();
        for cell in &cube.polys {
            let (a, b, c) = (cube.points[cell[0]], cube.points[cell[1]], cube.points[cell[2]]);
            let n = (b - a).cross(&(c - a)).normalize();
            assert_relative_eq!(n, normals[cell[0]], epsilon = 1e-6);
        }
    }

    #[test]
    fn test_axes_source() {
        let axes = axes_source(Point3f::origin(), 2.0);
        assert_eq!(axes.point_count(), 6);
        assert_eq!(axes.points[3], Point3f::new(0.0, 2.0, 0.0));
        assert_eq!(axes.lines.len(), 3);
    }

    #[test]
    fn test_structured_grid_cells() {
        let grid = structured_grid_source((3, 4), (1.0, 0.5), Point3f::new(-1.0, -1.0, 0.0));
        assert_eq!(grid.point_count(), 12);
        assert_eq!(grid.poly_count(), 6);
        let bounds = grid.bounds().unwrap();
        assert_relative_eq!(bounds.max, Point3f::new(1.0, 0.5, 0.0));

        let row = structured_grid_source((3, 1), (1.0, 1.0), Point3f::origin());
        assert_eq!(row.poly_count(), 0);
        assert_eq!(row.lines, vec![vec![0, 1], vec![1, 2]]);
    }

    #[test]
    fn test_least_aligned_axis() {
        assert_eq!(least_aligned_axis(&Vector3f::new(1.0, 0.2, 0.5)), Vector3f::y());
        let p = any_perpendicular(&Vector3f::new(0.0, 0.0, 3.0));
        assert_relative_eq!(p.dot(&Vector3f::z()), 0.0);
        assert_relative_eq!(p.norm(), 1.0);
    }
}
