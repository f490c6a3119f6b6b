//! Poly data filters
//!
//! Filters take a data set by reference and return a new one, so a widget can
//! keep its source output around while deriving display geometry from it.

use itertools::Itertools;
use std::collections::HashMap;
use std::f32::consts::PI;
use tracing::debug;
use vizcrate_core::{Point3f, PolyData, Transform3D, Transformable, Vector3f};

use crate::sources::any_perpendicular;

/// Apply a transformation to a copy of `data`
pub fn transform_poly_data(data: &PolyData, transform: &Transform3D) -> PolyData {
    let mut out = data.clone();
    out.transform(transform);
    out
}

/// Concatenate data sets, keeping point attributes shared by all inputs
pub fn append_poly_data<'a, I>(inputs: I) -> PolyData
where
    I: IntoIterator<Item = &'a PolyData>,
{
    inputs.into_iter().fold(PolyData::new(), |mut acc, data| {
        acc.append(data);
        acc
    })
}

/// Unique undirected edges of all polygons and polylines as two-point line
/// cells. Only points referenced by an edge are kept, in first-use order,
/// together with their colors.
pub fn extract_edges(data: &PolyData) -> PolyData {
    let polygon_edges = data.polys.iter().flat_map(|cell| {
        cell.iter()
            .copied()
            .circular_tuple_windows::<(usize, usize)>()
            .take(if cell.len() > 2 { cell.len() } else { cell.len().saturating_sub(1) })
    });
    let line_edges = data
        .lines
        .iter()
        .flat_map(|cell| cell.iter().copied().tuple_windows::<(usize, usize)>());

    let edges: Vec<(usize, usize)> = polygon_edges
        .chain(line_edges)
        .filter(|(a, b)| a != b)
        .unique_by(|&(a, b)| (a.min(b), a.max(b)))
        .collect();

    let mut remap: HashMap<usize, usize> = HashMap::new();
    let mut out = PolyData::new();
    let mut colors = data.colors.as_ref().map(|_| Vec::new());
    for (a, b) in edges {
        let mut map_point = |id: usize, out: &mut PolyData| {
            *remap.entry(id).or_insert_with(|| {
                if let (Some(colors), Some(source)) = (colors.as_mut(), data.colors.as_ref()) {
                    colors.push(source[id]);
                }
                out.add_point(data.points[id])
            })
        };
        let a = map_point(a, &mut out);
        let b = map_point(b, &mut out);
        out.lines.push(vec![a, b]);
    }
    if let Some(colors) = colors {
        out.set_colors(colors);
    }

    debug!(edges = out.line_count(), points = out.point_count(), "extracted edges");
    out
}

/// Extrude every polyline into a tube of `sides` quads around it.
///
/// Consecutive duplicate points are skipped and polylines with fewer than two
/// distinct points produce nothing. The ring frame is carried along the line
/// by projecting the previous normal, which avoids twisting. Point colors are
/// copied to every ring point. Tubes are open at both ends.
pub fn tube_filter(data: &PolyData, radius: f32, sides: usize) -> PolyData {
    let sides = sides.max(3);
    let mut out = PolyData::new();
    let mut normals = Vec::new();
    let mut colors = data.colors.as_ref().map(|_| Vec::new());

    for cell in &data.lines {
        let ids: Vec<usize> = cell
            .iter()
            .copied()
            .dedup_by(|a, b| data.points[*a] == data.points[*b])
            .collect();
        if ids.len() < 2 {
            continue;
        }

        let points: Vec<Point3f> = ids.iter().map(|&id| data.points[id]).collect();
        let tangents = polyline_tangents(&points);

        let mut normal = any_perpendicular(&tangents[0]);
        let mut rings = Vec::with_capacity(points.len());
        for (i, (p, t)) in points.iter().zip(tangents.iter()).enumerate() {
            if i > 0 {
                let projected = normal - t * normal.dot(t);
                normal = projected
                    .try_normalize(1e-6)
                    .unwrap_or_else(|| any_perpendicular(t));
            }
            let binormal = t.cross(&normal);

            let ring: Vec<usize> = (0..sides)
                .map(|k| {
                    let a = 2.0 * PI * k as f32 / sides as f32;
                    let radial = normal * a.cos() + binormal * a.sin();
                    normals.push(radial);
                    if let (Some(colors), Some(source)) = (colors.as_mut(), data.colors.as_ref()) {
                        colors.push(source[ids[i]]);
                    }
                    out.add_point(p + radial * radius)
                })
                .collect();
            rings.push(ring);
        }

        for (r0, r1) in rings.iter().tuple_windows() {
            for k in 0..sides {
                let k1 = (k + 1) % sides;
                out.polys.push(vec![r0[k], r0[k1], r1[k1], r1[k]]);
            }
        }
    }

    out.set_normals(normals);
    if let Some(colors) = colors {
        out.set_colors(colors);
    }
    debug!(polys = out.poly_count(), radius, sides, "extruded tubes");
    out
}

fn polyline_tangents(points: &[Point3f]) -> Vec<Vector3f> {
    let segments: Vec<Vector3f> = points
        .iter()
        .tuple_windows()
        .map(|(a, b)| (b - a).normalize())
        .collect();
    (0..points.len())
        .map(|i| {
            if i == 0 {
                segments[0]
            } else if i == points.len() - 1 {
                segments[i - 1]
            } else {
                let sum = segments[i - 1] + segments[i];
                sum.try_normalize(1e-6).unwrap_or(segments[i])
            }
        })
        .collect()
}

/// Texture coordinates from the projection of every point onto the plane
/// spanned by `origin -> point1` (s axis) and `origin -> point2` (t axis)
pub fn texture_map_to_plane(
    data: &PolyData,
    origin: Point3f,
    point1: Point3f,
    point2: Point3f,
) -> PolyData {
    let s_axis = point1 - origin;
    let t_axis = point2 - origin;
    let (s_len2, t_len2) = (s_axis.norm_squared(), t_axis.norm_squared());

    let tcoords = data
        .points
        .iter()
        .map(|p| {
            let d = p - origin;
            [d.dot(&s_axis) / s_len2, d.dot(&t_axis) / t_len2]
        })
        .collect();
    let mut out = data.clone();
    out.set_tcoords(tcoords);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::*;
    use approx::assert_relative_eq;
    use vizcrate_core::Bounds;

    #[test]
    fn test_extract_edges_of_quad_grid() {
        let grid = structured_grid_source((3, 3), (1.0, 1.0), Point3f::origin());
        let edges = extract_edges(&grid);
        // 2x2 cells: 3 horizontal rows of 2 + 3 vertical columns of 2
        assert_eq!(edges.line_count(), 12);
        assert_eq!(edges.point_count(), 9);
        assert!(edges.polys.is_empty());
    }

    #[test]
    fn test_extract_edges_of_cube_shares_corners() {
        let bounds = Bounds {
            min: Point3f::new(0.0, 0.0, 0.0),
            max: Point3f::new(1.0, 1.0, 1.0),
        };
        // cube faces use separate points per face, so edges are only shared by id
        let cube = cube_source(&bounds);
        assert_eq!(extract_edges(&cube).line_count(), 24);

        let outline = outline_source(&bounds);
        assert_eq!(extract_edges(&outline).line_count(), 12);
    }

    #[test]
    fn test_extract_edges_keeps_colors() {
        let mut axes = axes_source(Point3f::origin(), 1.0);
        axes.set_colors(vec![[1, 1, 1], [2, 2, 2], [3, 3, 3], [4, 4, 4], [5, 5, 5], [6, 6, 6]]);
        let edges = extract_edges(&axes);
        // the three origins coincide in space but are distinct points
        assert_eq!(edges.point_count(), 6);
        assert_eq!(edges.colors.as_ref().unwrap()[3], [4, 4, 4]);
    }

    #[test]
    fn test_tube_points_at_radius() {
        let line = line_source(Point3f::new(0.0, 0.0, 0.0), Point3f::new(0.0, 0.0, 2.0));
        let tube = tube_filter(&line, 0.25, 8);
        assert_eq!(tube.point_count(), 16);
        assert_eq!(tube.poly_count(), 8);
        for p in &tube.points {
            assert_relative_eq!((p.x * p.x + p.y * p.y).sqrt(), 0.25, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_tube_skips_degenerate_lines() {
        let p = Point3f::new(1.0, 1.0, 1.0);
        let line = line_source(p, p);
        let tube = tube_filter(&line, 0.1, 6);
        assert!(tube.is_empty());
        assert!(tube.polys.is_empty());
    }

    #[test]
    fn test_tube_propagates_colors() {
        let mut axes = axes_source(Point3f::origin(), 1.0);
        axes.set_colors(vec![
            [255, 0, 0],
            [255, 0, 0],
            [0, 255, 0],
            [0, 255, 0],
            [0, 0, 255],
            [0, 0, 255],
        ]);
        let tubes = tube_filter(&axes, 0.02, 6);
        let colors = tubes.colors.as_ref().unwrap();
        assert_eq!(colors.len(), 36);
        assert_eq!(colors[0], [255, 0, 0]);
        assert_eq!(colors[12], [0, 255, 0]);
        assert_eq!(colors[35], [0, 0, 255]);
    }

    #[test]
    fn test_texture_map_to_plane() {
        let quad = PlaneSource::new().output();
        let mapped = texture_map_to_plane(
            &quad,
            Point3f::new(-0.5, -0.5, 0.0),
            Point3f::new(0.5, -0.5, 0.0),
            Point3f::new(-0.5, 0.5, 0.0),
        );
        assert_eq!(mapped.tcoords, quad.tcoords);
    }

    #[test]
    fn test_append_poly_data() {
        let a = line_source(Point3f::origin(), Point3f::new(1.0, 0.0, 0.0));
        let b = line_source(Point3f::origin(), Point3f::new(0.0, 1.0, 0.0));
        let merged = append_poly_data([&a, &b]);
        assert_eq!(merged.point_count(), 4);
        assert_eq!(merged.lines, vec![vec![0, 1], vec![2, 3]]);
    }
}
