//! Polygonal data: points with line and polygon cells
//!
//! `PolyData` is what every geometry source produces and every filter
//! consumes. Cells reference points by index. Point attributes (normals,
//! texture coordinates, colors) are optional and, when present, hold exactly
//! one entry per point.

use crate::point::*;
use crate::transform::Transform3D;
use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

/// Polygonal data set with polyline and polygon cells
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PolyData {
    pub points: Vec<Point3f>,
    pub lines: Vec<Vec<usize>>,
    pub polys: Vec<Vec<usize>>,
    pub normals: Option<Vec<Vector3f>>,
    pub tcoords: Option<Vec<[f32; 2]>>,
    pub colors: Option<Vec<[u8; 3]>>,
}

/// Interleaved vertex ready for upload to a GPU vertex buffer
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub color: [f32; 3],
    pub tex_coord: [f32; 2],
}

impl PolyData {
    /// Create an empty data set
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a data set from points and polygons
    pub fn from_polys(points: Vec<Point3f>, polys: Vec<Vec<usize>>) -> Self {
        Self {
            points,
            polys,
            ..Self::default()
        }
    }

    /// Create a data set from points and polylines
    pub fn from_lines(points: Vec<Point3f>, lines: Vec<Vec<usize>>) -> Self {
        Self {
            points,
            lines,
            ..Self::default()
        }
    }

    /// Get the number of points
    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    /// Get the number of line cells
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Get the number of polygon cells
    pub fn poly_count(&self) -> usize {
        self.polys.len()
    }

    /// Check if the data set has no points
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Add a point and return its index
    pub fn add_point(&mut self, point: Point3f) -> usize {
        let index = self.points.len();
        self.points.push(point);
        index
    }

    /// Axis-aligned bounds, `None` when empty
    pub fn bounds(&self) -> Option<Bounds> {
        Bounds::from_points(&self.points)
    }

    /// Set vertex normals
    pub fn set_normals(&mut self, normals: Vec<Vector3f>) {
        if normals.len() == self.points.len() {
            self.normals = Some(normals);
        }
    }

    /// Set texture coordinates
    pub fn set_tcoords(&mut self, tcoords: Vec<[f32; 2]>) {
        if tcoords.len() == self.points.len() {
            self.tcoords = Some(tcoords);
        }
    }

    /// Set vertex colors
    pub fn set_colors(&mut self, colors: Vec<[u8; 3]>) {
        if colors.len() == self.points.len() {
            self.colors = Some(colors);
        }
    }

    /// Give every point the same color
    pub fn fill_colors(&mut self, color: [u8; 3]) {
        self.colors = Some(vec![color; self.points.len()]);
    }

    /// Apply a transformation to points and normals in place
    pub fn apply_transform(&mut self, transform: &Transform3D) {
        for p in &mut self.points {
            *p = transform.transform_point(p);
        }
        if let Some(normals) = &mut self.normals {
            for n in normals.iter_mut() {
                *n = transform.transform_normal(n);
            }
        }
    }

    /// Return a transformed copy
    pub fn transformed(&self, transform: &Transform3D) -> Self {
        let mut out = self.clone();
        out.apply_transform(transform);
        out
    }

    /// Append the points and cells of another data set.
    ///
    /// A point attribute survives only if both sides carry it. Appending a
    /// data set without points leaves `self` unchanged.
    pub fn append(&mut self, other: &PolyData) {
        if other.points.is_empty() {
            return;
        }
        let offset = self.points.len();
        let was_empty = self.points.is_empty();

        merge_attribute(&mut self.normals, &other.normals, was_empty);
        merge_attribute(&mut self.tcoords, &other.tcoords, was_empty);
        merge_attribute(&mut self.colors, &other.colors, was_empty);

        self.points.extend_from_slice(&other.points);
        self.lines.extend(
            other
                .lines
                .iter()
                .map(|cell| cell.iter().map(|id| id + offset).collect()),
        );
        self.polys.extend(
            other
                .polys
                .iter()
                .map(|cell| cell.iter().map(|id| id + offset).collect()),
        );
    }

    /// Interleaved vertices, falling back to white, a zero normal and zero
    /// texture coordinates for missing attributes
    pub fn vertex_buffer(&self) -> Vec<Vertex> {
        self.points
            .iter()
            .enumerate()
            .map(|(i, p)| {
                let normal = self
                    .normals
                    .as_ref()
                    .map(|n| [n[i].x, n[i].y, n[i].z])
                    .unwrap_or([0.0; 3]);
                let color = self
                    .colors
                    .as_ref()
                    .map(|c| {
                        [
                            c[i][0] as f32 / 255.0,
                            c[i][1] as f32 / 255.0,
                            c[i][2] as f32 / 255.0,
                        ]
                    })
                    .unwrap_or([1.0; 3]);
                let tex_coord = self.tcoords.as_ref().map(|t| t[i]).unwrap_or([0.0; 2]);
                Vertex {
                    position: [p.x, p.y, p.z],
                    normal,
                    color,
                    tex_coord,
                }
            })
            .collect()
    }

    /// Line-list indices: every polyline split into its segments
    pub fn line_indices(&self) -> Vec<u32> {
        self.lines
            .iter()
            .flat_map(|cell| cell.windows(2).flat_map(|w| [w[0] as u32, w[1] as u32]))
            .collect()
    }

    /// Triangle-list indices: every polygon fanned from its first point
    pub fn triangle_indices(&self) -> Vec<u32> {
        self.polys
            .iter()
            .filter(|cell| cell.len() >= 3)
            .flat_map(|cell| {
                (1..cell.len() - 1)
                    .flat_map(move |k| [cell[0] as u32, cell[k] as u32, cell[k + 1] as u32])
            })
            .collect()
    }
}

fn merge_attribute<T: Clone>(
    target: &mut Option<Vec<T>>,
    source: &Option<Vec<T>>,
    target_empty: bool,
) {
    match (target.as_mut(), source) {
        (Some(values), Some(more)) => values.extend_from_slice(more),
        (None, Some(more)) if target_empty => *target = Some(more.clone()),
        _ => *target = None,
    }
}
