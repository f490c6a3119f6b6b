//! Scene export: Wavefront OBJ geometry and a JSON summary

use serde::Serialize;
use std::io::Write;
use vizcrate_core::{Bounds, PolyData, Result};
use vizcrate_widgets::{Widget, WidgetAccessor};

/// Per-widget line of the scene summary
#[derive(Debug, Clone, Serialize)]
pub struct WidgetSummary {
    pub kind: &'static str,
    pub prop: &'static str,
    pub points: usize,
    pub lines: usize,
    pub polys: usize,
    pub bounds: Option<Bounds>,
}

impl WidgetSummary {
    pub fn new(widget: &Widget) -> Self {
        let geometry = widget.world_geometry().unwrap_or_default();
        Self {
            kind: widget.kind().name(),
            prop: widget.prop().type_name(),
            points: geometry.point_count(),
            lines: geometry.line_count(),
            polys: geometry.poly_count(),
            bounds: widget.bounds(),
        }
    }
}

/// Bounding box of every 3D widget in the scene
pub fn scene_bounds(widgets: &[Widget]) -> Option<Bounds> {
    widgets
        .iter()
        .filter_map(|widget| widget.bounds())
        .reduce(|acc, bounds| acc.merge(&bounds))
}

/// Write the world geometry of every 3D widget as one OBJ object per widget.
///
/// Line cells become `l` records and polygons `f` records; indices are
/// 1-based and global across objects. Normals and texture coordinates are
/// written when present.
pub fn write_obj<W: Write>(writer: &mut W, widgets: &[Widget]) -> Result<()> {
    writeln!(writer, "# vizcrate scene, {} widgets", widgets.len())?;
    let mut offset = 1usize;
    let mut normal_offset = 1usize;
    let mut tcoord_offset = 1usize;

    for (index, widget) in widgets.iter().enumerate() {
        let Some(geometry) = widget.world_geometry() else {
            continue;
        };
        if geometry.is_empty() {
            continue;
        }
        writeln!(writer, "o {}_{}", widget.kind().name(), index)?;
        write_geometry(writer, &geometry, offset, normal_offset, tcoord_offset)?;

        offset += geometry.point_count();
        if geometry.normals.is_some() {
            normal_offset += geometry.point_count();
        }
        if geometry.tcoords.is_some() {
            tcoord_offset += geometry.point_count();
        }
    }
    Ok(())
}

fn write_geometry<W: Write>(
    writer: &mut W,
    geometry: &PolyData,
    offset: usize,
    normal_offset: usize,
    tcoord_offset: usize,
) -> Result<()> {
    for p in &geometry.points {
        writeln!(writer, "v {} {} {}", p.x, p.y, p.z)?;
    }
    if let Some(tcoords) = &geometry.tcoords {
        for t in tcoords {
            writeln!(writer, "vt {} {}", t[0], t[1])?;
        }
    }
    if let Some(normals) = &geometry.normals {
        for n in normals {
            writeln!(writer, "vn {} {} {}", n.x, n.y, n.z)?;
        }
    }

    for cell in &geometry.lines {
        write!(writer, "l")?;
        for id in cell {
            write!(writer, " {}", id + offset)?;
        }
        writeln!(writer)?;
    }

    let has_normals = geometry.normals.is_some();
    let has_tcoords = geometry.tcoords.is_some();
    for cell in &geometry.polys {
        write!(writer, "f")?;
        for &id in cell {
            let v = id + offset;
            match (has_tcoords, has_normals) {
                (true, true) => {
                    write!(writer, " {}/{}/{}", v, id + tcoord_offset, id + normal_offset)?
                }
                (true, false) => write!(writer, " {}/{}", v, id + tcoord_offset)?,
                (false, true) => write!(writer, " {}//{}", v, id + normal_offset)?,
                (false, false) => write!(writer, " {}", v)?,
            }
        }
        writeln!(writer)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use vizcrate_core::{Color, Point2i, Point3f};
    use vizcrate_widgets::{CubeWidget, LineWidget, SphereWidget, TextWidget};

    fn export(widgets: &[Widget]) -> String {
        let mut out = Vec::new();
        write_obj(&mut out, widgets).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_obj_indices_are_global() {
        let widgets: Vec<Widget> = vec![
            LineWidget::new(Point3f::origin(), Point3f::new(1.0, 0.0, 0.0), Color::red()).into(),
            LineWidget::new(Point3f::origin(), Point3f::new(0.0, 1.0, 0.0), Color::red()).into(),
        ];
        let obj = export(&widgets);
        let lines: Vec<&str> = obj.lines().filter(|l| l.starts_with("l ")).collect();
        assert_eq!(lines, vec!["l 1 2", "l 3 4"]);
        assert_eq!(obj.lines().filter(|l| l.starts_with("o ")).count(), 2);
    }

    #[test]
    fn test_obj_skips_overlays_and_writes_faces() {
        let widgets: Vec<Widget> = vec![
            TextWidget::new("hud", Point2i::new(0, 0), 10, Color::white()).into(),
            CubeWidget::new(Point3f::origin(), Point3f::new(1.0, 1.0, 1.0), false, Color::white())
                .into(),
        ];
        let obj = export(&widgets);
        assert!(!obj.contains("TextWidget"));
        assert_eq!(obj.lines().filter(|l| l.starts_with("v ")).count(), 24);
        assert_eq!(obj.lines().filter(|l| l.starts_with("f ")).count(), 6);
        assert!(obj.contains("f 1/1/1 "));
    }

    #[test]
    fn test_scene_bounds_merge_widgets() {
        let widgets: Vec<Widget> = vec![
            SphereWidget::new(Point3f::origin(), 1.0, 8, Color::white()).into(),
            TextWidget::new("hud", Point2i::new(0, 0), 10, Color::white()).into(),
            LineWidget::new(Point3f::new(2.0, 0.0, 0.0), Point3f::new(3.0, 4.0, 0.5), Color::red())
                .into(),
        ];
        let bounds = scene_bounds(&widgets).unwrap();
        assert_eq!(bounds.max, Point3f::new(3.0, 4.0, 1.0));
        assert!(bounds.min.x <= -0.9 && bounds.min.z <= -0.99);
        assert!(scene_bounds(&widgets[1..2]).is_none());
    }

    #[test]
    fn test_summary() {
        let sphere: Widget = SphereWidget::new(Point3f::origin(), 1.0, 8, Color::white()).into();
        let summary = WidgetSummary::new(&sphere);
        assert_eq!(summary.kind, "SphereWidget");
        assert_eq!(summary.prop, "Actor");
        assert!(summary.polys > 0);
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["kind"], "SphereWidget");
    }
}
