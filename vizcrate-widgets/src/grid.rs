//! Planar grids

use tracing::{debug, instrument};
use vizcrate_core::{Color, Point3f};
use vizcrate_geometry::{extract_edges, structured_grid_source};

use crate::prop::Prop;
use crate::shapes::colored_actor;

/// A wire grid of `m x n` cells centered at the origin in the z = 0 plane
#[derive(Debug, Clone, PartialEq)]
pub struct GridWidget {
    pub(crate) prop: Prop,
}

impl GridWidget {
    #[instrument(level = "debug")]
    pub fn new(dimensions: (usize, usize), spacing: (f32, f32), color: Color) -> Self {
        let (m, n) = dimensions;
        let origin = Point3f::new(
            -(m as f32) * spacing.0 / 2.0,
            -(n as f32) * spacing.1 / 2.0,
            0.0,
        );
        let grid = structured_grid_source((m + 1, n + 1), spacing, origin);
        let geometry = extract_edges(&grid);
        debug!(edges = geometry.line_count(), "built grid");
        Self {
            prop: colored_actor(geometry, color),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widget::WidgetAccessor;
    use approx::assert_relative_eq;

    #[test]
    fn test_grid_extent_and_edges() {
        let grid = GridWidget::new((4, 2), (0.5, 2.0), Color::gray());
        let bounds = grid.bounds().unwrap();
        assert_relative_eq!(bounds.min.x, -1.0);
        assert_relative_eq!(bounds.max.x, 1.0);
        assert_relative_eq!(bounds.min.y, -2.0);
        assert_relative_eq!(bounds.max.y, 2.0);
        assert_relative_eq!(bounds.max.z, 0.0);

        // m(n+1) + n(m+1)
        let data = &grid.prop().as_actor().unwrap().geometry;
        assert_eq!(data.line_count(), 4 * 3 + 2 * 5);
        assert_eq!(data.point_count(), 15);
    }

    #[test]
    fn test_single_row_grid() {
        let grid = GridWidget::new((3, 0), (1.0, 1.0), Color::white());
        let data = &grid.prop().as_actor().unwrap().geometry;
        assert_eq!(data.line_count(), 3);
    }
}
