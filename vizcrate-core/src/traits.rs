//! Core traits for vizcrate

use crate::{point::*, poly_data::*, transform::Transform3D};

/// Objects with a spatial extent
pub trait Drawable {
    /// Get the bounding box of the object
    fn bounding_box(&self) -> Option<Bounds>;

    /// Get the center point of the object
    fn center(&self) -> Option<Point3f> {
        self.bounding_box().map(|b| b.center())
    }
}

/// Trait for objects that can be transformed
pub trait Transformable {
    /// Apply a transformation to the object
    fn transform(&mut self, transform: &Transform3D);
}

impl Drawable for PolyData {
    fn bounding_box(&self) -> Option<Bounds> {
        self.bounds()
    }
}

impl Transformable for PolyData {
    fn transform(&mut self, transform: &Transform3D) {
        self.apply_transform(transform);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Vector3;

    #[test]
    fn test_center_follows_transform() {
        let mut data = PolyData::from_lines(
            vec![Point3f::new(0.0, 0.0, 0.0), Point3f::new(2.0, 2.0, 0.0)],
            vec![vec![0, 1]],
        );
        assert_eq!(data.center(), Some(Point3f::new(1.0, 1.0, 0.0)));
        data.transform(&Transform3D::translation(Vector3::new(0.0, 0.0, 1.0)));
        assert_eq!(data.center(), Some(Point3f::new(1.0, 1.0, 1.0)));
        assert!(PolyData::new().center().is_none());
    }
}
