//! 3D transformation utilities

use nalgebra::{Matrix3, Matrix4, Point3, UnitQuaternion, Vector3};
use serde::{Deserialize, Serialize};

/// A 3D affine transformation applied to points, poly data and widget poses
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform3D {
    pub matrix: Matrix4<f32>,
}

impl Transform3D {
    /// Create an identity transformation
    pub fn identity() -> Self {
        Self {
            matrix: Matrix4::identity(),
        }
    }

    /// Create a translation transformation
    pub fn translation(translation: Vector3<f32>) -> Self {
        Self {
            matrix: Matrix4::new_translation(&translation),
        }
    }

    /// Create a rotation transformation from a quaternion
    pub fn rotation(rotation: UnitQuaternion<f32>) -> Self {
        Self {
            matrix: rotation.to_homogeneous(),
        }
    }

    /// Create a scaling transformation
    pub fn scaling(scale: Vector3<f32>) -> Self {
        Self {
            matrix: Matrix4::new_nonuniform_scaling(&scale),
        }
    }

    /// Create a uniform scaling transformation
    pub fn uniform_scaling(scale: f32) -> Self {
        Self {
            matrix: Matrix4::new_scaling(scale),
        }
    }

    /// Create a transformation from translation and rotation
    pub fn from_translation_rotation(
        translation: Vector3<f32>,
        rotation: UnitQuaternion<f32>,
    ) -> Self {
        Self::translation(translation).compose(Self::rotation(rotation))
    }

    /// Create a transformation whose linear part has the given columns,
    /// followed by a translation
    pub fn from_basis(
        x_axis: Vector3<f32>,
        y_axis: Vector3<f32>,
        z_axis: Vector3<f32>,
        translation: Vector3<f32>,
    ) -> Self {
        let linear = Matrix3::from_columns(&[x_axis, y_axis, z_axis]);
        let mut matrix = linear.to_homogeneous();
        matrix.fixed_view_mut::<3, 1>(0, 3).copy_from(&translation);
        Self { matrix }
    }

    /// Pose of a frame placed at `position` whose local +Z points along
    /// `forward` and whose local +Y is the component of `up` orthogonal to it.
    ///
    /// The basis is built by Gram-Schmidt: `n = normalize(forward)`,
    /// `u = normalize(up × n)`, `v = n × u`. The rows `[u; v; n]` form the
    /// world-to-frame rotation; its transpose (the columns `u, v, n`) places
    /// the frame in the world.
    pub fn from_forward_up(
        position: Vector3<f32>,
        forward: Vector3<f32>,
        up: Vector3<f32>,
    ) -> Self {
        let n = forward.normalize();
        let u = up.cross(&n).normalize();
        let v = n.cross(&u);
        Self::from_basis(u, v, n, position)
    }

    /// Scale by `scale` keeping `pivot` fixed
    pub fn scaling_about(pivot: &Point3<f32>, scale: Vector3<f32>) -> Self {
        Self::translation(pivot.coords)
            .compose(Self::scaling(scale))
            .compose(Self::translation(-pivot.coords))
    }

    /// Apply the transformation to a point
    pub fn transform_point(&self, point: &Point3<f32>) -> Point3<f32> {
        let homogeneous = self.matrix * point.to_homogeneous();
        Point3::from_homogeneous(homogeneous).unwrap_or(*point)
    }

    /// Apply the transformation to a vector
    pub fn transform_vector(&self, vector: &Vector3<f32>) -> Vector3<f32> {
        self.matrix.fixed_view::<3, 3>(0, 0) * vector
    }

    /// Transform a surface normal with the inverse transpose of the linear part
    pub fn transform_normal(&self, normal: &Vector3<f32>) -> Vector3<f32> {
        let linear: Matrix3<f32> = self.matrix.fixed_view::<3, 3>(0, 0).clone_owned();
        let mapped = match linear.try_inverse() {
            Some(inverse) => inverse.transpose() * normal,
            None => linear * normal,
        };
        mapped.try_normalize(f32::EPSILON).unwrap_or(mapped)
    }

    /// Translation part of the transformation
    pub fn translation_part(&self) -> Vector3<f32> {
        self.matrix.fixed_view::<3, 1>(0, 3).clone_owned()
    }

    /// Compose this transformation with another
    pub fn compose(self, other: Self) -> Self {
        Self {
            matrix: self.matrix * other.matrix,
        }
    }
}

impl Default for Transform3D {
    fn default() -> Self {
        Self::identity()
    }
}

impl std::ops::Mul for Transform3D {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        self.compose(rhs)
    }
}

impl std::ops::Mul<Point3<f32>> for Transform3D {
    type Output = Point3<f32>;

    fn mul(self, rhs: Point3<f32>) -> Self::Output {
        self.transform_point(&rhs)
    }
}

impl From<Matrix4<f32>> for Transform3D {
    fn from(matrix: Matrix4<f32>) -> Self {
        Self { matrix }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_scaling_about_keeps_pivot() {
        let pivot = Point3::new(1.0, 2.0, 3.0);
        let t = Transform3D::scaling_about(&pivot, Vector3::new(2.0, 2.0, 2.0));
        assert_relative_eq!(t.transform_point(&pivot), pivot, epsilon = 1e-6);
        assert_relative_eq!(
            t.transform_point(&Point3::new(2.0, 2.0, 3.0)),
            Point3::new(3.0, 2.0, 3.0),
            epsilon = 1e-6
        );
    }

    #[test]
    fn test_forward_up_is_orthonormal() {
        let t = Transform3D::from_forward_up(
            Vector3::new(1.0, 2.0, 3.0),
            Vector3::new(0.0, 0.0, -2.0),
            Vector3::new(0.0, 1.0, 0.3),
        );
        let r: Matrix3<f32> = t.matrix.fixed_view::<3, 3>(0, 0).clone_owned();
        assert_relative_eq!(r.transpose() * r, Matrix3::identity(), epsilon = 1e-5);
        assert_relative_eq!(r.determinant(), 1.0, epsilon = 1e-5);
        // local +Z looks along forward
        assert_relative_eq!(
            t.transform_vector(&Vector3::z()),
            Vector3::new(0.0, 0.0, -1.0),
            epsilon = 1e-6
        );
        assert_relative_eq!(t.translation_part(), Vector3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_compose_order() {
        let translate = Transform3D::translation(Vector3::new(1.0, 0.0, 0.0));
        let scale = Transform3D::uniform_scaling(2.0);
        let p = Point3::new(1.0, 1.0, 1.0);
        assert_relative_eq!((translate * scale) * p, Point3::new(3.0, 2.0, 2.0));
        assert_relative_eq!((scale * translate) * p, Point3::new(4.0, 2.0, 2.0));
    }

    #[test]
    fn test_transform_normal_under_nonuniform_scale() {
        let t = Transform3D::scaling(Vector3::new(2.0, 1.0, 1.0));
        let n = t.transform_normal(&Vector3::new(1.0, 1.0, 0.0).normalize());
        assert_relative_eq!(n.norm(), 1.0, epsilon = 1e-6);
        assert!(n.y > n.x);
    }
}
