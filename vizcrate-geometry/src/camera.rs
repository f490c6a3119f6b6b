//! Camera model and view frustum geometry
//!
//! Plane extraction and corner solving run in `f64`: with a near plane of
//! 0.01 the far plane row of an `f32` projection cancels for far distances
//! in the thousands.

use nalgebra::{Matrix3, Matrix4, Perspective3, Point3, Vector3, Vector4};
use serde::{Deserialize, Serialize};
use vizcrate_core::{Point3f, PolyData};

/// A plane `normal · x + d = 0`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Plane {
    pub normal: Vector3<f64>,
    pub d: f64,
}

impl Plane {
    pub fn new(normal: Vector3<f64>, d: f64) -> Self {
        Self { normal, d }
    }

    /// Signed distance of `point`, positive on the side the normal points to
    pub fn signed_distance(&self, point: &Point3<f64>) -> f64 {
        (self.normal.dot(&point.coords) + self.d) / self.normal.norm()
    }

    /// Common point of three planes, `None` if two of them are parallel
    pub fn intersect(a: &Plane, b: &Plane, c: &Plane) -> Option<Point3<f64>> {
        let m = Matrix3::from_rows(&[
            a.normal.transpose(),
            b.normal.transpose(),
            c.normal.transpose(),
        ]);
        let rhs = Vector3::new(-a.d, -b.d, -c.d);
        m.lu().solve(&rhs).map(Point3::from)
    }
}

/// The six bounding planes of a view volume, normals pointing inward
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Frustum {
    pub left: Plane,
    pub right: Plane,
    pub bottom: Plane,
    pub top: Plane,
    pub near: Plane,
    pub far: Plane,
}

impl Frustum {
    /// Extract the planes from a combined projection-view matrix
    pub fn from_matrix(m: &Matrix4<f64>) -> Self {
        let row = |i: usize| m.row(i).transpose();
        let plane = |v: Vector4<f64>| {
            let n = Vector3::new(v.x, v.y, v.z);
            let len = n.norm();
            Plane::new(n / len, v.w / len)
        };
        Self {
            left: plane(row(3) + row(0)),
            right: plane(row(3) - row(0)),
            bottom: plane(row(3) + row(1)),
            top: plane(row(3) - row(1)),
            near: plane(row(3) + row(2)),
            far: plane(row(3) - row(2)),
        }
    }

    pub fn planes(&self) -> [Plane; 6] {
        [self.left, self.right, self.bottom, self.top, self.near, self.far]
    }

    /// Whether `point` lies inside all six planes, with tolerance `eps`
    pub fn contains(&self, point: &Point3f, eps: f32) -> bool {
        let point = point.cast::<f64>();
        self.planes()
            .iter()
            .all(|p| p.signed_distance(&point) >= -f64::from(eps))
    }

    /// The 8 corners: near left-bottom, right-bottom, right-top, left-top,
    /// then the same order on the far plane
    pub fn corners(&self) -> Option<[Point3f; 8]> {
        let corner = |depth: &Plane, side: &Plane, vertical: &Plane| {
            Plane::intersect(depth, side, vertical).map(|p| p.cast::<f32>())
        };
        Some([
            corner(&self.near, &self.left, &self.bottom)?,
            corner(&self.near, &self.right, &self.bottom)?,
            corner(&self.near, &self.right, &self.top)?,
            corner(&self.near, &self.left, &self.top)?,
            corner(&self.far, &self.left, &self.bottom)?,
            corner(&self.far, &self.right, &self.bottom)?,
            corner(&self.far, &self.right, &self.top)?,
            corner(&self.far, &self.left, &self.top)?,
        ])
    }
}

/// Closed frustum surface: the 8 corners and 6 quads
pub fn frustum_source(frustum: &Frustum) -> PolyData {
    let Some(corners) = frustum.corners() else {
        tracing::warn!("frustum planes do not enclose a volume");
        return PolyData::new();
    };
    PolyData::from_polys(
        corners.to_vec(),
        vec![
            vec![0, 1, 2, 3],
            vec![4, 7, 6, 5],
            vec![0, 3, 7, 4],
            vec![1, 5, 6, 2],
            vec![0, 4, 5, 1],
            vec![3, 2, 6, 7],
        ],
    )
}

/// A 3D camera with a perspective projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub position: Point3<f32>,
    pub target: Point3<f32>,
    pub up: Vector3<f32>,
    /// Vertical field of view in radians
    pub fov: f32,
    pub aspect_ratio: f32,
    pub near: f32,
    pub far: f32,
}

impl Camera {
    /// Create a new camera
    pub fn new(
        position: Point3<f32>,
        target: Point3<f32>,
        up: Vector3<f32>,
        fov: f32,
        aspect_ratio: f32,
        near: f32,
        far: f32,
    ) -> Self {
        Self {
            position,
            target,
            up,
            fov,
            aspect_ratio,
            near,
            far,
        }
    }

    /// Camera at the origin looking along +Z with +Y up
    pub fn looking_forward(fov: f32, aspect_ratio: f32, near: f32, far: f32) -> Self {
        Self::new(
            Point3::origin(),
            Point3::new(0.0, 0.0, 1.0),
            Vector3::y(),
            fov,
            aspect_ratio,
            near,
            far,
        )
    }

    /// Camera at the origin looking along +Z whose frustum matches the
    /// intrinsic matrix `k` of an ideal pinhole camera (principal point at the
    /// image center): `fovy = 2 atan2(c_y, f_y)`, aspect ratio `f_y / f_x`
    pub fn from_intrinsics(k: &Matrix3<f32>, near: f32, far: f32) -> Self {
        let (f_x, f_y, c_y) = (k[(0, 0)], k[(1, 1)], k[(1, 2)]);
        let fovy = 2.0 * c_y.atan2(f_y);
        Self::looking_forward(fovy, f_y / f_x, near, far)
    }

    /// Get the view matrix
    pub fn view_matrix(&self) -> Matrix4<f64> {
        Matrix4::look_at_rh(
            &self.position.cast::<f64>(),
            &self.target.cast::<f64>(),
            &self.up.cast::<f64>(),
        )
    }

    /// Get the projection matrix
    pub fn projection_matrix(&self) -> Matrix4<f64> {
        let perspective = Perspective3::new(
            f64::from(self.aspect_ratio),
            f64::from(self.fov),
            f64::from(self.near),
            f64::from(self.far),
        );
        perspective.into_inner()
    }

    /// World-space view frustum
    pub fn frustum(&self) -> Frustum {
        Frustum::from_matrix(&(self.projection_matrix() * self.view_matrix()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_plane_intersection() {
        let p = Plane::intersect(
            &Plane::new(Vector3::x(), -1.0),
            &Plane::new(Vector3::y(), -2.0),
            &Plane::new(Vector3::z(), 3.0),
        )
        .unwrap();
        assert_relative_eq!(p, Point3::new(1.0, 2.0, -3.0), epsilon = 1e-12);

        let parallel = Plane::intersect(
            &Plane::new(Vector3::x(), 0.0),
            &Plane::new(Vector3::x(), 1.0),
            &Plane::new(Vector3::z(), 0.0),
        );
        assert!(parallel.is_none());
    }

    #[test]
    fn test_forward_frustum_corners() {
        let fov = std::f32::consts::FRAC_PI_2;
        let camera = Camera::looking_forward(fov, 1.0, 0.1, 2.0);
        let frustum = camera.frustum();
        let corners = frustum.corners().unwrap();

        for c in &corners[..4] {
            assert_relative_eq!(c.z, 0.1, epsilon = 1e-4);
            assert_relative_eq!(c.y.abs(), 0.1, epsilon = 1e-4);
            assert_relative_eq!(c.x.abs(), 0.1, epsilon = 1e-4);
        }
        for c in &corners[4..] {
            assert_relative_eq!(c.z, 2.0, epsilon = 1e-3);
            assert_relative_eq!(c.y.abs(), 2.0, epsilon = 1e-3);
        }

        // the view axis is inside, a point behind the camera is not
        assert!(frustum.contains(&Point3f::new(0.0, 0.0, 1.0), 1e-5));
        assert!(!frustum.contains(&Point3f::new(0.0, 0.0, -1.0), 1e-5));
    }

    #[test]
    fn test_from_intrinsics() {
        let k = Matrix3::new(500.0, 0.0, 320.0, 0.0, 500.0, 240.0, 0.0, 0.0, 1.0);
        let camera = Camera::from_intrinsics(&k, 0.01, 1.0);
        assert_relative_eq!(camera.fov, 2.0 * (240.0f32 / 500.0).atan(), epsilon = 1e-6);
        assert_relative_eq!(camera.aspect_ratio, 1.0);

        let corners = camera.frustum().corners().unwrap();
        // half height of the far plane is far * c_y / f_y
        assert_relative_eq!(corners[6].y.abs(), 240.0 / 500.0, epsilon = 1e-3);
    }

    #[test]
    fn test_distant_far_plane() {
        let k = Matrix3::new(500.0, 0.0, 320.0, 0.0, 500.0, 240.0, 0.0, 0.0, 1.0);
        for far in [1000.0f32, 10000.0] {
            let corners = Camera::from_intrinsics(&k, 0.01, far).frustum().corners().unwrap();
            for c in &corners[..4] {
                assert_relative_eq!(c.z, 0.01, max_relative = 1e-4);
            }
            for c in &corners[4..] {
                assert_relative_eq!(c.z, far, max_relative = 1e-5);
                assert_relative_eq!(c.y.abs(), far * 240.0 / 500.0, max_relative = 1e-5);
            }
        }
    }

    #[test]
    fn test_frustum_source() {
        let camera = Camera::looking_forward(1.0, 1.5, 0.5, 3.0);
        let data = frustum_source(&camera.frustum());
        assert_eq!(data.point_count(), 8);
        assert_eq!(data.poly_count(), 6);
    }
}
