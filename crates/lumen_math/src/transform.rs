use crate::{Mat4, Ray, Vec3};

/// Local/world affine transform for primitives that intersect in local space.
///
/// Carries the forward matrix, its inverse (for moving rays into local
/// space) and the normal matrix (inverse transpose, for moving normals back
/// out without shear distortion).
#[derive(Debug, Copy, Clone)]
pub struct Transform {
    pub matrix: Mat4,
    pub inverse: Mat4,
    pub normal: Mat4,
}

impl Transform {
    /// Create a transform from a local-to-world matrix.
    pub fn new(matrix: Mat4) -> Self {
        let inverse = matrix.inverse();
        Self {
            matrix,
            inverse,
            normal: inverse.transpose(),
        }
    }

    /// Map a world-space ray into local space.
    ///
    /// The origin transforms as a point, the direction as a vector and is
    /// renormalized so local hit parameters stay metric.
    pub fn to_local_ray(&self, ray: &Ray) -> Ray {
        Ray::new(
            self.inverse.transform_point3(ray.origin),
            self.inverse.transform_vector3(ray.direction).normalize(),
        )
    }

    /// Map a local-space point into world space.
    pub fn point_to_world(&self, point: Vec3) -> Vec3 {
        self.matrix.transform_point3(point)
    }

    /// Map a local-space normal into world space (normal matrix, renormalized).
    pub fn normal_to_world(&self, normal: Vec3) -> Vec3 {
        self.normal.transform_vector3(normal).normalize()
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::new(Mat4::IDENTITY)
    }
}
