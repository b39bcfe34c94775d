//! Triangle primitive.
//!
//! Triangles live in world space and only exist inside meshes, so they
//! carry no material or transform; the owning mesh stamps its material
//! onto the record after the closest triangle is found.

use lumen_math::{Interval, Ray, Vec2, Vec3};

use crate::hit::HitRecord;
use crate::shading::tangent_basis;

/// A world-space triangle with optional per-vertex normals and UVs.
#[derive(Clone, Debug)]
pub struct Triangle {
    vertices: [Vec3; 3],
    vertex_normals: Option<[Vec3; 3]>,
    vertex_uvs: Option<[Vec2; 3]>,
    /// Precomputed face normal; zero when the triangle is degenerate
    normal: Vec3,
}

impl Triangle {
    /// Create a triangle from three vertices.
    pub fn new(a: Vec3, b: Vec3, c: Vec3) -> Self {
        Self {
            vertices: [a, b, c],
            vertex_normals: None,
            vertex_uvs: None,
            normal: (b - a).cross(c - a).normalize_or_zero(),
        }
    }

    /// Attach per-vertex normals for smooth shading.
    pub fn with_vertex_normals(mut self, normals: [Vec3; 3]) -> Self {
        self.vertex_normals = Some(normals);
        self
    }

    /// Attach per-vertex texture coordinates.
    pub fn with_uvs(mut self, uvs: [Vec2; 3]) -> Self {
        self.vertex_uvs = Some(uvs);
        self
    }

    /// Vertex positions (used for BVH bounds and splitting).
    pub fn vertices(&self) -> &[Vec3; 3] {
        &self.vertices
    }

    /// Intersect a ray with this triangle.
    ///
    /// Fills every record field except the material. A degenerate triangle
    /// (zero-area, no face normal) never hits.
    pub fn hit(&self, ray: &Ray, ray_t: Interval, rec: &mut HitRecord<'_>) -> bool {
        if self.normal == Vec3::ZERO {
            return false;
        }

        let denom = ray.direction.dot(self.normal);
        if denom == 0.0 {
            // Ray parallel to the triangle plane
            return false;
        }

        let [a, b, c] = self.vertices;
        let t = (a - ray.origin).dot(self.normal) / denom;
        if t < 0.0 || !ray_t.surrounds(t) {
            return false;
        }

        let p = ray.at(t);

        // Edge cross products; the point is inside when all three agree
        // with the face normal.
        let w0 = (b - p).cross(c - p);
        let w1 = (c - p).cross(a - p);
        let w2 = (a - p).cross(b - p);

        let d0 = self.normal.dot(w0);
        let d1 = self.normal.dot(w1);
        let d2 = self.normal.dot(w2);
        if d0 < 0.0 || d1 < 0.0 || d2 < 0.0 {
            return false;
        }

        // Signed edge areas double as barycentric weights.
        let a0 = 0.5 * w0.length() * d0.signum();
        let a1 = 0.5 * w1.length() * d1.signum();
        let a2 = 0.5 * w2.length() * d2.signum();
        let total = a0 + a1 + a2;

        let shading_normal = match self.vertex_normals {
            Some([na, nb, nc]) => {
                ((a0 / total) * na + (a1 / total) * nb + (a2 / total) * nc).normalize()
            }
            None => self.normal,
        };

        rec.uv = match self.vertex_uvs {
            Some([ta, tb, tc]) => (a0 / total) * ta + (a1 / total) * tb + (a2 / total) * tc,
            None => Vec2::ZERO,
        };

        rec.t = t;
        rec.p = p;
        rec.normal = self.normal;
        rec.shading_normal = shading_normal;
        let (tangent, bitangent) = tangent_basis(shading_normal);
        rec.tangent = tangent;
        rec.bitangent = bitangent;

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_interval() -> Interval {
        Interval::new(0.0, f32::INFINITY)
    }

    #[test]
    fn test_hit_through_center() {
        let tri = Triangle::new(
            Vec3::new(-1.0, -1.0, 2.0),
            Vec3::new(1.0, -1.0, 2.0),
            Vec3::new(0.0, 1.0, 2.0),
        );

        let ray = Ray::new(Vec3::ZERO, Vec3::Z);
        let mut rec = HitRecord::default();

        assert!(tri.hit(&ray, unit_interval(), &mut rec));
        assert!((rec.t - 2.0).abs() < 1e-5);
        assert!((rec.p - Vec3::new(0.0, 0.0, 2.0)).length() < 1e-5);
        assert!((rec.normal.length() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_miss_outside_edges() {
        let tri = Triangle::new(
            Vec3::new(-1.0, -1.0, 2.0),
            Vec3::new(1.0, -1.0, 2.0),
            Vec3::new(0.0, 1.0, 2.0),
        );

        let ray = Ray::new(Vec3::new(2.0, 0.0, 0.0), Vec3::Z);
        let mut rec = HitRecord::default();
        assert!(!tri.hit(&ray, unit_interval(), &mut rec));
    }

    #[test]
    fn test_parallel_ray_misses() {
        let tri = Triangle::new(
            Vec3::new(-1.0, -1.0, 2.0),
            Vec3::new(1.0, -1.0, 2.0),
            Vec3::new(0.0, 1.0, 2.0),
        );

        // Ray in the z=0 plane, parallel to the triangle's plane
        let ray = Ray::new(Vec3::ZERO, Vec3::X);
        let mut rec = HitRecord::default();
        assert!(!tri.hit(&ray, unit_interval(), &mut rec));
    }

    #[test]
    fn test_behind_origin_misses() {
        let tri = Triangle::new(
            Vec3::new(-1.0, -1.0, -2.0),
            Vec3::new(1.0, -1.0, -2.0),
            Vec3::new(0.0, 1.0, -2.0),
        );

        let ray = Ray::new(Vec3::ZERO, Vec3::Z);
        let mut rec = HitRecord::default();
        assert!(!tri.hit(&ray, unit_interval(), &mut rec));
    }

    #[test]
    fn test_degenerate_triangle_never_hits() {
        let tri = Triangle::new(Vec3::ZERO, Vec3::X, Vec3::X * 2.0);

        let ray = Ray::new(Vec3::new(0.5, 0.0, -1.0), Vec3::Z);
        let mut rec = HitRecord::default();
        assert!(!tri.hit(&ray, unit_interval(), &mut rec));
    }

    #[test]
    fn test_interpolated_normals() {
        let tri = Triangle::new(
            Vec3::new(-1.0, -1.0, 2.0),
            Vec3::new(1.0, -1.0, 2.0),
            Vec3::new(0.0, 1.0, 2.0),
        )
        .with_vertex_normals([
            Vec3::new(-1.0, 0.0, -1.0).normalize(),
            Vec3::new(1.0, 0.0, -1.0).normalize(),
            Vec3::new(0.0, 1.0, -1.0).normalize(),
        ]);

        // Hitting vertex A's corner leans the normal toward A's normal
        let ray = Ray::new(Vec3::new(-0.9, -0.9, 0.0), Vec3::Z);
        let mut rec = HitRecord::default();
        assert!(tri.hit(&ray, unit_interval(), &mut rec));
        assert!(rec.shading_normal.x < -0.5);
        assert!((rec.shading_normal.length() - 1.0).abs() < 1e-4);

        // Geometric normal stays the face normal
        assert!(rec.normal.x.abs() < 1e-5);
    }

    #[test]
    fn test_interpolated_uvs() {
        let tri = Triangle::new(
            Vec3::new(-1.0, -1.0, 2.0),
            Vec3::new(1.0, -1.0, 2.0),
            Vec3::new(0.0, 1.0, 2.0),
        )
        .with_uvs([
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(0.5, 1.0),
        ]);

        // The centroid maps to the UV centroid
        let centroid = (Vec3::new(-1.0, -1.0, 2.0)
            + Vec3::new(1.0, -1.0, 2.0)
            + Vec3::new(0.0, 1.0, 2.0))
            / 3.0;
        let ray = Ray::new(Vec3::new(centroid.x, centroid.y, 0.0), Vec3::Z);
        let mut rec = HitRecord::default();
        assert!(tri.hit(&ray, unit_interval(), &mut rec));
        assert!((rec.uv - Vec2::new(0.5, 1.0 / 3.0)).length() < 1e-4);
    }

    #[test]
    fn test_point_matches_distance() {
        let tri = Triangle::new(
            Vec3::new(-1.0, -1.0, 3.0),
            Vec3::new(1.0, -1.0, 3.0),
            Vec3::new(0.0, 1.0, 3.0),
        );

        let origin = Vec3::new(0.1, -0.2, 0.0);
        let dir = (Vec3::new(0.0, 0.0, 3.0) - origin).normalize();
        let ray = Ray::new(origin, dir);
        let mut rec = HitRecord::default();
        assert!(tri.hit(&ray, unit_interval(), &mut rec));
        assert!((rec.p - ray.at(rec.t)).length() < 1e-3);
    }
}
