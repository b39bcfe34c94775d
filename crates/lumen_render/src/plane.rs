//! Infinite plane primitive.

use lumen_math::{Interval, Ray, Vec2, Vec3};

use crate::hit::{HitRecord, Hittable};
use crate::Material;

/// An infinite plane given by a point and a unit normal, in world space.
pub struct Plane {
    point: Vec3,
    normal: Vec3,
    material: Material,
}

impl Plane {
    /// Create a plane through `point` with the given normal.
    pub fn new(point: Vec3, normal: Vec3, material: Material) -> Self {
        Self {
            point,
            normal: normal.normalize(),
            material,
        }
    }
}

impl Hittable for Plane {
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval, rec: &mut HitRecord<'a>) -> bool {
        let denom = ray.direction.dot(self.normal);
        if denom == 0.0 {
            // Ray parallel to the plane
            return false;
        }

        let t = (self.point - ray.origin).dot(self.normal) / denom;
        if t < 0.0 || !ray_t.surrounds(t) {
            return false;
        }

        let p = ray.at(t);
        let uv = Vec2::new(0.1 * p.x, 0.1 * p.z);

        // Planar tiling uses a fixed tangent frame.
        let tangent = Vec3::Z;
        let bitangent = Vec3::X;

        rec.t = t;
        rec.p = p;
        rec.normal = self.normal;
        rec.shading_normal = match &self.material.normal_map {
            Some(map) => {
                let sample = map(uv).normalize();
                (tangent * sample.x + bitangent * sample.y + self.normal * sample.z).normalize()
            }
            None => self.normal,
        };
        rec.tangent = tangent;
        rec.bitangent = bitangent;
        rec.uv = uv;
        rec.material = Some(&self.material);

        true
    }
}
