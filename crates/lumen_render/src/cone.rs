//! Cone primitive.
//!
//! A unit cone in local space: side surface x^2 + z^2 = y^2 for
//! 0 <= y <= 1, closed by a disc cap of radius 1 at y = 1. Apex at the
//! origin, opening upward; placement comes from the transform.

use lumen_math::{Interval, Mat4, Ray, Transform, Vec2, Vec3};

use crate::hit::{HitRecord, Hittable};
use crate::shading::tangent_basis;
use crate::Material;

/// A transformed unit cone with a capped base.
pub struct Cone {
    transform: Transform,
    material: Material,
}

impl Cone {
    /// Create a unit cone at the origin.
    pub fn new(material: Material) -> Self {
        Self {
            transform: Transform::default(),
            material,
        }
    }

    /// Set the local-to-world transform.
    pub fn with_transform(mut self, matrix: Mat4) -> Self {
        self.transform = Transform::new(matrix);
        self
    }
}

impl Hittable for Cone {
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval, rec: &mut HitRecord<'a>) -> bool {
        let local = self.transform.to_local_ray(ray);
        let o = local.origin;
        let d = local.direction;

        // Quadratic for x^2 + z^2 - y^2 = 0 along o + t*d.
        let a = d.x * d.x + d.z * d.z - d.y * d.y;
        let b = 2.0 * (o.x * d.x + o.z * d.z - o.y * d.y);
        let c = o.x * o.x + o.z * o.z - o.y * o.y;

        let delta = b * b - 4.0 * a * c;
        if delta < 0.0 {
            return false;
        }
        let sq = delta.sqrt();

        // Nearest root whose height lies on the cone body.
        let mut t = (-b - sq) / (2.0 * a);
        let mut local_p = local.at(t);
        if t < 0.0 || local_p.y < 0.0 || local_p.y > 1.0 {
            t = (-b + sq) / (2.0 * a);
            local_p = local.at(t);
            if t < 0.0 || local_p.y < 0.0 || local_p.y > 1.0 {
                return false;
            }
        }

        let mut local_n = Vec3::new(local_p.x, -local_p.y, local_p.z).normalize();

        // The disc cap at y = 1 wins when it is closer and within radius.
        if d.y != 0.0 {
            let t_cap = (1.0 - o.y) / d.y;
            if t_cap >= 0.0 && t_cap < t {
                let p_cap = local.at(t_cap);
                if (p_cap - Vec3::Y).length() <= 1.0 {
                    local_p = p_cap;
                    local_n = Vec3::Y;
                }
            }
        }

        let p = self.transform.point_to_world(local_p);
        let distance = ray.origin.distance(p);
        if !ray_t.surrounds(distance) {
            return false;
        }

        let normal = self.transform.normal_to_world(local_n);
        let (tangent, bitangent) = tangent_basis(normal);

        rec.t = distance;
        rec.p = p;
        rec.normal = normal;
        rec.shading_normal = normal;
        rec.tangent = tangent;
        rec.bitangent = bitangent;
        rec.uv = Vec2::ZERO;
        rec.material = Some(&self.material);

        true
    }
}
