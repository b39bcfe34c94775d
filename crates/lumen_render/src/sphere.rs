//! Sphere primitive.
//!
//! A unit sphere at the local origin; size and placement come from the
//! local-to-world transform. Intersection happens in local space and the
//! hit is mapped back out, with the distance recomputed in world units.

use std::f32::consts::{FRAC_PI_2, PI};

use lumen_math::{Interval, Mat4, Ray, Transform, Vec2, Vec3};

use crate::hit::{HitRecord, Hittable};
use crate::shading::tangent_basis;
use crate::Material;

/// A transformed unit sphere.
pub struct Sphere {
    transform: Transform,
    material: Material,
}

impl Sphere {
    /// Create a unit sphere at the origin.
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

    /// Spherical UV from the local-space normal.
    fn sphere_uv(n: Vec3) -> Vec2 {
        Vec2::new(
            (n.y.asin() + FRAC_PI_2) / PI,
            (n.z.atan2(n.x) + PI) / (2.0 * PI),
        )
    }
}

impl Hittable for Sphere {
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval, rec: &mut HitRecord<'a>) -> bool {
        let local = self.transform.to_local_ray(ray);

        // Unit sphere at the origin: |o + t*d|^2 = 1 with |d| = 1.
        let oc = -local.origin;
        let h = local.direction.dot(oc);
        let c = oc.length_squared() - 1.0;

        let discriminant = h * h - c;
        if discriminant < 0.0 {
            return false;
        }
        let sqrtd = discriminant.sqrt();

        // Smaller non-negative root
        let near = h - sqrtd;
        let t = if near < 0.0 { h + sqrtd } else { near };
        if t < 0.0 {
            return false;
        }

        let local_p = local.at(t);
        let local_n = local_p.normalize();

        let p = self.transform.point_to_world(local_p);
        let distance = ray.origin.distance(p);
        if !ray_t.surrounds(distance) {
            return false;
        }

        let normal = self.transform.normal_to_world(local_n);
        let uv = Self::sphere_uv(local_n);

        // Tangent frame: longitude direction, degenerate at the poles.
        let raw_tangent = Vec3::Y.cross(p);
        let (tangent, bitangent) = if raw_tangent.length_squared() > 1e-8 {
            let tangent = raw_tangent.normalize();
            (tangent, normal.cross(tangent))
        } else {
            tangent_basis(normal)
        };

        rec.t = distance;
        rec.p = p;
        rec.normal = normal;
        rec.shading_normal = match &self.material.normal_map {
            Some(map) => {
                let sample = map(uv).normalize();
                (tangent * sample.x + bitangent * sample.y + normal * sample.z).normalize()
            }
            None => normal,
        };
        rec.tangent = tangent;
        rec.bitangent = bitangent;
        rec.uv = uv;
        rec.material = Some(&self.material);

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::procedural_map;

    fn open_interval() -> Interval {
        Interval::new(0.0, f32::INFINITY)
    }

    #[test]
    fn test_head_on_hit() {
        let sphere = Sphere::new(Material::default())
            .with_transform(Mat4::from_translation(Vec3::new(0.0, 0.0, 5.0)));

        let ray = Ray::new(Vec3::ZERO, Vec3::Z);
        let mut rec = HitRecord::default();

        assert!(sphere.hit(&ray, open_interval(), &mut rec));
        assert!((rec.t - 4.0).abs() < 1e-4);
        assert!((rec.p - Vec3::new(0.0, 0.0, 4.0)).length() < 1e-4);
        assert!((rec.normal - Vec3::new(0.0, 0.0, -1.0)).length() < 1e-4);
        assert!(rec.material.is_some());
    }

    #[test]
    fn test_miss() {
        let sphere = Sphere::new(Material::default())
            .with_transform(Mat4::from_translation(Vec3::new(0.0, 0.0, 5.0)));

        let ray = Ray::new(Vec3::ZERO, Vec3::Y);
        let mut rec = HitRecord::default();
        assert!(!sphere.hit(&ray, open_interval(), &mut rec));
    }

    #[test]
    fn test_behind_origin_misses() {
        let sphere = Sphere::new(Material::default())
            .with_transform(Mat4::from_translation(Vec3::new(0.0, 0.0, -5.0)));

        let ray = Ray::new(Vec3::ZERO, Vec3::Z);
        let mut rec = HitRecord::default();
        assert!(!sphere.hit(&ray, open_interval(), &mut rec));
    }

    #[test]
    fn test_scaled_sphere_distance_is_world_space() {
        // Radius-2 sphere at z = 10: front surface at z = 8.
        let sphere = Sphere::new(Material::default()).with_transform(
            Mat4::from_translation(Vec3::new(0.0, 0.0, 10.0)) * Mat4::from_scale(Vec3::splat(2.0)),
        );

        let ray = Ray::new(Vec3::ZERO, Vec3::Z);
        let mut rec = HitRecord::default();
        assert!(sphere.hit(&ray, open_interval(), &mut rec));
        assert!((rec.t - 8.0).abs() < 1e-3);
        assert!((rec.p - ray.at(rec.t)).length() < 1e-3);
    }

    #[test]
    fn test_nonuniform_scale_keeps_normal_unit() {
        let sphere = Sphere::new(Material::default()).with_transform(
            Mat4::from_translation(Vec3::new(0.0, 0.0, 5.0))
                * Mat4::from_scale(Vec3::new(2.0, 1.0, 0.5)),
        );

        let ray = Ray::new(Vec3::new(0.3, 0.2, 0.0), Vec3::Z);
        let mut rec = HitRecord::default();
        assert!(sphere.hit(&ray, open_interval(), &mut rec));
        assert!((rec.normal.length() - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_inside_hit_returns_far_surface() {
        let sphere = Sphere::new(Material::default());

        let ray = Ray::new(Vec3::ZERO, Vec3::Z);
        let mut rec = HitRecord::default();
        assert!(sphere.hit(&ray, open_interval(), &mut rec));
        assert!((rec.t - 1.0).abs() < 1e-4);
        // Outward normal at the exit point
        assert!((rec.normal - Vec3::Z).length() < 1e-4);
    }

    #[test]
    fn test_tangential_graze() {
        // Ray grazing the unit sphere at y = 1
        let sphere = Sphere::new(Material::default());
        let ray = Ray::new(Vec3::new(-5.0, 1.0, 0.0), Vec3::X);

        let mut rec = HitRecord::default();
        if sphere.hit(&ray, open_interval(), &mut rec) {
            // A graze that reports a hit must put the point on the surface
            assert!((rec.p.length() - 1.0).abs() < 1e-3);
            assert!((rec.t - 5.0).abs() < 1e-2);
        }
    }

    #[test]
    fn test_uv_ranges() {
        let sphere = Sphere::new(Material::default())
            .with_transform(Mat4::from_translation(Vec3::new(0.0, 0.0, 5.0)));

        // Front of the sphere: local normal (0, 0, -1)
        let ray = Ray::new(Vec3::ZERO, Vec3::Z);
        let mut rec = HitRecord::default();
        assert!(sphere.hit(&ray, open_interval(), &mut rec));

        // u = (asin(0) + pi/2)/pi = 0.5; v = (atan2(-1, 0) + pi)/(2 pi) = 0.25
        assert!((rec.uv.x - 0.5).abs() < 1e-4);
        assert!((rec.uv.y - 0.25).abs() < 1e-4);
    }

    #[test]
    fn test_normal_map_perturbs_shading_normal_only() {
        let material = Material {
            // Constant tilt in tangent space
            normal_map: Some(procedural_map(|_uv| Vec3::new(0.5, 0.0, 1.0))),
            ..Default::default()
        };
        let sphere = Sphere::new(material)
            .with_transform(Mat4::from_translation(Vec3::new(0.0, 0.0, 5.0)));

        let ray = Ray::new(Vec3::new(0.2, 0.1, 0.0), Vec3::Z);
        let mut rec = HitRecord::default();
        assert!(sphere.hit(&ray, open_interval(), &mut rec));

        assert!((rec.shading_normal.length() - 1.0).abs() < 1e-4);
        assert!((rec.normal.length() - 1.0).abs() < 1e-4);
        assert!((rec.shading_normal - rec.normal).length() > 1e-3);
    }

    #[test]
    fn test_tangent_frame_is_orthonormal() {
        let sphere = Sphere::new(Material::default())
            .with_transform(Mat4::from_translation(Vec3::new(1.0, 0.5, 5.0)));

        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.2, 0.1, 1.0).normalize());
        let mut rec = HitRecord::default();
        assert!(sphere.hit(&ray, open_interval(), &mut rec));

        assert!((rec.tangent.length() - 1.0).abs() < 1e-3);
        assert!(rec.tangent.dot(rec.bitangent).abs() < 1e-3);
    }
}
