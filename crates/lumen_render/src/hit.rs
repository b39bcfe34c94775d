//! Hittable trait and HitRecord for ray-object intersection.

use lumen_math::{Interval, Ray, Vec2, Vec3};

use crate::Material;

/// Record of a ray-object intersection.
///
/// Validity is the boolean returned by [`Hittable::hit`]; when an
/// intersection routine returns false the record contents are meaningless.
/// The material is borrowed from the hit object so the shader can look it
/// up without owning or extending the object's lifetime.
#[derive(Clone)]
pub struct HitRecord<'a> {
    /// World-space intersection point
    pub p: Vec3,
    /// Geometric surface normal (unit length)
    pub normal: Vec3,
    /// Normal used for lighting; equals `normal` unless a normal map
    /// perturbed it
    pub shading_normal: Vec3,
    /// Surface tangent, for anisotropic highlights and normal mapping
    pub tangent: Vec3,
    /// Surface bitangent
    pub bitangent: Vec3,
    /// Texture coordinates
    pub uv: Vec2,
    /// World-space distance from the ray origin, > 0
    pub t: f32,
    /// Material of the hit object
    pub material: Option<&'a Material>,
}

impl<'a> Default for HitRecord<'a> {
    fn default() -> Self {
        Self {
            p: Vec3::ZERO,
            normal: Vec3::ZERO,
            shading_normal: Vec3::ZERO,
            tangent: Vec3::ZERO,
            bitangent: Vec3::ZERO,
            uv: Vec2::ZERO,
            t: 0.0,
            material: None,
        }
    }
}

/// Trait for objects that can be hit by rays.
pub trait Hittable: Send + Sync {
    /// Test if a ray hits this object within the given distance interval.
    ///
    /// Returns true if hit, and fills in the hit record.
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval, rec: &mut HitRecord<'a>) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_record_is_inert() {
        let rec = HitRecord::default();

        assert_eq!(rec.t, 0.0);
        assert!(rec.material.is_none());
    }
}
