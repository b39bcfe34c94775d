//! Scene: objects, point lights and the closest-hit query.

use lumen_math::{Interval, Ray, Vec3};

use crate::hit::{HitRecord, Hittable};
use crate::Color;

/// A point light with unclamped RGB intensity.
///
/// Intensity is interpreted as radiant power; the shading evaluator
/// applies inverse-square falloff.
#[derive(Debug, Clone, Copy)]
pub struct Light {
    pub position: Vec3,
    pub color: Vec3,
}

impl Light {
    /// Create a new light.
    pub fn new(position: Vec3, color: Vec3) -> Self {
        Self { position, color }
    }
}

/// A renderable scene: an ordered list of objects, lights and a global
/// ambient term.
///
/// Built once before rendering and read-only afterwards, so workers can
/// share it freely.
#[derive(Default)]
pub struct Scene {
    objects: Vec<Box<dyn Hittable>>,
    lights: Vec<Light>,
    ambient: Color,
}

impl Scene {
    /// Create an empty scene with no ambient light.
    pub fn new() -> Self {
        Self {
            objects: Vec::new(),
            lights: Vec::new(),
            ambient: Color::ZERO,
        }
    }

    /// Set the global ambient light.
    pub fn with_ambient(mut self, ambient: Color) -> Self {
        self.ambient = ambient;
        self
    }

    /// Add an object to the scene.
    pub fn add_object(&mut self, object: Box<dyn Hittable>) {
        self.objects.push(object);
    }

    /// Add a light to the scene.
    pub fn add_light(&mut self, light: Light) {
        self.lights.push(light);
    }

    /// The scene's lights.
    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    /// The global ambient light.
    pub fn ambient(&self) -> Color {
        self.ambient
    }

    /// Number of objects.
    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    /// Number of lights.
    pub fn light_count(&self) -> usize {
        self.lights.len()
    }

    /// Find the closest intersection along a ray.
    ///
    /// Returns true and fills the record if anything was hit.
    pub fn closest<'a>(&'a self, ray: &Ray, rec: &mut HitRecord<'a>) -> bool {
        let mut hit_anything = false;
        let mut closest_so_far = f32::INFINITY;

        for object in &self.objects {
            if object.hit(ray, Interval::new(0.0, closest_so_far), rec) {
                hit_anything = true;
                closest_so_far = rec.t;
            }
        }

        hit_anything
    }

    /// Any-hit occlusion test for shadow rays: true when some object lies
    /// within `max_dist` along the ray.
    pub fn occluded(&self, ray: &Ray, max_dist: f32) -> bool {
        let mut rec = HitRecord::default();
        self.objects
            .iter()
            .any(|object| object.hit(ray, Interval::new(0.0, max_dist), &mut rec))
    }
}
