//! Lumen renderer - CPU ray tracing.
//!
//! A recursive Whitted-style ray tracer: analytic primitives and BVH-indexed
//! triangle meshes, Phong direct lighting with shadow rays, specular
//! reflection/refraction with a Fresnel split, and a tile-parallel driver
//! with fixed-pattern supersampling.

mod bucket;
mod bvh;
mod camera;
mod cone;
mod hit;
mod material;
mod mesh;
mod output;
mod plane;
mod renderer;
mod scene;
mod shading;
mod sphere;
mod triangle;

pub use bucket::{generate_buckets, render_bucket, Bucket, BucketResult};
pub use bvh::BvhNode;
pub use camera::Camera;
pub use cone::Cone;
pub use hit::{HitRecord, Hittable};
pub use material::{
    image_color_map, image_scalar_map, procedural_map, Anisotropy, Color, ColorMap, Material,
    ScalarMap,
};
pub use mesh::Mesh;
pub use output::{save_png, save_ppm, write_ppm};
pub use plane::Plane;
pub use renderer::{render, render_pixel, tonemap, ImageBuffer, RenderConfig};
pub use scene::{Light, Scene};
pub use shading::{reflect, refract, shade, trace_ray, EPSILON};
pub use sphere::Sphere;
pub use triangle::Triangle;

/// Re-export common math types from lumen_math
pub use lumen_math::{Aabb, Interval, Mat3, Mat4, Ray, Transform, Vec2, Vec3};
