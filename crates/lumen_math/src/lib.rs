//! Math foundation for the lumen ray tracer.
//!
//! Re-exports glam and adds the ray-tracing specific types: rays,
//! scalar intervals, axis-aligned bounding boxes and affine transforms.

// Re-export glam for convenience
pub use glam::*;

mod aabb;
mod interval;
mod ray;
mod transform;

pub use aabb::{Aabb, AabbHit};
pub use interval::Interval;
pub use ray::Ray;
pub use transform::Transform;
