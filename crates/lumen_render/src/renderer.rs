//! Tile-parallel render driver.
//!
//! Buckets are consumed by a rayon worker pool (dynamic scheduling, one
//! bucket per task) and stitched into the final image. Each pixel is
//! supersampled with a fixed rotated-grid jitter pattern and tonemapped;
//! the result is deterministic no matter how the buckets are scheduled.

use indicatif::{ProgressBar, ProgressStyle};
use lumen_math::{Vec2, Vec3};
use rayon::prelude::*;

use crate::bucket::{generate_buckets, render_bucket, BucketResult};
use crate::shading::trace_ray;
use crate::{Camera, Color, Scene};

/// Fixed rotated-grid jitter offsets, in pixel units.
pub const SAMPLE_PATTERN: [Vec2; 4] = [
    Vec2::new(-0.25, 0.75),
    Vec2::new(0.75, 1.0 / 3.0),
    Vec2::new(-0.75, -0.25),
    Vec2::new(0.25, -0.75),
];

// Tonemapping constants: c' = (ALPHA * c^BETA)^(1/GAMMA)
const TONEMAP_ALPHA: f32 = 1.5;
const TONEMAP_BETA: f32 = 1.8;
const TONEMAP_GAMMA: f32 = 2.2;

/// Render configuration.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Maximum recursion depth for reflection/refraction rays
    pub bounces: u32,
    /// Edge length of a render bucket in pixels
    pub tile_size: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            bounces: 3,
            tile_size: 16,
        }
    }
}

/// Compress unbounded radiance into displayable [0, 1], per channel.
pub fn tonemap(radiance: Color) -> Color {
    let channel = |c: f32| (TONEMAP_ALPHA * c.max(0.0).powf(TONEMAP_BETA)).powf(1.0 / TONEMAP_GAMMA);

    Vec3::new(
        channel(radiance.x),
        channel(radiance.y),
        channel(radiance.z),
    )
    .clamp(Vec3::ZERO, Vec3::ONE)
}

/// Render one pixel: four jittered samples, averaged and tonemapped.
pub fn render_pixel(scene: &Scene, camera: &Camera, config: &RenderConfig, x: u32, y: u32) -> Color {
    let mut radiance = Color::ZERO;

    for jitter in SAMPLE_PATTERN {
        let ray = camera.primary_ray(x, y, jitter);
        radiance += trace_ray(scene, &ray, config.bounces);
    }

    tonemap(radiance / SAMPLE_PATTERN.len() as f32)
}

/// Image buffer for storing render output.
///
/// Pixels are tonemapped RGB in [0, 1]; (0, 0) is the top-left corner.
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; (width * height) as usize],
        }
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[(y * self.width + x) as usize]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        self.pixels[(y * self.width + x) as usize] = color;
    }

    /// Convert to packed 8-bit RGB bytes, row-major from the top-left.
    pub fn to_rgb8(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.pixels.len() * 3);
        for color in &self.pixels {
            bytes.push((color.x.clamp(0.0, 1.0) * 255.0) as u8);
            bytes.push((color.y.clamp(0.0, 1.0) * 255.0) as u8);
            bytes.push((color.z.clamp(0.0, 1.0) * 255.0) as u8);
        }
        bytes
    }
}

/// Render the scene into an image buffer.
///
/// Buckets complete in nondeterministic order across the worker pool;
/// pixel values do not depend on that order.
pub fn render(scene: &Scene, camera: &Camera, config: &RenderConfig) -> ImageBuffer {
    let buckets = generate_buckets(camera.width(), camera.height(), config.tile_size);

    log::info!(
        "Rendering {}x{} in {} buckets on {} threads",
        camera.width(),
        camera.height(),
        buckets.len(),
        rayon::current_num_threads()
    );

    let progress = ProgressBar::new(buckets.len() as u64);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("{bar:40} {pos}/{len} ETA: {eta}")
            .unwrap(),
    );

    let results: Vec<BucketResult> = buckets
        .par_iter()
        .map(|bucket| {
            let pixels = render_bucket(bucket, scene, camera, config);
            progress.inc(1);
            BucketResult::new(*bucket, pixels)
        })
        .collect();

    progress.finish_and_clear();

    let mut image = ImageBuffer::new(camera.width(), camera.height());
    for result in results {
        let bucket = result.bucket;
        for local_y in 0..bucket.height {
            for local_x in 0..bucket.width {
                let color = result.pixels[(local_y * bucket.width + local_x) as usize];
                image.set(bucket.x + local_x, bucket.y + local_y, color);
            }
        }
    }

    image
}
