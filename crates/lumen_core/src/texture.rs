//! Bitmap texture loading and sampling.
//!
//! Textures are decoded once with the `image` crate (24-bit BMP and
//! anything else it understands) and sampled by UV with independent
//! horizontal/vertical tiling scales.

use std::path::Path;

use lumen_math::Vec3;
use thiserror::Error;

/// Errors that can occur during texture loading.
#[derive(Error, Debug)]
pub enum TextureError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image decoding error: {0}")]
    Image(#[from] image::ImageError),
}

pub type TextureResult<T> = Result<T, TextureError>;

/// A decoded texture with pixel data.
///
/// Pixels are stored as raw `channel / 255` floats in row-major order; no
/// color-space conversion is applied on load.
#[derive(Clone, Debug)]
pub struct Texture {
    /// Texture width in pixels
    pub width: u32,

    /// Texture height in pixels
    pub height: u32,

    /// Pixel data as [R, G, B, A] per pixel, row-major order
    pub pixels: Vec<[f32; 4]>,
}

impl Texture {
    /// Create a texture from raw pixel data.
    pub fn new(width: u32, height: u32, pixels: Vec<[f32; 4]>) -> Self {
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Create a 1x1 solid color texture.
    pub fn solid(color: Vec3) -> Self {
        Self {
            width: 1,
            height: 1,
            pixels: vec![[color.x, color.y, color.z, 1.0]],
        }
    }

    /// Load a texture from an image file.
    pub fn load<P: AsRef<Path>>(path: P) -> TextureResult<Self> {
        let img = image::open(path.as_ref())?;
        let rgba = img.to_rgba8();
        let (width, height) = rgba.dimensions();

        let pixels: Vec<[f32; 4]> = rgba
            .pixels()
            .map(|p| {
                [
                    p[0] as f32 / 255.0,
                    p[1] as f32 / 255.0,
                    p[2] as f32 / 255.0,
                    p[3] as f32 / 255.0,
                ]
            })
            .collect();

        log::debug!(
            "Loaded texture {} ({}x{})",
            path.as_ref().display(),
            width,
            height
        );

        Ok(Self::new(width, height, pixels))
    }

    /// Sample the texture color at UV coordinates.
    ///
    /// UVs tile with `hscale`/`vscale` repeats; the vertical axis is
    /// flipped so v = 0 addresses the bottom row.
    pub fn sample(&self, u: f32, v: f32, hscale: f32, vscale: f32) -> Vec3 {
        let p = self.texel(u, v, hscale, vscale);
        Vec3::new(p[0], p[1], p[2])
    }

    /// Sample a single channel (for roughness/occlusion maps).
    pub fn sample_channel(&self, u: f32, v: f32, channel: usize, hscale: f32, vscale: f32) -> f32 {
        self.texel(u, v, hscale, vscale)[channel.min(3)]
    }

    fn texel(&self, u: f32, v: f32, hscale: f32, vscale: f32) -> [f32; 4] {
        let x = self.width as f32 * (u * hscale).rem_euclid(1.0);
        let y = self.height as f32 - self.height as f32 * (v * vscale).rem_euclid(1.0);

        let xi = (x as u32).min(self.width - 1);
        let yi = (y as u32).min(self.height - 1);

        self.pixels[(yi * self.width + xi) as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_solid_sample() {
        let tex = Texture::solid(Vec3::new(1.0, 0.5, 0.0));

        let sample = tex.sample(0.3, 0.7, 1.0, 1.0);
        assert!((sample - Vec3::new(1.0, 0.5, 0.0)).length() < 1e-6);
    }

    #[test]
    fn test_vertical_flip() {
        // 1x2 texture: red on top row, green on bottom row.
        let tex = Texture::new(
            1,
            2,
            vec![[1.0, 0.0, 0.0, 1.0], [0.0, 1.0, 0.0, 1.0]],
        );

        // v near 0 addresses the bottom row (green)
        let bottom = tex.sample(0.0, 0.01, 1.0, 1.0);
        assert!(bottom.y > bottom.x);

        // v near 1 addresses the top row (red)
        let top = tex.sample(0.0, 0.99, 1.0, 1.0);
        assert!(top.x > top.y);
    }

    #[test]
    fn test_tiling_scale() {
        // 2x1 texture: black texel then white texel.
        let tex = Texture::new(
            2,
            1,
            vec![[0.0, 0.0, 0.0, 1.0], [1.0, 1.0, 1.0, 1.0]],
        );

        // With hscale 2, u = 0.3 maps to fract(0.6) = 0.6 -> second texel
        let s = tex.sample(0.3, 0.5, 2.0, 1.0);
        assert!(s.x > 0.5);

        // u = 0.7 maps to fract(1.4) = 0.4 -> first texel
        let s = tex.sample(0.7, 0.5, 2.0, 1.0);
        assert!(s.x < 0.5);
    }

    #[test]
    fn test_negative_uv_wraps() {
        let tex = Texture::new(
            2,
            1,
            vec![[0.0, 0.0, 0.0, 1.0], [1.0, 1.0, 1.0, 1.0]],
        );

        // rem_euclid keeps the lookup in range for negative UVs
        let s = tex.sample(-0.3, 0.5, 1.0, 1.0);
        assert!(s.x >= 0.0);
    }

    #[test]
    fn test_sample_channel() {
        let tex = Texture::new(1, 1, vec![[0.1, 0.2, 0.3, 0.4]]);

        assert!((tex.sample_channel(0.5, 0.5, 0, 1.0, 1.0) - 0.1).abs() < 1e-6);
        assert!((tex.sample_channel(0.5, 0.5, 2, 1.0, 1.0) - 0.3).abs() < 1e-6);
        // Out-of-range channels clamp to alpha
        assert!((tex.sample_channel(0.5, 0.5, 9, 1.0, 1.0) - 0.4).abs() < 1e-6);
    }

    #[test]
    fn test_load_missing_file() {
        assert!(Texture::load("/nonexistent/texture.bmp").is_err());
    }
}
