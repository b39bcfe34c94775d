//! Material description for surface shading.

use std::sync::Arc;

use lumen_core::texture::Texture;
use lumen_math::{Vec2, Vec3};

/// Color type alias (RGB values typically 0-1)
pub type Color = Vec3;

/// A texture function from UV to RGB (or to a tangent-space normal).
pub type ColorMap = Arc<dyn Fn(Vec2) -> Vec3 + Send + Sync>;

/// A texture function from UV to a scalar (roughness, occlusion).
pub type ScalarMap = Arc<dyn Fn(Vec2) -> f32 + Send + Sync>;

/// Ward anisotropic roughness, aligned to the surface tangent axes.
#[derive(Debug, Clone, Copy)]
pub struct Anisotropy {
    /// Roughness along the tangent, in (0, 1]
    pub alpha_x: f32,
    /// Roughness along the bitangent, in (0, 1]
    pub alpha_y: f32,
}

/// Declarative material properties consumed by the shading evaluator.
///
/// A plain value object: primitives own a copy and hit records borrow it.
/// The optional maps are shared closures so materials stay cheap to clone.
#[derive(Clone)]
pub struct Material {
    /// Ambient reflectance (scaled by the scene ambient light)
    pub ambient: Color,
    /// Diffuse reflectance, overridden per-point by `texture` when bound
    pub diffuse: Color,
    /// Specular reflectance
    pub specular: Color,
    /// Phong shininess exponent (ignored when a roughness map is bound)
    pub shininess: f32,
    /// Fraction of energy sent into the reflection bounce, in [0, 1]
    pub reflection: f32,
    /// Fraction of energy sent into the refraction bounce, in [0, 1]
    pub refraction: f32,
    /// Index of refraction, >= 1
    pub sigma: f32,
    /// Optional color texture
    pub texture: Option<ColorMap>,
    /// Optional tangent-space normal map, sampled in [-1, 1]^3
    pub normal_map: Option<ColorMap>,
    /// Optional Ward anisotropic highlight
    pub anisotropy: Option<Anisotropy>,
    /// Optional roughness map driving the specular exponent
    pub roughness_map: Option<ScalarMap>,
    /// Optional ambient-occlusion map
    pub occlusion_map: Option<ScalarMap>,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            ambient: Color::ZERO,
            diffuse: Color::ONE,
            specular: Color::ZERO,
            shininess: 0.0,
            reflection: 0.0,
            refraction: 0.0,
            sigma: 1.0,
            texture: None,
            normal_map: None,
            anisotropy: None,
            roughness_map: None,
            occlusion_map: None,
        }
    }
}

/// Wrap a plain procedural function as a shareable color map.
pub fn procedural_map(f: fn(Vec2) -> Vec3) -> ColorMap {
    Arc::new(f)
}

/// Bind a bitmap texture as a color map with the given tiling scales.
pub fn image_color_map(texture: Arc<Texture>, hscale: f32, vscale: f32) -> ColorMap {
    Arc::new(move |uv| texture.sample(uv.x, uv.y, hscale, vscale))
}

/// Bind one channel of a bitmap texture as a scalar map.
pub fn image_scalar_map(
    texture: Arc<Texture>,
    channel: usize,
    hscale: f32,
    vscale: f32,
) -> ScalarMap {
    Arc::new(move |uv| texture.sample_channel(uv.x, uv.y, channel, hscale, vscale))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_material() {
        let material = Material::default();

        assert_eq!(material.diffuse, Color::ONE);
        assert_eq!(material.ambient, Color::ZERO);
        assert_eq!(material.reflection, 0.0);
        assert_eq!(material.refraction, 0.0);
        assert_eq!(material.sigma, 1.0);
        assert!(material.texture.is_none());
        assert!(material.normal_map.is_none());
    }

    #[test]
    fn test_clone_shares_maps() {
        let material = Material {
            texture: Some(procedural_map(|uv| Vec3::new(uv.x, uv.y, 0.0))),
            ..Default::default()
        };

        let copy = material.clone();
        let sample = copy.texture.as_ref().unwrap()(Vec2::new(0.25, 0.5));
        assert_eq!(sample, Vec3::new(0.25, 0.5, 0.0));
    }

    #[test]
    fn test_image_maps() {
        let texture = Arc::new(Texture::solid(Vec3::new(0.2, 0.4, 0.8)));

        let color = image_color_map(texture.clone(), 1.0, 1.0);
        assert!((color(Vec2::new(0.5, 0.5)) - Vec3::new(0.2, 0.4, 0.8)).length() < 1e-6);

        let scalar = image_scalar_map(texture, 2, 1.0, 1.0);
        assert!((scalar(Vec2::new(0.5, 0.5)) - 0.8).abs() < 1e-6);
    }
}
