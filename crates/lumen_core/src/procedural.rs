//! Procedural textures.
//!
//! Pure functions from UV to color (or to a tangent-space normal) built on
//! Perlin noise. Everything here is deterministic: the generator seed is
//! fixed, so repeated renders produce identical images.

use lumen_math::{Vec2, Vec3};
use noise::{NoiseFn, Perlin};
use once_cell::sync::Lazy;

static PERLIN: Lazy<Perlin> = Lazy::new(|| Perlin::new(0));

/// Sample three independent noise channels at `uv`, one per color channel.
///
/// Each channel gets its own UV scales and a z-offset that separates it
/// from the others in the noise domain. Outputs are roughly in [-1, 1].
fn perlin_rgb(uv: Vec2, u_scales: Vec3, v_scales: Vec3, offsets: Vec3) -> Vec3 {
    let channel = |us: f32, vs: f32, off: f32| {
        PERLIN.get([(uv.x * us) as f64, (uv.y * vs) as f64, off as f64]) as f32
    };

    Vec3::new(
        channel(u_scales.x, v_scales.x, offsets.x),
        channel(u_scales.y, v_scales.y, offsets.y),
        channel(u_scales.z, v_scales.z, offsets.z),
    )
}

/// Remap a noise channel from [-1, 1] into [0, 1].
fn to_unit(p: Vec3) -> Vec3 {
    (p + Vec3::ONE) * 0.5
}

/// Blend two colors per channel by a [0, 1] noise weight.
fn lerp_colors(w: Vec3, a: Vec3, b: Vec3) -> Vec3 {
    Vec3::new(
        w.x * a.x + (1.0 - w.x) * b.x,
        w.y * a.y + (1.0 - w.y) * b.y,
        w.z * a.z + (1.0 - w.z) * b.z,
    )
}

/// Earthy terrain coloring.
pub fn terrain(uv: Vec2) -> Vec3 {
    let p = to_unit(perlin_rgb(uv, Vec3::splat(30.0), Vec3::splat(30.0), Vec3::ZERO));

    Vec3::new(0.2 + 0.4 * p.x, 0.2 + 0.3 * p.y, 0.2 + 0.2 * p.z)
}

/// Pale blue ice coloring.
pub fn ice_terrain(uv: Vec2) -> Vec3 {
    let p = to_unit(perlin_rgb(
        uv,
        Vec3::splat(10.0),
        Vec3::splat(10.0),
        Vec3::splat(10.0),
    ));

    lerp_colors(
        p,
        Vec3::new(0.722, 0.961, 0.937),
        Vec3::new(0.075, 0.482, 0.631),
    )
}

/// Snow coloring, slightly darker lowlights than ice.
pub fn snow_terrain(uv: Vec2) -> Vec3 {
    let p = to_unit(perlin_rgb(
        uv,
        Vec3::splat(10.0),
        Vec3::splat(10.0),
        Vec3::splat(10.0),
    ));

    lerp_colors(
        p,
        Vec3::new(0.722, 0.961, 0.937),
        Vec3::new(0.212, 0.51, 0.62),
    )
}

/// Milky opal coloring with uncorrelated channels.
pub fn opal(uv: Vec2) -> Vec3 {
    let p = to_unit(perlin_rgb(
        uv,
        Vec3::new(20.0, 10.0, 15.0),
        Vec3::splat(20.0),
        Vec3::new(0.2, 0.3, 0.4),
    ));

    Vec3::new(0.5 + 0.4 * p.x, 0.5 + 0.3 * p.y, 0.5 + 0.2 * p.z)
}

/// Hard-edged two-color banding along v: yellow below the threshold, teal
/// above it.
pub fn two_tone(uv: Vec2) -> Vec3 {
    if 0.5 * (uv.y + 3.0) < 1.0 {
        Vec3::new(0.937, 0.922, 0.392)
    } else {
        Vec3::new(0.0, 0.416, 0.42)
    }
}

/// Rippled tangent-space normal map in [-1, 1]^3.
///
/// A unit +z normal tilted by two noise channels; the z component stays
/// dominant so the perturbation never flips the surface.
pub fn ripple_normal(uv: Vec2) -> Vec3 {
    let p = perlin_rgb(
        uv,
        Vec3::new(50.0, 50.0, 0.0),
        Vec3::new(50.0, 50.0, 0.0),
        Vec3::new(0.0, 50.0, 0.0),
    );

    Vec3::new(0.4 * p.x, 0.4 * p.y, 1.0).normalize()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deterministic() {
        let uv = Vec2::new(0.37, 0.81);
        assert_eq!(terrain(uv), terrain(uv));
        assert_eq!(opal(uv), opal(uv));
        assert_eq!(ripple_normal(uv), ripple_normal(uv));
    }

    #[test]
    fn test_colors_in_range() {
        for i in 0..32 {
            for j in 0..32 {
                let uv = Vec2::new(i as f32 / 31.0, j as f32 / 31.0);
                for c in [terrain(uv), ice_terrain(uv), snow_terrain(uv), opal(uv)] {
                    assert!(c.min_element() >= 0.0, "negative channel at {uv:?}: {c:?}");
                    assert!(c.max_element() <= 1.0, "channel > 1 at {uv:?}: {c:?}");
                }
            }
        }
    }

    #[test]
    fn test_two_tone_bands() {
        // v below the threshold -> yellow side
        let low = two_tone(Vec2::new(0.0, -1.5));
        assert!(low.x > 0.5);

        // v above the threshold -> teal side
        let high = two_tone(Vec2::new(0.0, 0.0));
        assert!(high.x < 0.5);
    }

    #[test]
    fn test_ripple_normal_is_unit_and_outward() {
        for i in 0..16 {
            let uv = Vec2::new(i as f32 / 15.0, 0.42);
            let n = ripple_normal(uv);
            assert!((n.length() - 1.0).abs() < 1e-5);
            assert!(n.z > 0.5, "z stays dominant: {n:?}");
        }
    }
}
