//! Recursive shading evaluator.
//!
//! Phong direct lighting with shadow rays, plus recursive specular bounces:
//! reflection, refraction and a Fresnel energy split between them. Radiance
//! stays unclamped here; the renderer clamps once during tonemapping.

use std::f32::consts::PI;

use lumen_math::{Ray, Vec3};

use crate::{Anisotropy, Color, HitRecord, Material, Scene};

/// Self-intersection offset for shadow, reflection and refraction rays.
///
/// Smaller values cause surface acne, larger ones detach contact shadows.
pub const EPSILON: f32 = 1e-3;

/// Reflect a vector about a normal.
#[inline]
pub fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}

/// Refract an incident direction through a surface with relative index
/// `eta = n1/n2`. Returns None on total internal reflection.
///
/// `n` must oppose `incident` (both unit length).
#[inline]
pub fn refract(incident: Vec3, n: Vec3, eta: f32) -> Option<Vec3> {
    let cos_i = n.dot(incident);
    let k = 1.0 - eta * eta * (1.0 - cos_i * cos_i);
    if k < 0.0 {
        None
    } else {
        Some(eta * incident - (eta * cos_i + k.sqrt()) * n)
    }
}

/// Build an orthonormal tangent/bitangent pair from a unit normal.
///
/// The helper axis switches away from world-up when the normal runs
/// nearly parallel to it.
pub fn tangent_basis(n: Vec3) -> (Vec3, Vec3) {
    let helper = if n.y.abs() > 0.99 { Vec3::X } else { Vec3::Y };
    let tangent = n.cross(helper).normalize();
    let bitangent = n.cross(tangent);

    (tangent, bitangent)
}

/// Trace a ray into the scene and return its radiance.
///
/// A ray that hits nothing contributes zero.
pub fn trace_ray(scene: &Scene, ray: &Ray, bounces: u32) -> Color {
    shade_ray(scene, ray, bounces).unwrap_or(Color::ZERO)
}

/// Trace a ray and shade its closest hit; None when nothing was hit.
fn shade_ray(scene: &Scene, ray: &Ray, bounces: u32) -> Option<Color> {
    let mut rec = HitRecord::default();
    if !scene.closest(ray, &mut rec) {
        return None;
    }
    let material = rec.material?;
    Some(shade(scene, &rec, material, -ray.direction, bounces))
}

/// Evaluate outgoing radiance at a surface point.
///
/// `view_dir` is the unit direction from the point toward the viewer.
/// `bounces` is the remaining recursion depth for specular rays.
pub fn shade(
    scene: &Scene,
    rec: &HitRecord,
    material: &Material,
    view_dir: Vec3,
    bounces: u32,
) -> Color {
    let point = rec.p;
    let uv = rec.uv;

    // Orient both normals toward the viewer.
    let mut normal = rec.normal;
    if normal.dot(view_dir) < 0.0 {
        normal = -normal;
    }
    let mut shading_normal = rec.shading_normal;
    if shading_normal.dot(view_dir) < 0.0 {
        shading_normal = -shading_normal;
    }

    let mut color = Color::ZERO;

    for light in scene.lights() {
        let to_light = light.position - point;
        let distance = to_light.length();
        let l = to_light / distance;

        // Light behind the surface counts as occluded.
        if normal.dot(l) < 0.0 {
            continue;
        }

        let shadow_ray = Ray::new(point + EPSILON * l, l);
        if scene.occluded(&shadow_ray, distance) {
            continue;
        }

        let diffuse_color = match &material.texture {
            Some(texture) => texture(uv),
            None => material.diffuse,
        };
        let diffuse_factor = l.dot(shading_normal).max(0.0);

        let half = (l + view_dir).normalize();

        let specular = match material.anisotropy {
            Some(aniso) => ward_specular(material, aniso, rec, l, view_dir, half, shading_normal),
            None => {
                let shininess = match &material.roughness_map {
                    Some(roughness) => {
                        let r = roughness(uv);
                        0.5 / r.powi(4) - 0.5
                    }
                    None => material.shininess,
                };
                material.specular * half.dot(shading_normal).max(0.0).powf(4.0 * shininess)
            }
        };

        let attenuation = 1.0 / distance.max(0.1).powi(2);
        color += attenuation * light.color * (diffuse_color * diffuse_factor + specular);
    }

    if bounces > 0 {
        let mut reflected = Color::ZERO;
        let mut refracted = Color::ZERO;

        let reflection_fired = material.reflection > 0.0;
        if reflection_fired {
            color *= 1.0 - material.reflection;

            let r = reflect(-view_dir, shading_normal);
            let reflection_ray = Ray::new(point + EPSILON * r, r);
            if let Some(radiance) = shade_ray(scene, &reflection_ray, bounces - 1) {
                reflected = material.reflection * radiance;
            }
        }

        if material.refraction > 0.0 {
            color *= 1.0 - material.refraction;

            let incident = -view_dir;
            // Entering is judged against the hit's shading normal; a ray
            // leaving the medium swaps the indices and hands the negated
            // normal to refract.
            let entering = rec.shading_normal.dot(incident) < 0.0;
            let (n1, n2) = if entering {
                (1.0, material.sigma)
            } else {
                (material.sigma, 1.0)
            };
            let refract_normal = if entering {
                rec.shading_normal
            } else {
                -rec.shading_normal
            };

            if let Some(transmitted) = refract(incident, refract_normal, n1 / n2) {
                let refraction_ray = Ray::new(point + EPSILON * transmitted, transmitted);
                if let Some(radiance) = shade_ray(scene, &refraction_ray, bounces - 1) {
                    refracted = material.refraction * radiance;

                    if reflection_fired {
                        // Fresnel split between the two specular branches.
                        let cos1 = rec.shading_normal.dot(view_dir).clamp(-1.0, 1.0);
                        let cos2 = (-rec.shading_normal).dot(transmitted).clamp(-1.0, 1.0);

                        let r_par = (n1 * cos1 - n2 * cos2) / (n1 * cos1 + n2 * cos2);
                        let r_perp = (n1 * cos2 - n2 * cos1) / (n1 * cos2 + n2 * cos1);
                        let r_coef = 0.5 * (r_par * r_par + r_perp * r_perp);

                        reflected *= r_coef;
                        refracted *= 1.0 - r_coef;
                    }
                }
            }
        }

        color += reflected + refracted;
    }

    color += match &material.occlusion_map {
        Some(occlusion) => scene.ambient() * (0.1 * occlusion(uv)),
        None => scene.ambient() * material.ambient,
    };

    color
}

/// Ward anisotropic specular term, aligned to the hit's tangent frame.
fn ward_specular(
    material: &Material,
    aniso: Anisotropy,
    rec: &HitRecord,
    l: Vec3,
    v: Vec3,
    half: Vec3,
    n: Vec3,
) -> Vec3 {
    let n_l = n.dot(l);
    let n_v = n.dot(v);
    if n_l <= 0.0 || n_v <= 0.0 {
        return Vec3::ZERO;
    }

    let ht = half.dot(rec.tangent) / aniso.alpha_x;
    let hb = half.dot(rec.bitangent) / aniso.alpha_y;
    let exponent = -2.0 * (ht * ht) * (hb * hb) / (1.0 + half.dot(n));

    material.specular * (n_l * exponent.exp())
        / ((n_l * n_v).sqrt() * 4.0 * PI * aniso.alpha_x * aniso.alpha_y)
}
