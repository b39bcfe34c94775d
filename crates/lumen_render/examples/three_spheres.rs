//! Minimal renderer example.
//!
//! Renders three spheres over a floor plane and saves a PPM.

use std::f32::consts::FRAC_PI_2;

use lumen_render::{
    render, save_ppm, Camera, Light, Mat4, Material, Plane, RenderConfig, Scene, Sphere, Vec3,
};

fn main() {
    let mut scene = Scene::new().with_ambient(Vec3::splat(0.3));

    scene.add_object(Box::new(Plane::new(
        Vec3::new(0.0, -1.0, 0.0),
        Vec3::Y,
        Material {
            ambient: Vec3::splat(0.1),
            diffuse: Vec3::splat(0.7),
            ..Default::default()
        },
    )));

    // Matte red
    scene.add_object(Box::new(
        Sphere::new(Material {
            ambient: Vec3::new(0.05, 0.01, 0.01),
            diffuse: Vec3::new(0.9, 0.1, 0.1),
            specular: Vec3::splat(0.4),
            shininess: 20.0,
            ..Default::default()
        })
        .with_transform(Mat4::from_translation(Vec3::new(-2.2, 0.0, 7.0))),
    ));

    // Mirror
    scene.add_object(Box::new(
        Sphere::new(Material {
            diffuse: Vec3::ZERO,
            reflection: 1.0,
            ..Default::default()
        })
        .with_transform(Mat4::from_translation(Vec3::new(0.0, 0.0, 8.0))),
    ));

    // Glass
    scene.add_object(Box::new(
        Sphere::new(Material {
            diffuse: Vec3::splat(0.05),
            specular: Vec3::splat(0.5),
            shininess: 60.0,
            reflection: 0.2,
            refraction: 0.8,
            sigma: 1.5,
            ..Default::default()
        })
        .with_transform(Mat4::from_translation(Vec3::new(2.2, 0.0, 7.0))),
    ));

    scene.add_light(Light::new(Vec3::new(4.0, 6.0, 2.0), Vec3::splat(60.0)));
    scene.add_light(Light::new(Vec3::new(-3.0, 4.0, 10.0), Vec3::splat(25.0)));

    let camera = Camera::new(640, 480, FRAC_PI_2).with_position(Vec3::new(0.0, 0.5, 0.0));

    let start = std::time::Instant::now();
    let image = render(&scene, &camera, &RenderConfig::default());
    println!("Rendered in {:?}", start.elapsed());

    save_ppm(&image, "three_spheres.ppm").expect("failed to save image");
    println!("Saved to three_spheres.ppm");
}
