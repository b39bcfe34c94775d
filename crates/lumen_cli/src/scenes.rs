//! Programmatic scene definition.
//!
//! One showcase scene: a walled room holding a loaded mesh, mirror and
//! glass spheres, procedurally textured and normal-mapped spheres, an
//! anisotropic sphere and a pair of cones, lit by three point lights.

use std::f32::consts::{FRAC_PI_2, PI};
use std::sync::Arc;

use lumen_core::{procedural, Texture};
use lumen_render::{
    image_color_map, procedural_map, Anisotropy, Camera, Cone, Light, Mat4, Material, Mesh, Plane,
    Scene, Sphere, Vec3,
};

/// Mesh placed inside the room; a missing file logs and renders without it.
const MESH_PATH: &str = "meshes/armadillo.obj";

/// Optional bitmap for the back wall.
const WALL_TEXTURE_PATH: &str = "textures/wall.bmp";

fn orange_specular() -> Material {
    Material {
        ambient: Vec3::new(0.01, 0.03, 0.03),
        diffuse: Vec3::new(1.0, 0.6, 0.1),
        specular: Vec3::splat(0.5),
        shininess: 10.0,
        ..Default::default()
    }
}

fn blue_copper_specular() -> Material {
    Material {
        ambient: Vec3::new(0.07, 0.07, 0.1),
        diffuse: Vec3::new(0.2, 0.8, 0.8),
        specular: Vec3::splat(0.6),
        shininess: 100.0,
        ..Default::default()
    }
}

/// The six room planes: floor, ceiling, side walls, front and back.
fn add_room(scene: &mut Scene) {
    let walls = blue_copper_specular();

    let floor = Material {
        texture: Some(procedural_map(procedural::snow_terrain)),
        ..walls.clone()
    };
    scene.add_object(Box::new(Plane::new(
        Vec3::new(0.0, -3.0, 14.995),
        Vec3::Y,
        floor,
    )));
    scene.add_object(Box::new(Plane::new(
        Vec3::new(0.0, 27.0, 14.995),
        Vec3::new(0.0, -1.0, 0.0),
        walls.clone(),
    )));
    scene.add_object(Box::new(Plane::new(
        Vec3::new(-15.0, 12.0, 14.995),
        Vec3::X,
        walls.clone(),
    )));
    scene.add_object(Box::new(Plane::new(
        Vec3::new(15.0, 12.0, 14.995),
        Vec3::new(-1.0, 0.0, 0.0),
        walls.clone(),
    )));

    // Back wall carries a bitmap when one is available next to the binary.
    let mut back = walls.clone();
    match Texture::load(WALL_TEXTURE_PATH) {
        Ok(texture) => {
            back.texture = Some(image_color_map(Arc::new(texture), 4.0, 4.0));
        }
        Err(err) => {
            log::debug!("No wall texture at {WALL_TEXTURE_PATH}: {err}");
        }
    }
    scene.add_object(Box::new(Plane::new(
        Vec3::new(0.0, 12.0, 30.0),
        Vec3::new(0.0, 0.0, -1.0),
        back,
    )));

    // Plane right behind the camera closes the box.
    scene.add_object(Box::new(Plane::new(
        Vec3::new(0.0, 12.0, -0.1),
        Vec3::Z,
        walls,
    )));
}

fn add_spheres(scene: &mut Scene) {
    // Mirror
    scene.add_object(Box::new(
        Sphere::new(Material {
            diffuse: Vec3::ZERO,
            specular: Vec3::splat(0.3),
            shininess: 50.0,
            reflection: 1.0,
            ..Default::default()
        })
        .with_transform(
            Mat4::from_translation(Vec3::new(-5.0, -1.0, 13.0)) * Mat4::from_scale(Vec3::splat(2.0)),
        ),
    ));

    // Glass: reflection and refraction split by Fresnel
    scene.add_object(Box::new(
        Sphere::new(Material {
            ambient: Vec3::splat(0.01),
            diffuse: Vec3::splat(0.1),
            specular: Vec3::splat(0.4),
            shininess: 80.0,
            reflection: 0.2,
            refraction: 0.8,
            sigma: 1.5,
            ..Default::default()
        })
        .with_transform(
            Mat4::from_translation(Vec3::new(5.0, -1.0, 11.0)) * Mat4::from_scale(Vec3::splat(2.0)),
        ),
    ));

    // Procedurally textured
    scene.add_object(Box::new(
        Sphere::new(Material {
            ambient: Vec3::splat(0.02),
            diffuse: Vec3::ONE,
            specular: Vec3::splat(0.2),
            shininess: 20.0,
            texture: Some(procedural_map(procedural::ice_terrain)),
            ..Default::default()
        })
        .with_transform(
            Mat4::from_translation(Vec3::new(-9.0, 0.5, 19.0))
                * Mat4::from_scale(Vec3::splat(1.5)),
        ),
    ));

    // Normal-mapped water
    scene.add_object(Box::new(
        Sphere::new(Material {
            ambient: Vec3::splat(0.02),
            diffuse: Vec3::new(0.2, 0.4, 0.8),
            specular: Vec3::splat(0.6),
            shininess: 60.0,
            normal_map: Some(procedural_map(procedural::ripple_normal)),
            ..Default::default()
        })
        .with_transform(
            Mat4::from_translation(Vec3::new(9.0, 0.5, 19.0)) * Mat4::from_scale(Vec3::splat(1.5)),
        ),
    ));

    // Brushed metal with a Ward highlight
    scene.add_object(Box::new(
        Sphere::new(Material {
            ambient: Vec3::splat(0.02),
            diffuse: Vec3::new(0.8, 0.5, 0.3),
            specular: Vec3::splat(0.8),
            anisotropy: Some(Anisotropy {
                alpha_x: 0.05,
                alpha_y: 0.16,
            }),
            ..Default::default()
        })
        .with_transform(
            Mat4::from_translation(Vec3::new(0.0, 2.5, 16.0)) * Mat4::from_scale(Vec3::splat(1.5)),
        ),
    ));
}

fn add_cones(scene: &mut Scene) {
    let material = Material {
        ambient: Vec3::new(0.02, 0.02, 0.05),
        diffuse: Vec3::new(0.937, 0.922, 0.392),
        specular: Vec3::splat(0.4),
        shininess: 30.0,
        texture: Some(procedural_map(procedural::two_tone)),
        ..Default::default()
    };

    // Upright cone, apex on the floor
    scene.add_object(Box::new(Cone::new(material.clone()).with_transform(
        Mat4::from_translation(Vec3::new(-11.0, -3.0, 24.0))
            * Mat4::from_scale(Vec3::new(2.0, 6.0, 2.0)),
    )));

    // Flipped cone balancing on its apex
    scene.add_object(Box::new(Cone::new(material).with_transform(
        Mat4::from_translation(Vec3::new(11.0, 3.0, 24.0))
            * Mat4::from_rotation_z(PI)
            * Mat4::from_scale(Vec3::new(2.0, 6.0, 2.0)),
    )));
}

/// Build the default scene and its camera.
pub fn build_scene() -> (Scene, Camera) {
    let mut scene = Scene::new().with_ambient(Vec3::splat(0.7));

    add_room(&mut scene);
    add_spheres(&mut scene);
    add_cones(&mut scene);

    scene.add_object(Box::new(Mesh::from_obj_file(
        MESH_PATH,
        Vec3::new(0.0, -3.0, 9.0),
        orange_specular(),
    )));

    scene.add_light(Light::new(Vec3::new(0.0, 26.0, 5.0), Vec3::splat(130.0)));
    scene.add_light(Light::new(Vec3::new(0.0, 1.0, 12.0), Vec3::splat(15.0)));
    scene.add_light(Light::new(Vec3::new(0.0, 5.0, 1.0), Vec3::splat(45.0)));

    let camera = Camera::new(1024, 768, FRAC_PI_2);

    (scene, camera)
}
