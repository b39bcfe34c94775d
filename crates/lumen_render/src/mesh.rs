//! Triangle mesh object.
//!
//! A mesh is a triangle soup behind a BVH, acting as a single scene
//! object: one material shared by every triangle, one top-level bounding
//! box gating the whole structure.

use lumen_core::mesh::MeshData;
use lumen_core::obj;
use lumen_math::{Aabb, Interval, Ray, Vec3};

use crate::hit::{HitRecord, Hittable};
use crate::{BvhNode, Material, Triangle};

/// A triangle mesh with an enclosing BVH.
pub struct Mesh {
    bvh: BvhNode,
    bounds: Aabb,
    material: Material,
}

impl Mesh {
    /// Build a mesh from world-space triangles.
    pub fn new(triangles: Vec<Triangle>, material: Material) -> Self {
        let bvh = BvhNode::build(triangles);
        let bounds = bvh.bbox();
        Self {
            bvh,
            bounds,
            material,
        }
    }

    /// Build a mesh by resolving indexed mesh data into triangles.
    ///
    /// Faces with out-of-range indices are dropped with a warning.
    pub fn from_data(data: &MeshData, material: Material) -> Self {
        let mut triangles = Vec::with_capacity(data.faces.len());

        for face in &data.faces {
            let positions = [
                data.positions.get(face.positions[0]),
                data.positions.get(face.positions[1]),
                data.positions.get(face.positions[2]),
            ];
            let [Some(&a), Some(&b), Some(&c)] = positions else {
                log::warn!(
                    "Dropping face with invalid vertex indices {:?} (vertex count {})",
                    face.positions,
                    data.positions.len()
                );
                continue;
            };

            let mut triangle = Triangle::new(a, b, c);

            if let Some(indices) = face.normals {
                let normals = [
                    data.normals.get(indices[0]),
                    data.normals.get(indices[1]),
                    data.normals.get(indices[2]),
                ];
                if let [Some(&na), Some(&nb), Some(&nc)] = normals {
                    triangle = triangle.with_vertex_normals([na, nb, nc]);
                }
            }

            if let Some(indices) = face.uvs {
                let uvs = [
                    data.uvs.get(indices[0]),
                    data.uvs.get(indices[1]),
                    data.uvs.get(indices[2]),
                ];
                if let [Some(&ta), Some(&tb), Some(&tc)] = uvs {
                    triangle = triangle.with_uvs([ta, tb, tc]);
                }
            }

            triangles.push(triangle);
        }

        Self::new(triangles, material)
    }

    /// Load an OBJ file into a mesh, translating every vertex on load.
    ///
    /// An unreadable file is logged and yields an empty mesh so rendering
    /// can proceed without it.
    pub fn from_obj_file(path: &str, translation: Vec3, material: Material) -> Self {
        match obj::load_obj(path, translation) {
            Ok(data) => Self::from_data(&data, material),
            Err(err) => {
                log::error!("Could not open mesh {path}: {err}; rendering without it");
                Self::new(Vec::new(), material)
            }
        }
    }

    /// Number of triangles in the mesh.
    pub fn triangle_count(&self) -> usize {
        self.bvh.triangle_count()
    }

    /// Access the underlying hierarchy (used by equivalence tests).
    pub fn bvh(&self) -> &BvhNode {
        &self.bvh
    }
}

impl Hittable for Mesh {
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval, rec: &mut HitRecord<'a>) -> bool {
        if !self.bounds.hit(ray) {
            return false;
        }

        let mut candidates = Vec::new();
        self.bvh.collect_candidates(ray, &mut candidates);

        let mut hit_anything = false;
        let mut closest = ray_t.max;

        for triangle in candidates {
            if triangle.hit(ray, Interval::new(ray_t.min, closest), rec) {
                hit_anything = true;
                closest = rec.t;
            }
        }

        if hit_anything {
            // Triangles are anonymous; the mesh supplies the material.
            rec.material = Some(&self.material);
        }

        hit_anything
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumen_math::Vec2;

    fn open_interval() -> Interval {
        Interval::new(0.0, f32::INFINITY)
    }

    /// Axis-aligned cube spanning [-1, 1]^3 as 12 outward-facing triangles.
    fn cube_triangles() -> Vec<Triangle> {
        let p = |x: f32, y: f32, z: f32| Vec3::new(x, y, z);
        let mut tris = Vec::new();
        let mut quad = |a: Vec3, b: Vec3, c: Vec3, d: Vec3| {
            tris.push(Triangle::new(a, b, c));
            tris.push(Triangle::new(a, c, d));
        };

        // Front (z = -1), normal -z
        quad(
            p(-1.0, -1.0, -1.0),
            p(-1.0, 1.0, -1.0),
            p(1.0, 1.0, -1.0),
            p(1.0, -1.0, -1.0),
        );
        // Back (z = 1), normal +z
        quad(
            p(-1.0, -1.0, 1.0),
            p(1.0, -1.0, 1.0),
            p(1.0, 1.0, 1.0),
            p(-1.0, 1.0, 1.0),
        );
        // Left (x = -1), normal -x
        quad(
            p(-1.0, -1.0, -1.0),
            p(-1.0, -1.0, 1.0),
            p(-1.0, 1.0, 1.0),
            p(-1.0, 1.0, -1.0),
        );
        // Right (x = 1), normal +x
        quad(
            p(1.0, -1.0, -1.0),
            p(1.0, 1.0, -1.0),
            p(1.0, 1.0, 1.0),
            p(1.0, -1.0, 1.0),
        );
        // Bottom (y = -1), normal -y
        quad(
            p(-1.0, -1.0, -1.0),
            p(1.0, -1.0, -1.0),
            p(1.0, -1.0, 1.0),
            p(-1.0, -1.0, 1.0),
        );
        // Top (y = 1), normal +y
        quad(
            p(-1.0, 1.0, -1.0),
            p(-1.0, 1.0, 1.0),
            p(1.0, 1.0, 1.0),
            p(1.0, 1.0, -1.0),
        );

        tris
    }

    /// A UV-sphere triangulation centered at `center`.
    fn sphere_triangles(center: Vec3, radius: f32, stacks: usize, slices: usize) -> Vec<Triangle> {
        use std::f32::consts::PI;

        let vertex = |stack: usize, slice: usize| {
            let theta = PI * stack as f32 / stacks as f32;
            let phi = 2.0 * PI * slice as f32 / slices as f32;
            center
                + radius
                    * Vec3::new(
                        theta.sin() * phi.cos(),
                        theta.cos(),
                        theta.sin() * phi.sin(),
                    )
        };

        let mut tris = Vec::new();
        for stack in 0..stacks {
            for slice in 0..slices {
                let a = vertex(stack, slice);
                let b = vertex(stack + 1, slice);
                let c = vertex(stack + 1, slice + 1);
                let d = vertex(stack, slice + 1);
                tris.push(Triangle::new(a, b, c));
                tris.push(Triangle::new(a, c, d));
            }
        }
        tris
    }

    #[test]
    fn test_cube_front_face() {
        let mesh = Mesh::new(cube_triangles(), Material::default());

        let ray = Ray::new(Vec3::new(0.0, 0.0, -5.0), Vec3::Z);
        let mut rec = HitRecord::default();

        assert!(mesh.hit(&ray, open_interval(), &mut rec));
        assert!((rec.t - 4.0).abs() < 1e-4);
        assert!((rec.normal - Vec3::new(0.0, 0.0, -1.0)).length() < 1e-4);
        assert!(rec.material.is_some());
    }

    #[test]
    fn test_bounds_gate_rejects_early() {
        let mesh = Mesh::new(cube_triangles(), Material::default());

        let ray = Ray::new(Vec3::new(0.0, 5.0, -5.0), Vec3::Z);
        let mut rec = HitRecord::default();
        assert!(!mesh.hit(&ray, open_interval(), &mut rec));
    }

    #[test]
    fn test_empty_mesh_never_hits() {
        let mesh = Mesh::new(Vec::new(), Material::default());

        let ray = Ray::new(Vec3::ZERO, Vec3::Z);
        let mut rec = HitRecord::default();
        assert!(!mesh.hit(&ray, open_interval(), &mut rec));
    }

    #[test]
    fn test_missing_obj_yields_empty_mesh() {
        let mesh = Mesh::from_obj_file("/nonexistent/mesh.obj", Vec3::ZERO, Material::default());
        assert_eq!(mesh.triangle_count(), 0);
    }

    #[test]
    fn test_from_data_resolves_attributes() {
        let source = "\
v -1 -1 2
v 1 -1 2
v 0 1 2
vt 0 0
vt 1 0
vt 0.5 1
vn 0 0 -1
s 1
f 1/1/1 2/2/1 3/3/1
";
        let data = lumen_core::obj::parse_obj(source, Vec3::ZERO);
        let mesh = Mesh::from_data(&data, Material::default());
        assert_eq!(mesh.triangle_count(), 1);

        let ray = Ray::new(Vec3::ZERO, Vec3::Z);
        let mut rec = HitRecord::default();
        assert!(mesh.hit(&ray, open_interval(), &mut rec));
        assert!((rec.shading_normal - Vec3::new(0.0, 0.0, -1.0)).length() < 1e-4);
        assert!((rec.uv - Vec2::new(0.5, 1.0 / 3.0)).length() < 1e-3);
    }

    #[test]
    fn test_bvh_matches_brute_force() {
        // Dense enough to force several BVH levels.
        let mesh = Mesh::new(
            sphere_triangles(Vec3::new(0.0, 0.0, 5.0), 1.5, 24, 48),
            Material::default(),
        );
        assert!(mesh.triangle_count() > 2000);

        let mut all = Vec::new();
        mesh.bvh().all_triangles(&mut all);

        // Deterministic bundle of rays through and around the sphere.
        for iy in -6..=6 {
            for ix in -6..=6 {
                let dir = Vec3::new(ix as f32 * 0.08, iy as f32 * 0.08, 1.0).normalize();
                let ray = Ray::new(Vec3::ZERO, dir);

                let mut rec = HitRecord::default();
                let bvh_hit = mesh.hit(&ray, open_interval(), &mut rec);

                // Brute-force closest hit over every triangle
                let mut brute = HitRecord::default();
                let mut brute_hit = false;
                let mut closest = f32::INFINITY;
                for tri in &all {
                    if tri.hit(&ray, Interval::new(0.0, closest), &mut brute) {
                        brute_hit = true;
                        closest = brute.t;
                    }
                }

                assert_eq!(bvh_hit, brute_hit, "ray {dir:?}");
                if bvh_hit {
                    assert!(
                        (rec.t - brute.t).abs() < 1e-6,
                        "ray {dir:?}: bvh t {} vs brute t {}",
                        rec.t,
                        brute.t
                    );
                }
            }
        }
    }

    #[test]
    fn test_closest_of_two_layers() {
        // Two parallel quads; the nearer one must win.
        let mut triangles = Vec::new();
        for z in [3.0, 6.0] {
            triangles.push(Triangle::new(
                Vec3::new(-2.0, -2.0, z),
                Vec3::new(2.0, -2.0, z),
                Vec3::new(0.0, 2.0, z),
            ));
        }
        let mesh = Mesh::new(triangles, Material::default());

        let ray = Ray::new(Vec3::ZERO, Vec3::Z);
        let mut rec = HitRecord::default();
        assert!(mesh.hit(&ray, open_interval(), &mut rec));
        assert!((rec.t - 3.0).abs() < 1e-5);
    }
}
