//! Indexed triangle mesh data.
//!
//! This is the loader-facing mesh representation: flat attribute arrays
//! plus faces that index into them. The renderer resolves it into
//! world-space triangles when an object is built from it.

use lumen_math::{Aabb, Vec2, Vec3};

/// A triangular face referencing mesh attributes by index (0-based).
///
/// Normal and UV indices are optional per face; a face parsed while smooth
/// shading is off carries positions only.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Face {
    pub positions: [usize; 3],
    pub normals: Option<[usize; 3]>,
    pub uvs: Option<[usize; 3]>,
}

/// Mesh attribute arrays plus the faces indexing them.
#[derive(Clone, Debug, Default)]
pub struct MeshData {
    /// Vertex positions
    pub positions: Vec<Vec3>,

    /// Vertex normals (referenced by face normal indices)
    pub normals: Vec<Vec3>,

    /// Texture coordinates (referenced by face UV indices)
    pub uvs: Vec<Vec2>,

    /// Triangular faces
    pub faces: Vec<Face>,
}

impl MeshData {
    /// Create an empty mesh.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of triangles.
    pub fn triangle_count(&self) -> usize {
        self.faces.len()
    }

    /// Check whether the mesh carries no geometry.
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// Compute the bounding box of all vertex positions.
    pub fn bounds(&self) -> Aabb {
        Aabb::from_points(self.positions.iter().copied())
    }
}
