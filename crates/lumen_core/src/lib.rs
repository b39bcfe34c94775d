//! Lumen core - renderer-agnostic assets.
//!
//! This crate provides:
//!
//! - **Mesh data**: indexed triangle soups with optional normals and UVs
//! - **OBJ loading**: a tolerant line-oriented Wavefront parser
//! - **Image textures**: bitmap sampling for color/roughness/occlusion maps
//! - **Procedural textures**: Perlin-based colorings and normal maps

pub mod mesh;
pub mod obj;
pub mod procedural;
pub mod texture;

// Re-export commonly used types
pub use mesh::{Face, MeshData};
pub use obj::{load_obj, parse_obj, ObjError};
pub use texture::{Texture, TextureError, TextureResult};
