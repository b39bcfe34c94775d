//! Tolerant Wavefront OBJ loading.
//!
//! Line-oriented parser for the subset of OBJ this renderer consumes:
//! `v`, `vn`, `vt`, `s` and triangular `f` directives. Anything else is
//! skipped, as is any line that fails to parse; a damaged file degrades
//! into a smaller mesh instead of an error.

use std::path::Path;

use lumen_math::{Vec2, Vec3};
use thiserror::Error;

use crate::mesh::{Face, MeshData};

/// Errors that can occur while loading an OBJ file.
///
/// Parse problems are not errors: bad lines are dropped. Only the file
/// itself failing to open/read surfaces here.
#[derive(Error, Debug)]
pub enum ObjError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for OBJ loading.
pub type ObjResult<T> = Result<T, ObjError>;

/// Load an OBJ file into mesh data.
///
/// `translation` is added to every vertex position and vertex normal on
/// load, so meshes can be placed without a per-object transform.
pub fn load_obj<P: AsRef<Path>>(path: P, translation: Vec3) -> ObjResult<MeshData> {
    let source = std::fs::read_to_string(path.as_ref())?;
    let mesh = parse_obj(&source, translation);

    log::info!(
        "Loaded {}: {} vertices, {} triangles",
        path.as_ref().display(),
        mesh.positions.len(),
        mesh.triangle_count()
    );

    Ok(mesh)
}

/// Parse OBJ source text into mesh data. Never fails; unparseable lines
/// are skipped.
pub fn parse_obj(source: &str, translation: Vec3) -> MeshData {
    let mut mesh = MeshData::new();
    // Smooth shading state: faces emitted while off drop their normal refs.
    let mut smooth = false;

    for line in source.lines() {
        let mut tokens = line.split_whitespace();
        match tokens.next() {
            Some("v") => {
                if let Some(p) = parse_vec3(&mut tokens) {
                    mesh.positions.push(p + translation);
                }
            }
            Some("vn") => {
                if let Some(n) = parse_vec3(&mut tokens) {
                    mesh.normals.push(n + translation);
                }
            }
            Some("vt") => {
                if let Some(uv) = parse_vec2(&mut tokens) {
                    mesh.uvs.push(uv);
                }
            }
            Some("s") => {
                if let Some(flag) = tokens.next().and_then(|t| t.parse::<i32>().ok()) {
                    smooth = flag != 0;
                }
            }
            Some("f") => {
                if let Some(face) = parse_face(&mut tokens, &mesh, smooth) {
                    mesh.faces.push(face);
                }
            }
            _ => {} // comment, group, material, blank - skipped
        }
    }

    mesh
}

fn parse_vec3<'a, I: Iterator<Item = &'a str>>(tokens: &mut I) -> Option<Vec3> {
    let x = tokens.next()?.parse().ok()?;
    let y = tokens.next()?.parse().ok()?;
    let z = tokens.next()?.parse().ok()?;
    Some(Vec3::new(x, y, z))
}

fn parse_vec2<'a, I: Iterator<Item = &'a str>>(tokens: &mut I) -> Option<Vec2> {
    let u = tokens.next()?.parse().ok()?;
    let v = tokens.next()?.parse().ok()?;
    Some(Vec2::new(u, v))
}

/// One corner of a face: `i`, `i//n`, `i/t` or `i/t/n`, all 1-based.
struct FaceRef {
    position: usize,
    uv: Option<usize>,
    normal: Option<usize>,
}

fn parse_face_ref(token: &str, mesh: &MeshData) -> Option<FaceRef> {
    let mut parts = token.split('/');

    let position = resolve_index(parts.next()?, mesh.positions.len())?;
    let uv = match parts.next() {
        Some("") | None => None,
        Some(t) => Some(resolve_index(t, mesh.uvs.len())?),
    };
    let normal = match parts.next() {
        Some("") | None => None,
        Some(t) => Some(resolve_index(t, mesh.normals.len())?),
    };

    Some(FaceRef {
        position,
        uv,
        normal,
    })
}

/// Convert a 1-based index token into a 0-based index, rejecting zero and
/// out-of-range references.
fn resolve_index(token: &str, len: usize) -> Option<usize> {
    let idx: usize = token.parse().ok()?;
    if idx >= 1 && idx <= len {
        Some(idx - 1)
    } else {
        None
    }
}

fn parse_face<'a, I: Iterator<Item = &'a str>>(
    tokens: &mut I,
    mesh: &MeshData,
    smooth: bool,
) -> Option<Face> {
    let a = parse_face_ref(tokens.next()?, mesh)?;
    let b = parse_face_ref(tokens.next()?, mesh)?;
    let c = parse_face_ref(tokens.next()?, mesh)?;

    let normals = if smooth {
        match (a.normal, b.normal, c.normal) {
            (Some(na), Some(nb), Some(nc)) => Some([na, nb, nc]),
            _ => None,
        }
    } else {
        None
    };

    let uvs = match (a.uv, b.uv, c.uv) {
        (Some(ta), Some(tb), Some(tc)) => Some([ta, tb, tc]),
        _ => None,
    };

    Some(Face {
        positions: [a.position, b.position, c.position],
        normals,
        uvs,
    })
}
