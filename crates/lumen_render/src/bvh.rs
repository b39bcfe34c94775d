//! Bounding Volume Hierarchy over mesh triangles.
//!
//! A binary tree of axis-aligned boxes. Construction cycles the split axis
//! with depth and partitions around the mean vertex coordinate; traversal
//! collects the triangles of every leaf whose box the ray enters, leaving
//! the per-triangle tests to the mesh.

use lumen_math::{Aabb, Ray};

use crate::Triangle;

/// Maximum triangles per leaf node before splitting.
const LEAF_MAX: usize = 100;

/// BVH node - either a branch with two children or a leaf with triangles.
pub enum BvhNode {
    /// Internal node with two children.
    Branch {
        left: Box<BvhNode>,
        right: Box<BvhNode>,
        bbox: Aabb,
    },
    /// Leaf node owning a small set of triangles.
    Leaf { triangles: Vec<Triangle>, bbox: Aabb },
}

/// Box around every vertex of a triangle set.
fn bounds_of(triangles: &[Triangle]) -> Aabb {
    Aabb::from_points(
        triangles
            .iter()
            .flat_map(|t| t.vertices().iter().copied()),
    )
}

impl BvhNode {
    /// Build a hierarchy over the given triangles.
    pub fn build(triangles: Vec<Triangle>) -> Self {
        Self::build_on_axis(triangles, 0)
    }

    fn build_on_axis(triangles: Vec<Triangle>, axis: usize) -> Self {
        let bbox = bounds_of(&triangles);

        if triangles.len() <= LEAF_MAX {
            return BvhNode::Leaf { triangles, bbox };
        }

        // Mean vertex coordinate along the split axis.
        let sum: f32 = triangles
            .iter()
            .flat_map(|t| t.vertices().iter())
            .map(|v| v[axis])
            .sum();
        let mean = sum / (triangles.len() * 3) as f32;

        // A triangle goes left when any of its vertices lies left of the
        // mean. Imbalanced splits are accepted; only an empty side stops
        // the recursion.
        let mut left = Vec::new();
        let mut right = Vec::new();
        for triangle in triangles {
            if triangle.vertices().iter().any(|v| v[axis] < mean) {
                left.push(triangle);
            } else {
                right.push(triangle);
            }
        }

        if left.is_empty() {
            return BvhNode::Leaf {
                triangles: right,
                bbox,
            };
        }
        if right.is_empty() {
            return BvhNode::Leaf {
                triangles: left,
                bbox,
            };
        }

        let next = (axis + 1) % 3;
        BvhNode::Branch {
            left: Box::new(Self::build_on_axis(left, next)),
            right: Box::new(Self::build_on_axis(right, next)),
            bbox,
        }
    }

    /// Box enclosing everything below this node.
    pub fn bbox(&self) -> Aabb {
        match self {
            BvhNode::Branch { bbox, .. } => *bbox,
            BvhNode::Leaf { bbox, .. } => *bbox,
        }
    }

    /// Collect candidate triangles for a ray.
    ///
    /// Leaves contribute all their triangles; branches descend into every
    /// child whose box the ray enters.
    pub fn collect_candidates<'a>(&'a self, ray: &Ray, out: &mut Vec<&'a Triangle>) {
        match self {
            BvhNode::Leaf { triangles, .. } => out.extend(triangles.iter()),
            BvhNode::Branch { left, right, .. } => {
                for child in [left.as_ref(), right.as_ref()] {
                    if child.bbox().hit(ray) {
                        child.collect_candidates(ray, out);
                    }
                }
            }
        }
    }

    /// Collect every triangle in the tree.
    pub fn all_triangles<'a>(&'a self, out: &mut Vec<&'a Triangle>) {
        match self {
            BvhNode::Leaf { triangles, .. } => out.extend(triangles.iter()),
            BvhNode::Branch { left, right, .. } => {
                left.all_triangles(out);
                right.all_triangles(out);
            }
        }
    }

    /// Number of triangles stored in the tree.
    pub fn triangle_count(&self) -> usize {
        match self {
            BvhNode::Leaf { triangles, .. } => triangles.len(),
            BvhNode::Branch { left, right, .. } => left.triangle_count() + right.triangle_count(),
        }
    }
}
