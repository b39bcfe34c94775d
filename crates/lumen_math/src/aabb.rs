use crate::{Interval, Ray, Vec3};

/// Axis-Aligned Bounding Box for spatial acceleration structures (BVH).
///
/// An AABB is defined by three intervals (one per axis) that bound a 3D volume.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Aabb {
    pub x: Interval,
    pub y: Interval,
    pub z: Interval,
}

/// Result of a ray/box intersection: entry distance and the face normal of
/// the entry axis (pointing along the negative axis direction).
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct AabbHit {
    pub t_enter: f32,
    pub normal: Vec3,
}

impl Aabb {
    /// Create a new AABB from three intervals.
    pub fn new(x: Interval, y: Interval, z: Interval) -> Self {
        Self { x, y, z }
    }

    /// Create an AABB from two corner points.
    pub fn from_corners(a: Vec3, b: Vec3) -> Self {
        Self {
            x: Interval::new(a.x.min(b.x), a.x.max(b.x)),
            y: Interval::new(a.y.min(b.y), a.y.max(b.y)),
            z: Interval::new(a.z.min(b.z), a.z.max(b.z)),
        }
    }

    /// Create an AABB enclosing a set of points.
    ///
    /// Returns `Aabb::EMPTY` for an empty set.
    pub fn from_points<I: IntoIterator<Item = Vec3>>(points: I) -> Self {
        let mut min = Vec3::splat(f32::INFINITY);
        let mut max = Vec3::splat(f32::NEG_INFINITY);
        let mut any = false;

        for p in points {
            min = min.min(p);
            max = max.max(p);
            any = true;
        }

        if any {
            Self::from_corners(min, max)
        } else {
            Self::EMPTY
        }
    }

    /// Create an AABB that surrounds two other AABBs.
    pub fn surrounding(a: &Aabb, b: &Aabb) -> Self {
        Self {
            x: Interval::surrounding(&a.x, &b.x),
            y: Interval::surrounding(&a.y, &b.y),
            z: Interval::surrounding(&a.z, &b.z),
        }
    }

    /// Minimum corner.
    pub fn min_corner(&self) -> Vec3 {
        Vec3::new(self.x.min, self.y.min, self.z.min)
    }

    /// Maximum corner.
    pub fn max_corner(&self) -> Vec3 {
        Vec3::new(self.x.max, self.y.max, self.z.max)
    }

    /// Returns the center point of the bounding box.
    pub fn centroid(&self) -> Vec3 {
        (self.min_corner() + self.max_corner()) * 0.5
    }

    /// Returns true if `other` lies entirely inside this box.
    pub fn encloses(&self, other: &Aabb) -> bool {
        self.x.min <= other.x.min
            && self.x.max >= other.x.max
            && self.y.min <= other.y.min
            && self.y.max >= other.y.max
            && self.z.min <= other.z.min
            && self.z.max >= other.z.max
    }

    /// Test a ray against this AABB with the slab method.
    ///
    /// Per axis the entry/exit distances are ordered; the box interval is
    /// `t_enter = max(nears)`, `t_exit = min(fars)`. Misses when the interval
    /// is inverted or lies entirely behind the origin. The returned normal is
    /// the face of the entry axis.
    pub fn intersect(&self, ray: &Ray) -> Option<AabbHit> {
        let mut t_enter = f32::NEG_INFINITY;
        let mut t_exit = f32::INFINITY;
        let mut entry_axis = 0;

        for (axis, slab) in [self.x, self.y, self.z].iter().enumerate() {
            let origin = ray.origin[axis];
            let inv = 1.0 / ray.direction[axis];

            let mut t_near = (slab.min - origin) * inv;
            let mut t_far = (slab.max - origin) * inv;
            if inv < 0.0 {
                std::mem::swap(&mut t_near, &mut t_far);
            }

            if t_near > t_enter {
                t_enter = t_near;
                entry_axis = axis;
            }
            t_exit = t_exit.min(t_far);
        }

        if t_enter > t_exit || t_exit < 0.0 {
            return None;
        }

        let mut normal = Vec3::ZERO;
        normal[entry_axis] = -1.0;

        Some(AabbHit { t_enter, normal })
    }

    /// Convenience boolean form of `intersect`.
    pub fn hit(&self, ray: &Ray) -> bool {
        self.intersect(ray).is_some()
    }

    /// An empty AABB (contains nothing).
    pub const EMPTY: Aabb = Aabb {
        x: Interval::EMPTY,
        y: Interval::EMPTY,
        z: Interval::EMPTY,
    };
}
