//! Axis-aligned bounding box used for volume containment tests.

use serde::{Deserialize, Serialize};

use crate::algebra::{Point3, Scalar};

/// 3D axis-aligned bounding box.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Aabb3 {
    /// Minimum corner (smallest x, y, and z values).
    pub min: Point3,
    /// Maximum corner (largest x, y, and z values).
    pub max: Point3,
}

impl Aabb3 {
    /// Create a new bounding box from min and max corners.
    #[inline]
    pub const fn new(min: Point3, max: Point3) -> Self {
        Self { min, max }
    }

    /// Create an empty (invalid) bounding box.
    ///
    /// The empty box has min > max, so it will expand to fit any point.
    #[inline]
    pub fn empty() -> Self {
        Self {
            min: Point3::new(Scalar::INFINITY, Scalar::INFINITY, Scalar::INFINITY),
            max: Point3::new(
                Scalar::NEG_INFINITY,
                Scalar::NEG_INFINITY,
                Scalar::NEG_INFINITY,
            ),
        }
    }

    /// Check if the box is empty (invalid).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
    }

    /// Center of the box.
    #[inline]
    pub fn center(&self) -> Point3 {
        (self.min + self.max) * 0.5
    }

    /// Check if a point is inside the box. Faces count as inside.
    #[inline]
    pub fn contains(&self, point: Point3) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
            && point.z >= self.min.z
            && point.z <= self.max.z
    }

    /// Expand the box to include a point.
    #[inline]
    pub fn expand_to_include(&mut self, point: Point3) {
        self.min.x = self.min.x.min(point.x);
        self.min.y = self.min.y.min(point.y);
        self.min.z = self.min.z.min(point.z);
        self.max.x = self.max.x.max(point.x);
        self.max.y = self.max.y.max(point.y);
        self.max.z = self.max.z.max(point.z);
    }

    /// Union of two boxes (smallest box containing both).
    #[inline]
    pub fn union(&self, other: &Aabb3) -> Self {
        if self.is_empty() {
            return *other;
        }
        if other.is_empty() {
            return *self;
        }
        let mut out = *self;
        out.expand_to_include(other.min);
        out.expand_to_include(other.max);
        out
    }
}
