//! Intersection records produced by the kernel and cached as candidates.

use std::cmp::Ordering;

use kirana_geom::{Scalar, SurfaceId, VolumeLink};

/// Outcome of testing one track against one surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IntersectionStatus {
    /// The crossing point lies on the surface's active area.
    Inside,
    /// The geometric crossing exists but the mask rejected it.
    Outside,
    /// No usable geometric crossing (parallel ray, negative discriminant,
    /// or every root below the admission bound).
    Missed,
}

/// One candidate crossing: the signed path length from the track position
/// along the track direction, plus everything needed to act on the hit.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Intersection {
    /// Signed path length to the crossing
    pub path: Scalar,
    /// Kernel verdict
    pub status: IntersectionStatus,
    /// Stable id of the intersected surface
    pub surface: SurfaceId,
    /// Position of the surface in the volume-local object list
    pub slot: usize,
    /// Neighbor-volume link (meaningful for portals only)
    pub link: VolumeLink,
}

impl Intersection {
    /// A missed intersection for the given surface.
    pub fn missed(surface: SurfaceId, link: VolumeLink) -> Self {
        Self {
            path: Scalar::INFINITY,
            status: IntersectionStatus::Missed,
            surface,
            slot: 0,
            link,
        }
    }

    /// Total order used by the candidate caches: ascending path length,
    /// ties broken by ascending surface id for deterministic traversal.
    pub fn order(a: &Self, b: &Self) -> Ordering {
        a.path
            .total_cmp(&b.path)
            .then_with(|| a.surface.cmp(&b.surface))
    }
}
