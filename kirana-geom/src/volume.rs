//! Volume records: bounded regions of space holding surfaces and portals.

use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::algebra::{Point3, Scalar};
use crate::bounds::Aabb3;

/// Stable volume index into the detector's volume list.
pub type VolumeIndex = usize;

/// Coarse volume bounds, used only for containment tests while
/// bootstrapping a navigation state that has no trusted volume.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum VolumeBounds {
    /// Axis-aligned box.
    Cuboid(Aabb3),
    /// Cylindrical shell around the global z axis.
    Cylindrical {
        /// Inner radius
        r_min: Scalar,
        /// Outer radius
        r_max: Scalar,
        /// Lower z edge
        z_min: Scalar,
        /// Upper z edge
        z_max: Scalar,
    },
}

impl VolumeBounds {
    /// Check if a point lies inside the bounds. Boundaries count as inside.
    pub fn contains(&self, point: Point3) -> bool {
        match self {
            VolumeBounds::Cuboid(aabb) => aabb.contains(point),
            VolumeBounds::Cylindrical {
                r_min,
                r_max,
                z_min,
                z_max,
            } => {
                let r = point.perp();
                r >= *r_min && r <= *r_max && point.z >= *z_min && point.z <= *z_max
            }
        }
    }
}

/// Immutable volume record.
///
/// The ranges index into the detector's grouped sensitive and portal
/// storage. The sensitive range may be empty; the builder guarantees a
/// non-empty portal range for every volume.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Volume {
    /// Stable index
    pub index: VolumeIndex,
    /// Coarse bounds for containment tests
    pub bounds: VolumeBounds,
    /// Range into the detector's sensitive-surface storage
    pub sensitive_range: Range<usize>,
    /// Range into the detector's portal storage
    pub portal_range: Range<usize>,
}
