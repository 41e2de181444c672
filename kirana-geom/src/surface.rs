//! Surface records: sensitive surfaces and portals.

use serde::{Deserialize, Serialize};

use crate::volume::VolumeIndex;

/// Stable surface identifier, assigned by the builder in insertion order
/// across both object classes.
pub type SurfaceId = usize;

/// Link carried by a surface to the volume on its other side.
///
/// Sensitive surfaces carry no link; portals link to their neighbor volume
/// or to the world boundary.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum VolumeLink {
    /// No link: a sensitive surface.
    None,
    /// Portal into the volume with this index.
    Volume(VolumeIndex),
    /// World-boundary portal: crossing it leaves the detector.
    World,
}

/// Immutable surface record.
///
/// The transform and mask are referenced by index into the detector's
/// shared pools, so transforms can be reused across surfaces.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Surface {
    /// Stable identifier
    pub id: SurfaceId,
    /// Index into the detector's transform pool
    pub transform: usize,
    /// Index into the detector's mask pool
    pub mask: usize,
    /// Owning volume
    pub volume: VolumeIndex,
    /// Neighbor link (portals only)
    pub link: VolumeLink,
}

impl Surface {
    /// True if this surface is a portal.
    #[inline]
    pub fn is_portal(&self) -> bool {
        !matches!(self.link, VolumeLink::None)
    }
}
