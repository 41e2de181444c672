//! The immutable detector container.
//!
//! A detector is a partition of space into volumes. Each volume owns a
//! contiguous slice of sensitive surfaces and a contiguous slice of
//! portals; transforms and masks live in shared pools referenced by index.
//! The container is plain immutable data and can be shared by reference
//! across any number of navigation threads.

use crate::algebra::{Point3, Transform3};
use crate::mask::Mask;
use crate::surface::{Surface, SurfaceId};
use crate::volume::{Volume, VolumeIndex};

/// Immutable detector description. Built once by
/// [`DetectorBuilder`](crate::builder::DetectorBuilder), read-only afterwards.
#[derive(Clone, Debug)]
pub struct Detector {
    pub(crate) volumes: Vec<Volume>,
    pub(crate) sensitives: Vec<Surface>,
    pub(crate) portals: Vec<Surface>,
    pub(crate) transforms: Vec<Transform3>,
    pub(crate) masks: Vec<Mask>,
}

/// View over one object class of one volume: the object slice plus the
/// shared transform and mask pools the objects index into.
#[derive(Clone, Copy, Debug)]
pub struct ObjectView<'a> {
    /// Surfaces of the volume, one object class
    pub objects: &'a [Surface],
    /// Shared transform pool
    pub transforms: &'a [Transform3],
    /// Shared mask pool
    pub masks: &'a [Mask],
}

impl Detector {
    /// Number of volumes.
    #[inline]
    pub fn n_volumes(&self) -> usize {
        self.volumes.len()
    }

    /// Total number of sensitive surfaces.
    #[inline]
    pub fn n_sensitives(&self) -> usize {
        self.sensitives.len()
    }

    /// Total number of portals.
    #[inline]
    pub fn n_portals(&self) -> usize {
        self.portals.len()
    }

    /// All volumes.
    #[inline]
    pub fn volumes(&self) -> &[Volume] {
        &self.volumes
    }

    /// Volume by index.
    #[inline]
    pub fn volume(&self, index: VolumeIndex) -> Option<&Volume> {
        self.volumes.get(index)
    }

    /// Find the volume containing a global point.
    ///
    /// Linear scan over the coarse volume bounds; used only when a
    /// navigation state has no trusted volume.
    pub fn volume_containing(&self, point: Point3) -> Option<VolumeIndex> {
        self.volumes
            .iter()
            .find(|v| v.bounds.contains(point))
            .map(|v| v.index)
    }

    /// Sensitive surfaces of a volume.
    pub fn sensitives_of(&self, volume: &Volume) -> ObjectView<'_> {
        ObjectView {
            objects: &self.sensitives[volume.sensitive_range.clone()],
            transforms: &self.transforms,
            masks: &self.masks,
        }
    }

    /// Portals of a volume.
    pub fn portals_of(&self, volume: &Volume) -> ObjectView<'_> {
        ObjectView {
            objects: &self.portals[volume.portal_range.clone()],
            transforms: &self.transforms,
            masks: &self.masks,
        }
    }

    /// Look up a surface record by its stable id, across both classes.
    pub fn surface(&self, id: SurfaceId) -> Option<&Surface> {
        self.sensitives
            .iter()
            .chain(self.portals.iter())
            .find(|s| s.id == id)
    }
}
