//! Detector assembly.
//!
//! The builder stages volumes and surfaces in any order, then bakes them
//! into the grouped, index-linked layout the navigator consumes. Surface
//! ids are assigned in insertion order across both object classes and
//! survive the grouping, so they are stable identifiers for tracing.

use crate::algebra::{Scalar, Transform3, Vec3};
use crate::bounds::Aabb3;
use crate::detector::Detector;
use crate::error::{GeometryError, Result};
use crate::mask::Mask;
use crate::surface::{Surface, SurfaceId, VolumeLink};
use crate::volume::{Volume, VolumeBounds, VolumeIndex};

/// Transform for a plane perpendicular to the global x axis at `x`.
///
/// The plane's local x axis maps to global y, local y to global z.
pub fn plane_at_x(x: Scalar) -> Transform3 {
    Transform3::new(Vec3::new(x, 0.0, 0.0), Vec3::X, Vec3::Y)
}

struct StagedSurface {
    id: SurfaceId,
    volume: VolumeIndex,
    transform: Transform3,
    mask: Mask,
    link: VolumeLink,
}

/// Staged detector description, baked by [`DetectorBuilder::build`].
#[derive(Default)]
pub struct DetectorBuilder {
    volumes: Vec<VolumeBounds>,
    staged: Vec<StagedSurface>,
}

impl DetectorBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a volume and return its index.
    pub fn add_volume(&mut self, bounds: VolumeBounds) -> VolumeIndex {
        self.volumes.push(bounds);
        self.volumes.len() - 1
    }

    /// Add a sensitive surface to a volume and return its stable id.
    pub fn add_sensitive(
        &mut self,
        volume: VolumeIndex,
        transform: Transform3,
        mask: Mask,
    ) -> SurfaceId {
        self.stage(volume, transform, mask, VolumeLink::None)
    }

    /// Add a portal to a volume and return its stable id.
    ///
    /// `link` names the volume on the other side, or [`VolumeLink::World`]
    /// for a world-boundary portal.
    pub fn add_portal(
        &mut self,
        volume: VolumeIndex,
        transform: Transform3,
        mask: Mask,
        link: VolumeLink,
    ) -> SurfaceId {
        self.stage(volume, transform, mask, link)
    }

    fn stage(
        &mut self,
        volume: VolumeIndex,
        transform: Transform3,
        mask: Mask,
        link: VolumeLink,
    ) -> SurfaceId {
        let id = self.staged.len();
        self.staged.push(StagedSurface {
            id,
            volume,
            transform,
            mask,
            link,
        });
        id
    }

    /// Validate the staged description and bake the detector.
    pub fn build(self) -> Result<Detector> {
        let n_volumes = self.volumes.len();
        for staged in &self.staged {
            if staged.volume >= n_volumes {
                return Err(GeometryError::UnknownVolume {
                    surface: staged.id,
                    volume: staged.volume,
                });
            }
            if let VolumeLink::Volume(target) = staged.link
                && target >= n_volumes
            {
                return Err(GeometryError::DanglingPortalLink {
                    surface: staged.id,
                    target,
                });
            }
        }

        let mut volumes = Vec::with_capacity(n_volumes);
        let mut sensitives = Vec::new();
        let mut portals = Vec::new();
        let mut transforms = Vec::new();
        let mut masks = Vec::new();

        // Group surfaces per volume, sensitives first, portals second,
        // preserving insertion order within each group.
        for (index, bounds) in self.volumes.iter().enumerate() {
            let sensitive_start = sensitives.len();
            for staged in self.staged.iter().filter(|s| s.volume == index) {
                if staged.link == VolumeLink::None {
                    sensitives.push(Self::bake(staged, &mut transforms, &mut masks));
                }
            }
            let portal_start = portals.len();
            for staged in self.staged.iter().filter(|s| s.volume == index) {
                if staged.link != VolumeLink::None {
                    portals.push(Self::bake(staged, &mut transforms, &mut masks));
                }
            }
            volumes.push(Volume {
                index,
                bounds: *bounds,
                sensitive_range: sensitive_start..sensitives.len(),
                portal_range: portal_start..portals.len(),
            });
        }

        // Portals partition every volume boundary; a volume nothing can
        // leave is a construction bug. Terminal regions hang off
        // world-boundary portals instead.
        for volume in &volumes {
            if volume.portal_range.is_empty() {
                return Err(GeometryError::UnclosedVolume {
                    volume: volume.index,
                });
            }
        }

        Ok(Detector {
            volumes,
            sensitives,
            portals,
            transforms,
            masks,
        })
    }

    fn bake(
        staged: &StagedSurface,
        transforms: &mut Vec<Transform3>,
        masks: &mut Vec<Mask>,
    ) -> Surface {
        transforms.push(staged.transform);
        masks.push(staged.mask.clone());
        Surface {
            id: staged.id,
            transform: transforms.len() - 1,
            mask: masks.len() - 1,
            volume: staged.volume,
            link: staged.link,
        }
    }

    /// Build a telescope detector: one volume spanning a chain of square
    /// plane layers perpendicular to the x axis, capped by world-boundary
    /// portals one unit before the first and after the last layer.
    pub fn telescope(layer_xs: &[Scalar], half_extent: Scalar) -> Result<Detector> {
        if layer_xs.is_empty() {
            return Err(GeometryError::EmptyTelescope);
        }
        let lo = layer_xs.iter().cloned().fold(Scalar::INFINITY, Scalar::min) - 1.0;
        let hi = layer_xs.iter().cloned().fold(Scalar::NEG_INFINITY, Scalar::max) + 1.0;
        let margin = half_extent + 1.0;

        let mut builder = DetectorBuilder::new();
        let volume = builder.add_volume(VolumeBounds::Cuboid(Aabb3::new(
            Vec3::new(lo, -margin, -margin),
            Vec3::new(hi, margin, margin),
        )));
        let layer_mask = Mask::Rectangle {
            half_x: half_extent,
            half_y: half_extent,
        };
        for &x in layer_xs {
            builder.add_sensitive(volume, plane_at_x(x), layer_mask.clone());
        }
        let cap_mask = Mask::Rectangle {
            half_x: margin,
            half_y: margin,
        };
        builder.add_portal(volume, plane_at_x(lo), cap_mask.clone(), VolumeLink::World);
        builder.add_portal(volume, plane_at_x(hi), cap_mask, VolumeLink::World);
        builder.build()
    }
}
