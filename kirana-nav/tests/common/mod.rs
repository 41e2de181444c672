//! Shared fixtures and the propagation harness for the integration tests.
#![allow(dead_code)]

use kirana_geom::{
    Aabb3, Detector, DetectorBuilder, Mask, Point3, Scalar, SurfaceId, VolumeBounds, VolumeLink,
    plane_at_x,
};
use kirana_nav::{FreeTrack, Inspector, NavigationState, Navigator, TrustLevel};

pub const MAX_STEPS: usize = 200;

/// Drive a track through the detector until navigation terminates,
/// advancing by `distance_to_next` the way a line stepper would.
/// Universal invariants are asserted on every live step.
pub fn propagate<I: Inspector>(
    navigator: &mut Navigator<'_, I>,
    state: &mut NavigationState,
    track: &mut FreeTrack,
) {
    for _ in 0..MAX_STEPS {
        navigator.status(state, track);
        if state.is_terminal() {
            return;
        }
        navigator.target(state, track);
        if state.is_terminal() {
            return;
        }

        assert!(
            state.distance_to_next >= 0.0,
            "live target must lie ahead, got {}",
            state.distance_to_next
        );
        assert!(state.distance_to_next.is_finite());
        assert!(state.volume.is_some(), "live state must know its volume");
        assert_caches_sorted(state);
        if state.status.is_on_object() {
            assert!(state.distance_to_next <= state.on_surface_tolerance);
        }

        track.advance(state.distance_to_next);
        state.downgrade_trust(TrustLevel::High);
    }
    panic!("propagation did not terminate within {MAX_STEPS} steps");
}

/// Both caches stay sorted by ascending path length.
pub fn assert_caches_sorted(state: &NavigationState) {
    for cache in [&state.surface_cache, &state.portal_cache] {
        for pair in cache.candidates.windows(2) {
            assert!(
                pair[0].path <= pair[1].path,
                "cache candidates out of order: {} > {}",
                pair[0].path,
                pair[1].path
            );
        }
    }
}

fn box_bounds(x_min: Scalar, x_max: Scalar, half: Scalar) -> VolumeBounds {
    VolumeBounds::Cuboid(Aabb3::new(
        Point3::new(x_min, -half, -half),
        Point3::new(x_max, half, half),
    ))
}

fn square(half: Scalar) -> Mask {
    Mask::Rectangle {
        half_x: half,
        half_y: half,
    }
}

/// Two box volumes side by side along x, joined by a portal pair at the
/// shared boundary and capped by world portals at the outer ends.
pub struct TwoVolumeDetector {
    pub detector: Detector,
    /// Sensitive layer ids in volume 0, in layer order
    pub layers_v0: Vec<SurfaceId>,
    /// Sensitive layer ids in volume 1, in layer order
    pub layers_v1: Vec<SurfaceId>,
    /// Portal from volume 0 into volume 1
    pub portal_01: SurfaceId,
    /// Portal from volume 1 into volume 0
    pub portal_10: SurfaceId,
    /// World portal closing volume 0 at x = 0
    pub world_left: SurfaceId,
    /// World portal closing volume 1 at x = 10
    pub world_right: SurfaceId,
}

/// Volume 0 spans x in [0, 5], volume 1 spans x in [5, 10]; layer planes
/// at the given positions, all masks 5 units half extent.
pub fn two_volume_detector(v0_layers: &[Scalar], v1_layers: &[Scalar]) -> TwoVolumeDetector {
    let mut builder = DetectorBuilder::new();
    let v0 = builder.add_volume(box_bounds(0.0, 5.0, 5.0));
    let v1 = builder.add_volume(box_bounds(5.0, 10.0, 5.0));
    let mask = square(5.0);

    let layers_v0 = v0_layers
        .iter()
        .map(|&x| builder.add_sensitive(v0, plane_at_x(x), mask.clone()))
        .collect();
    let layers_v1 = v1_layers
        .iter()
        .map(|&x| builder.add_sensitive(v1, plane_at_x(x), mask.clone()))
        .collect();

    let portal_01 = builder.add_portal(v0, plane_at_x(5.0), mask.clone(), VolumeLink::Volume(v1));
    let world_left = builder.add_portal(v0, plane_at_x(0.0), mask.clone(), VolumeLink::World);
    let portal_10 = builder.add_portal(v1, plane_at_x(5.0), mask.clone(), VolumeLink::Volume(v0));
    let world_right = builder.add_portal(v1, plane_at_x(10.0), mask, VolumeLink::World);

    TwoVolumeDetector {
        detector: builder.build().unwrap(),
        layers_v0,
        layers_v1,
        portal_01,
        portal_10,
        world_left,
        world_right,
    }
}

/// One box volume with sensitive planes at the given x positions, closed
/// by world portals at the x bounds. Layer ids precede the portal ids.
pub fn single_volume_detector(layer_xs: &[Scalar], x_min: Scalar, x_max: Scalar) -> Detector {
    let mut builder = DetectorBuilder::new();
    let v0 = builder.add_volume(box_bounds(x_min, x_max, 50.0));
    for &x in layer_xs {
        builder.add_sensitive(v0, plane_at_x(x), square(50.0));
    }
    builder.add_portal(v0, plane_at_x(x_min), square(50.0), VolumeLink::World);
    builder.add_portal(v0, plane_at_x(x_max), square(50.0), VolumeLink::World);
    builder.build().unwrap()
}
