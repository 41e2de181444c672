//! Inspector hook: a read-only observer of the navigation state.
//!
//! The navigator invokes the inspector once after every `status()` and
//! `target()` call that did any work. Inspectors may accumulate their own
//! data but can never mutate the state (they only receive `&state`).

use kirana_geom::{Scalar, SurfaceId, VolumeIndex};

use crate::state::{NavigationState, NavigationStatus, TrustLevel};

/// Observer plugged into a navigator.
pub trait Inspector {
    /// Called after every state mutation; must be cheap.
    fn observe(&mut self, state: &NavigationState);
}

/// Production default: does nothing.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopInspector;

impl Inspector for NoopInspector {
    #[inline]
    fn observe(&mut self, _state: &NavigationState) {}
}

/// One observed state, copied out of the navigation state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NavigationSnapshot {
    /// Volume at observation time
    pub volume: Option<VolumeIndex>,
    /// Status at observation time
    pub status: NavigationStatus,
    /// Distance to the targeted candidate
    pub distance_to_next: Scalar,
    /// Surface reached, if any
    pub current: Option<SurfaceId>,
    /// Trust level
    pub trust: TrustLevel,
}

/// Test-time tracer aggregating every observation into a vector.
#[derive(Clone, Debug, Default)]
pub struct RecordingInspector {
    /// All observations in order
    pub snapshots: Vec<NavigationSnapshot>,
}

impl Inspector for RecordingInspector {
    fn observe(&mut self, state: &NavigationState) {
        self.snapshots.push(NavigationSnapshot {
            volume: state.volume,
            status: state.status,
            distance_to_next: state.distance_to_next,
            current: state.current,
            trust: state.trust,
        });
    }
}

impl RecordingInspector {
    /// The ordered list of (volume, surface) crossings: every observation
    /// where the track sat on a sensitive surface or a portal.
    ///
    /// Portal crossings report the volume already switched to, since the
    /// observation happens after the switch.
    pub fn crossings(&self) -> Vec<(VolumeIndex, SurfaceId)> {
        self.snapshots
            .iter()
            .filter(|s| s.status.is_on_object())
            .filter_map(|s| Some((s.volume?, s.current?)))
            .collect()
    }

    /// Number of observations so far.
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// True if nothing was observed yet.
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}
