//! The navigator: per-track `status()`/`target()` against a shared detector.
//!
//! Control flow per step of the surrounding propagation loop:
//!
//! ```text
//!   stepper advances track by distance_to_next
//!        │
//!        ▼
//!   status()  ── re-evaluates where we are, promotes to on_surface /
//!        │       on_portal, performs pending volume switches
//!        ▼
//!   target()  ── picks the next candidate, writes distance_to_next
//!        │
//!        ▼
//!   stepper advances again
//! ```
//!
//! The amount of work either call performs is gated by the state's
//! [`TrustLevel`]; see the `state` module. Both calls are total: they never
//! panic in release builds and report every failure through the status.

use log::{debug, trace, warn};

use kirana_geom::{Detector, ObjectView, Scalar, SurfaceId, VolumeLink};

use crate::cache::{CandidateCache, ObjectClass};
use crate::config::NavigationConfig;
use crate::inspector::{Inspector, NoopInspector};
use crate::intersection::IntersectionStatus;
use crate::intersectors::intersect;
use crate::state::{NavigationState, NavigationStatus, TrustLevel};
use crate::track::FreeTrack;

/// The navigation engine. Borrows the detector read-only; one navigator
/// drives any number of tracks, each through its own [`NavigationState`].
pub struct Navigator<'d, I: Inspector = NoopInspector> {
    detector: &'d Detector,
    config: NavigationConfig,
    inspector: I,
}

/// Disjoint mutable views into the scalar navigation fields, so cache and
/// state can be updated side by side.
struct NavFields<'a> {
    distance_to_next: &'a mut Scalar,
    status: &'a mut NavigationStatus,
    current: &'a mut Option<SurfaceId>,
    trust: &'a mut TrustLevel,
    on_tol: Scalar,
}

fn split_for(
    class: ObjectClass,
    state: &mut NavigationState,
) -> (&mut CandidateCache, NavFields<'_>) {
    let NavigationState {
        surface_cache,
        portal_cache,
        distance_to_next,
        status,
        current,
        trust,
        on_surface_tolerance,
        ..
    } = state;
    let cache = match class {
        ObjectClass::Sensitive => surface_cache,
        ObjectClass::Portal => portal_cache,
    };
    (
        cache,
        NavFields {
            distance_to_next,
            status,
            current,
            trust,
            on_tol: *on_surface_tolerance,
        },
    )
}

/// Sort the cache, point the cursor at the head, and derive distance,
/// status, and current surface from it. Trust rises to full.
fn sort_and_set(cache: &mut CandidateCache, nav: &mut NavFields<'_>) -> bool {
    if !cache.sort_and_reset() {
        return false;
    }
    let Some(head) = cache.current() else {
        return false;
    };
    *nav.distance_to_next = head.path;
    if head.path <= nav.on_tol {
        *nav.status = NavigationStatus::on(cache.class);
        *nav.current = Some(head.surface);
    } else {
        *nav.status = NavigationStatus::towards(cache.class);
        *nav.current = None;
    }
    *nav.trust = TrustLevel::Full;
    true
}

impl<'d> Navigator<'d, NoopInspector> {
    /// Navigator with default configuration and no inspector.
    pub fn new(detector: &'d Detector) -> Self {
        Self::with_config(detector, NavigationConfig::default())
    }

    /// Navigator with explicit configuration and no inspector.
    pub fn with_config(detector: &'d Detector, config: NavigationConfig) -> Self {
        Self {
            detector,
            config,
            inspector: NoopInspector,
        }
    }
}

impl<'d, I: Inspector> Navigator<'d, I> {
    /// Navigator with an inspector hook.
    pub fn with_inspector(detector: &'d Detector, config: NavigationConfig, inspector: I) -> Self {
        Self {
            detector,
            config,
            inspector,
        }
    }

    /// A fresh navigation state matching this navigator's configuration.
    pub fn state(&self) -> NavigationState {
        NavigationState::new(&self.config)
    }

    /// The active configuration.
    pub fn config(&self) -> &NavigationConfig {
        &self.config
    }

    /// Read access to the inspector.
    pub fn inspector(&self) -> &I {
        &self.inspector
    }

    /// Consume the navigator and return the inspector.
    pub fn into_inspector(self) -> I {
        self.inspector
    }

    /// Establish the current navigation information: resolve the volume,
    /// refresh the caches up to the trust level, promote reached
    /// candidates to `on_*`, and perform a pending volume switch.
    pub fn status(&mut self, state: &mut NavigationState, track: &FreeTrack) {
        if state.is_terminal() {
            return;
        }
        if !track.is_finite() {
            debug_assert!(track.is_finite(), "non-finite track parameters");
            state.status = NavigationStatus::Abort;
            self.inspector.observe(state);
            return;
        }
        if !self.resolve_volume(state, track) {
            self.inspector.observe(state);
            return;
        }
        if state.trust == TrustLevel::Full {
            // Nothing moved since the last call
            self.inspector.observe(state);
            return;
        }
        if state.trust == TrustLevel::None {
            self.bootstrap(state, track);
            self.inspector.observe(state);
            return;
        }

        // Fair or high trust: surfaces first, portals as fallback
        if !state.surface_cache.is_exhausted()
            && self.update_cache(ObjectClass::Sensitive, state, track)
        {
            self.inspector.observe(state);
            return;
        }
        if self.update_cache(ObjectClass::Portal, state, track) {
            self.check_volume_switch(state);
        } else {
            // Both caches dead: one full re-bootstrap before giving up
            self.bootstrap(state, track);
        }
        self.inspector.observe(state);
    }

    /// Find the next candidate and write the distance to it.
    ///
    /// Returns immediately at full trust. Otherwise performs at most one
    /// cache initialization plus one cache update, per the trust level.
    pub fn target(&mut self, state: &mut NavigationState, track: &FreeTrack) {
        if state.is_terminal() {
            return;
        }
        if state.trust == TrustLevel::Full {
            return;
        }
        if !track.is_finite() {
            debug_assert!(track.is_finite(), "non-finite track parameters");
            state.status = NavigationStatus::Abort;
            self.inspector.observe(state);
            return;
        }
        if !self.resolve_volume(state, track) {
            self.inspector.observe(state);
            return;
        }
        if state.trust == TrustLevel::None {
            self.bootstrap(state, track);
            self.inspector.observe(state);
            return;
        }

        // Fair or high trust
        if !state.surface_cache.is_empty() {
            if state.surface_cache.is_exhausted() {
                // Sensitives are done in this volume; portals take over
                state.surface_cache.clear();
                state.trust = TrustLevel::None;
            } else if self.update_cache(ObjectClass::Sensitive, state, track) {
                self.inspector.observe(state);
                return;
            }
        }
        if !self.update_cache(ObjectClass::Portal, state, track) {
            self.bootstrap(state, track);
        }
        self.inspector.observe(state);
    }

    /// Resolve the current volume: trusted index if valid, otherwise a
    /// containment search. A position outside every volume aborts.
    fn resolve_volume(&self, state: &mut NavigationState, track: &FreeTrack) -> bool {
        match state.volume {
            Some(v) if v < self.detector.n_volumes() => true,
            _ => match self.detector.volume_containing(track.position) {
                Some(v) => {
                    debug!("[Navigator] volume search located volume {v}");
                    state.volume = Some(v);
                    true
                }
                None => {
                    debug!("[Navigator] track outside every volume, aborting");
                    state.status = NavigationStatus::Abort;
                    state.trust = TrustLevel::None;
                    false
                }
            },
        }
    }

    /// Initialize the volume from scratch: sensitives first, portals when
    /// no sensitive candidate remains. An empty candidate set in a closed
    /// volume is a detector-construction bug and aborts.
    fn bootstrap(&self, state: &mut NavigationState, track: &FreeTrack) {
        state.surface_cache.clear();
        state.portal_cache.clear();
        state.current = None;
        let Some(volume) = state.volume else {
            state.status = NavigationStatus::Abort;
            return;
        };
        debug!("[Navigator] bootstrap in volume {volume}");
        if self.initialize_cache(ObjectClass::Sensitive, state, track) {
            return;
        }
        if self.initialize_cache(ObjectClass::Portal, state, track) {
            self.check_volume_switch(state);
            return;
        }
        warn!("[Navigator] no candidates in volume {volume}, aborting");
        state.status = NavigationStatus::Abort;
        state.trust = TrustLevel::None;
    }

    /// Intersect every object of the class and keep the admissible hits.
    fn initialize_cache(
        &self,
        class: ObjectClass,
        state: &mut NavigationState,
        track: &FreeTrack,
    ) -> bool {
        let Some(view) = self.view_of(state, class) else {
            return false;
        };
        let (cache, mut nav) = split_for(class, state);
        cache.clear();
        if view.objects.is_empty() {
            return false;
        }
        cache.candidates.reserve(view.objects.len());
        for (slot, surface) in view.objects.iter().enumerate() {
            let mut candidate = intersect(
                track,
                surface,
                view.transforms,
                view.masks,
                self.config.backstep_tolerance,
                self.config.mask_tolerance,
            );
            candidate.slot = slot;
            if candidate.status == IntersectionStatus::Inside {
                trace!(
                    "[Navigator] admit surface {} at path {:.6}",
                    candidate.surface, candidate.path
                );
                cache.candidates.push(candidate);
            }
        }
        sort_and_set(cache, &mut nav)
    }

    /// Refresh one cache according to the trust level. Returns false when
    /// the cache is dead and the caller must fall back or re-bootstrap.
    fn update_cache(
        &self,
        class: ObjectClass,
        state: &mut NavigationState,
        track: &FreeTrack,
    ) -> bool {
        let cache_empty = match class {
            ObjectClass::Sensitive => state.surface_cache.is_empty(),
            ObjectClass::Portal => state.portal_cache.is_empty(),
        };
        if cache_empty {
            // Lazy fill: the portal cache is only built once sensitives
            // are dealt with
            return self.initialize_cache(class, state, track);
        }

        let Some(view) = self.view_of(state, class) else {
            return false;
        };
        let (cache, mut nav) = split_for(class, state);
        let on_tol = nav.on_tol;

        if *nav.trust >= TrustLevel::High && !cache.is_exhausted() {
            // Only the cursor's distance is stale; advance past lost
            // candidates
            while !cache.is_exhausted() {
                let slot = cache.candidates[cache.next].slot;
                let surface = &view.objects[slot];
                let mut candidate = intersect(
                    track,
                    surface,
                    view.transforms,
                    view.masks,
                    -on_tol,
                    self.config.mask_tolerance,
                );
                candidate.slot = slot;
                if candidate.status == IntersectionStatus::Inside {
                    cache.candidates[cache.next] = candidate;
                    *nav.distance_to_next = candidate.path;
                    if candidate.path <= on_tol {
                        *nav.status = NavigationStatus::on(class);
                        *nav.current = Some(candidate.surface);
                        *nav.trust = TrustLevel::High;
                        if class == ObjectClass::Sensitive {
                            // The crossing is delivered; aim past it on
                            // the next update. The portal cursor stays
                            // put for the volume switch.
                            cache.advance();
                        }
                    } else {
                        *nav.status = NavigationStatus::towards(class);
                        *nav.current = None;
                        *nav.trust = TrustLevel::Full;
                    }
                    return true;
                }
                trace!(
                    "[Navigator] candidate surface {} lost, advancing",
                    candidate.surface
                );
                cache.advance();
            }
            *nav.trust = TrustLevel::None;
            return false;
        }

        if *nav.trust == TrustLevel::Fair {
            // Objects still right, distances stale: re-intersect all and
            // re-sort
            for record in cache.candidates.iter_mut() {
                let slot = record.slot;
                let surface = &view.objects[slot];
                let mut candidate = intersect(
                    track,
                    surface,
                    view.transforms,
                    view.masks,
                    -on_tol,
                    self.config.mask_tolerance,
                );
                candidate.slot = slot;
                *record = candidate;
            }
            cache
                .candidates
                .retain(|c| c.status == IntersectionStatus::Inside);
            if sort_and_set(cache, &mut nav) {
                return true;
            }
            *nav.trust = TrustLevel::None;
            return false;
        }

        // No trust in a populated cache: force a re-initialization
        cache.next = cache.candidates.len();
        *nav.trust = TrustLevel::None;
        false
    }

    /// Perform a pending volume switch when the track sits on a portal.
    fn check_volume_switch(&self, state: &mut NavigationState) {
        if state.status != NavigationStatus::OnPortal {
            return;
        }
        let Some(candidate) = state.portal_cache.current() else {
            state.status = NavigationStatus::Abort;
            return;
        };
        let portal = candidate.surface;
        match candidate.link {
            VolumeLink::World => {
                debug!("[Navigator] leaving the detector through portal {portal}");
                state.status = NavigationStatus::OnTarget;
                state.surface_cache.clear();
                state.portal_cache.clear();
                state.trust = TrustLevel::None;
            }
            VolumeLink::Volume(next) if next < self.detector.n_volumes() => {
                debug!(
                    "[Navigator] volume switch {:?} -> {next} through portal {portal}",
                    state.volume
                );
                state.volume = Some(next);
                state.surface_cache.clear();
                state.portal_cache.clear();
                state.trust = TrustLevel::None;
            }
            link => {
                warn!("[Navigator] portal {portal} carries invalid link {link:?}, aborting");
                state.status = NavigationStatus::Abort;
            }
        }
    }

    fn view_of(&self, state: &NavigationState, class: ObjectClass) -> Option<ObjectView<'d>> {
        let volume = self.detector.volume(state.volume?)?;
        Some(match class {
            ObjectClass::Sensitive => self.detector.sensitives_of(volume),
            ObjectClass::Portal => self.detector.portals_of(volume),
        })
    }
}
