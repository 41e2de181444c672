//! Per-track navigation state: status, trust level, and the two caches.

use kirana_geom::{Scalar, SurfaceId, VolumeIndex};

use crate::cache::{CandidateCache, ObjectClass};
use crate::config::NavigationConfig;

/// Coarse label for what the track is currently doing with respect to the
/// nearest object.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavigationStatus {
    /// Initial state, nothing established yet.
    Unknown,
    /// Heading for a sensitive surface.
    TowardsSurface,
    /// Within tolerance of a sensitive surface.
    OnSurface,
    /// Heading for a portal.
    TowardsPortal,
    /// Within tolerance of a portal; a volume switch is pending or was
    /// just performed.
    OnPortal,
    /// Terminal: the track left the detector or an aborter finished it.
    OnTarget,
    /// Terminal: navigation failed.
    Abort,
}

impl NavigationStatus {
    /// Is this a terminal state?
    #[inline]
    pub fn is_terminal(&self) -> bool {
        matches!(self, NavigationStatus::OnTarget | NavigationStatus::Abort)
    }

    /// True while the track sits within tolerance of an object.
    #[inline]
    pub fn is_on_object(&self) -> bool {
        matches!(self, NavigationStatus::OnSurface | NavigationStatus::OnPortal)
    }

    /// State name for logging
    pub fn name(&self) -> &'static str {
        match self {
            NavigationStatus::Unknown => "Unknown",
            NavigationStatus::TowardsSurface => "TowardsSurface",
            NavigationStatus::OnSurface => "OnSurface",
            NavigationStatus::TowardsPortal => "TowardsPortal",
            NavigationStatus::OnPortal => "OnPortal",
            NavigationStatus::OnTarget => "OnTarget",
            NavigationStatus::Abort => "Abort",
        }
    }

    /// The towards-state for an object class.
    #[inline]
    pub(crate) fn towards(class: ObjectClass) -> Self {
        match class {
            ObjectClass::Sensitive => NavigationStatus::TowardsSurface,
            ObjectClass::Portal => NavigationStatus::TowardsPortal,
        }
    }

    /// The on-state for an object class.
    #[inline]
    pub(crate) fn on(class: ObjectClass) -> Self {
        match class {
            ObjectClass::Sensitive => NavigationStatus::OnSurface,
            ObjectClass::Portal => NavigationStatus::OnPortal,
        }
    }
}

/// How much the caches may be trusted relative to the current track, and
/// therefore how much work the next update may skip.
///
/// The ordering is the contract: higher trust means less work. Comparisons
/// use `>=` semantics throughout the navigator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum TrustLevel {
    /// Cache is suspect or empty: full re-initialization.
    None,
    /// Objects still right, distances stale: re-intersect everything.
    Fair,
    /// Order intact, only the cursor's distance stale.
    High,
    /// Nothing to do.
    Full,
}

/// Navigation state of one track. Owned exclusively by that track for the
/// duration of propagation; mutated only by the navigator and by the
/// stepper/aborter hooks below.
#[derive(Clone, Debug)]
pub struct NavigationState {
    /// Current volume, if established
    pub volume: Option<VolumeIndex>,
    /// Candidate cache for sensitive surfaces
    pub surface_cache: CandidateCache,
    /// Candidate cache for portals
    pub portal_cache: CandidateCache,
    /// Path length to the currently targeted candidate
    pub distance_to_next: Scalar,
    /// On-surface tolerance: below this a pending path counts as reached
    pub on_surface_tolerance: Scalar,
    /// Current status
    pub status: NavigationStatus,
    /// The surface currently reached, if any
    pub current: Option<SurfaceId>,
    /// Trust level of the caches
    pub trust: TrustLevel,
}

impl NavigationState {
    /// Fresh state: sentinel volume, empty caches, no trust.
    pub fn new(config: &NavigationConfig) -> Self {
        Self {
            volume: None,
            surface_cache: CandidateCache::new(ObjectClass::Sensitive),
            portal_cache: CandidateCache::new(ObjectClass::Portal),
            distance_to_next: Scalar::INFINITY,
            on_surface_tolerance: config.on_surface_tolerance,
            status: NavigationStatus::Unknown,
            current: None,
            trust: TrustLevel::None,
        }
    }

    /// Lower the trust level; never raises it.
    ///
    /// The stepper calls this with [`TrustLevel::High`] after advancing
    /// the track, or [`TrustLevel::Fair`] after a step large enough to
    /// reorder candidates.
    #[inline]
    pub fn downgrade_trust(&mut self, level: TrustLevel) {
        self.trust = self.trust.min(level);
    }

    /// Aborter hook: finish navigation successfully.
    pub fn flag_on_target(&mut self) {
        self.status = NavigationStatus::OnTarget;
    }

    /// Aborter hook: fail navigation.
    pub fn flag_abort(&mut self) {
        self.status = NavigationStatus::Abort;
    }

    /// True if navigation has terminated.
    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trust_ordering() {
        assert!(TrustLevel::None < TrustLevel::Fair);
        assert!(TrustLevel::Fair < TrustLevel::High);
        assert!(TrustLevel::High < TrustLevel::Full);
        assert!(TrustLevel::Full >= TrustLevel::High);
    }

    #[test]
    fn test_downgrade_trust_never_raises() {
        let mut state = NavigationState::new(&NavigationConfig::default());
        state.trust = TrustLevel::Fair;

        state.downgrade_trust(TrustLevel::High);
        assert_eq!(state.trust, TrustLevel::Fair);

        state.downgrade_trust(TrustLevel::None);
        assert_eq!(state.trust, TrustLevel::None);
    }

    #[test]
    fn test_fresh_state() {
        let state = NavigationState::new(&NavigationConfig::default());

        assert_eq!(state.volume, None);
        assert_eq!(state.status, NavigationStatus::Unknown);
        assert_eq!(state.trust, TrustLevel::None);
        assert!(state.distance_to_next.is_infinite());
        assert!(state.surface_cache.is_empty());
        assert!(state.portal_cache.is_empty());
    }

    #[test]
    fn test_terminal_states() {
        assert!(NavigationStatus::OnTarget.is_terminal());
        assert!(NavigationStatus::Abort.is_terminal());
        assert!(!NavigationStatus::OnPortal.is_terminal());
        assert!(!NavigationStatus::Unknown.is_terminal());
    }

    #[test]
    fn test_aborter_hooks() {
        let mut state = NavigationState::new(&NavigationConfig::default());

        state.flag_on_target();
        assert!(state.is_terminal());

        let mut state = NavigationState::new(&NavigationConfig::default());
        state.flag_abort();
        assert_eq!(state.status, NavigationStatus::Abort);
    }

    #[test]
    fn test_status_names() {
        assert_eq!(NavigationStatus::TowardsSurface.name(), "TowardsSurface");
        assert_eq!(NavigationStatus::OnPortal.name(), "OnPortal");
    }
}
