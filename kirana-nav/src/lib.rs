//! # Kirana-Nav: Geometry-Aware Track Navigation
//!
//! The navigation engine for detector traversal. Given a particle track
//! and the immutable detector description from `kirana-geom`, the
//! navigator returns, step by step, the next surface the track will
//! cross, the signed path length to it, and the volume the track
//! currently occupies. Tracks are navigated independently against a
//! shared detector, one navigation state per track.
//!
//! ## Quick Start
//!
//! ```rust
//! use kirana_geom::{DetectorBuilder, Point3, Vec3};
//! use kirana_nav::{FreeTrack, Navigator, NavigationStatus, TrustLevel};
//!
//! let detector = DetectorBuilder::telescope(&[10.0, 20.0, 30.0], 50.0).unwrap();
//! let mut navigator = Navigator::new(&detector);
//! let mut state = navigator.state();
//! let mut track = FreeTrack::new(Point3::new(9.5, 0.0, 0.0), Vec3::X);
//!
//! // One propagation step: status, target, advance
//! navigator.status(&mut state, &track);
//! navigator.target(&mut state, &track);
//! assert_eq!(state.status, NavigationStatus::TowardsSurface);
//! assert!((state.distance_to_next - 0.5).abs() < 1e-9);
//!
//! track.advance(state.distance_to_next);
//! state.downgrade_trust(TrustLevel::High);
//! navigator.status(&mut state, &track);
//! assert_eq!(state.status, NavigationStatus::OnSurface);
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │                   navigator                         │  ← status()/target()
//! │        (bootstrap, trust gating, volume switch)     │
//! └─────────────────────────────────────────────────────┘
//!                          │
//! ┌─────────────────────────────────────────────────────┐
//! │                 cache / state                       │  ← candidates, cursor,
//! │      (sorted candidates, status, trust level)       │    trust hierarchy
//! └─────────────────────────────────────────────────────┘
//!                          │
//! ┌─────────────────────────────────────────────────────┐
//! │               intersectors                          │  ← ray vs plane,
//! │        (plane / cylinder, mask dispatch)            │    ray vs cylinder
//! └─────────────────────────────────────────────────────┘
//!                          │
//! ┌─────────────────────────────────────────────────────┐
//! │               kirana-geom                           │  ← volumes, portals,
//! │    (detector, surfaces, masks, transforms)          │    masks, transforms
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! ## Trust Levels
//!
//! The per-state [`TrustLevel`] encodes how much work the next call may
//! skip: `Full` returns immediately, `High` re-intersects only the cursor
//! candidate, `Fair` re-intersects and re-sorts every cached candidate,
//! `None` rebuilds the caches from scratch. The stepper lowers trust
//! after every advance ([`NavigationState::downgrade_trust`]); a volume
//! switch drops it to `None`.
//!
//! ## Concurrency
//!
//! The detector is shared read-only; every track owns its
//! [`NavigationState`] exclusively. Parallelism is by partitioning tracks
//! across threads — the navigator itself never blocks or suspends.

pub mod cache;
pub mod config;
pub mod inspector;
pub mod intersection;
pub mod intersectors;
pub mod navigator;
pub mod state;
pub mod track;

pub use cache::{CandidateCache, ObjectClass};
pub use config::{ConfigLoadError, NavigationConfig};
pub use inspector::{Inspector, NavigationSnapshot, NoopInspector, RecordingInspector};
pub use intersection::{Intersection, IntersectionStatus};
pub use intersectors::intersect;
pub use navigator::Navigator;
pub use state::{NavigationState, NavigationStatus, TrustLevel};
pub use track::FreeTrack;
