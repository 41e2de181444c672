//! # Kirana-Geom: Detector Geometry for Track Navigation
//!
//! Immutable description of a tracking detector: a partition of space into
//! volumes, each bounded by portals and populated with sensitive surfaces.
//! The description is plain data — built once, then shared read-only by
//! any number of navigation threads (see the `kirana-nav` crate).
//!
//! ## Quick Start
//!
//! ```rust
//! use kirana_geom::{DetectorBuilder, Point3};
//!
//! // A telescope of three square layers along x, capped by world portals
//! let detector = DetectorBuilder::telescope(&[10.0, 20.0, 30.0], 50.0).unwrap();
//!
//! assert_eq!(detector.n_volumes(), 1);
//! assert_eq!(detector.volume_containing(Point3::new(15.0, 0.0, 0.0)), Some(0));
//! ```
//!
//! ## Architecture
//!
//! - [`algebra`]: scalar, vector, and transform types
//! - [`mask`]: 2D shape masks tested in a surface's local frame
//! - [`bounds`]: axis-aligned boxes for volume containment
//! - [`surface`]: surface records and neighbor-volume links
//! - [`volume`]: volume records with coarse bounds
//! - [`detector`]: the baked, grouped container and its object views
//! - [`builder`]: staged assembly with validation
//!
//! ## Data Layout
//!
//! ```text
//!   DetectorBuilder ──build()──► Detector
//!                                ├─ volumes:    [Volume] ── ranges ──┐
//!                                ├─ sensitives: [Surface]  ◄─────────┤
//!                                ├─ portals:    [Surface]  ◄─────────┘
//!                                ├─ transforms: [Transform3] ◄─ index
//!                                └─ masks:      [Mask]       ◄─ index
//! ```
//!
//! Surfaces reference transforms and masks by index into the shared pools;
//! volumes reference their surfaces by contiguous range. An [`ObjectView`]
//! bundles one volume's objects of one class together with the pools.

pub mod algebra;
pub mod bounds;
pub mod builder;
pub mod detector;
pub mod error;
pub mod mask;
pub mod surface;
pub mod volume;

pub use algebra::{Point2, Point3, Scalar, Transform3, Vec3};
pub use bounds::Aabb3;
pub use builder::{DetectorBuilder, plane_at_x};
pub use detector::{Detector, ObjectView};
pub use error::GeometryError;
pub use mask::Mask;
pub use surface::{Surface, SurfaceId, VolumeLink};
pub use volume::{Volume, VolumeBounds, VolumeIndex};
