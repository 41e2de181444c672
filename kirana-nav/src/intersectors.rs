//! The intersection kernel: ray against one surface.
//!
//! Planar masks (rectangle, trapezoid, annulus, polygon) solve the linear
//! plane equation; cylinder masks solve the quadratic around the local z
//! axis. The crossing point is taken to the surface-local frame and tested
//! against the mask in its natural coordinates.
//!
//! `min_path` is the admission bound on the signed path length. Cache
//! initialization passes the (strictly positive) backstep tolerance so a
//! just-crossed surface is never re-detected as the nearest candidate;
//! cursor re-intersection passes `-on_surface_tolerance` so a candidate
//! the stepper has just reached still reports [`IntersectionStatus::Inside`].

use kirana_geom::{Mask, Point2, Scalar, Surface, Transform3};

use crate::intersection::{Intersection, IntersectionStatus};
use crate::track::FreeTrack;

/// Below this the ray is treated as parallel to the surface.
const PARALLEL_TOLERANCE: Scalar = 1e-12;

/// Intersect a track with a surface and test the mask.
///
/// The returned record carries the surface's stable id and neighbor link;
/// the caller fills in the cache slot.
pub fn intersect(
    track: &FreeTrack,
    surface: &Surface,
    transforms: &[Transform3],
    masks: &[Mask],
    min_path: Scalar,
    mask_tol: Scalar,
) -> Intersection {
    let transform = &transforms[surface.transform];
    let mask = &masks[surface.mask];
    match mask {
        Mask::Cylinder { radius, .. } => {
            intersect_cylinder(track, surface, transform, mask, *radius, min_path, mask_tol)
        }
        _ => intersect_plane(track, surface, transform, mask, min_path, mask_tol),
    }
}

fn intersect_plane(
    track: &FreeTrack,
    surface: &Surface,
    transform: &Transform3,
    mask: &Mask,
    min_path: Scalar,
    mask_tol: Scalar,
) -> Intersection {
    let normal = transform.normal();
    let denom = normal.dot(&track.direction);
    if denom.abs() < PARALLEL_TOLERANCE {
        return Intersection::missed(surface.id, surface.link);
    }
    let path = normal.dot(&(transform.translation() - track.position)) / denom;
    if path < min_path {
        return Intersection::missed(surface.id, surface.link);
    }

    let crossing = track.position + track.direction * path;
    let local = transform.point_to_local(crossing);
    let local2 = match mask {
        // The annulus mask reads polar coordinates
        Mask::Annulus { .. } => Point2::new(local.perp(), local.y.atan2(local.x)),
        _ => Point2::new(local.x, local.y),
    };
    let status = if mask.contains(local2, mask_tol) {
        IntersectionStatus::Inside
    } else {
        IntersectionStatus::Outside
    };
    Intersection {
        path,
        status,
        surface: surface.id,
        slot: 0,
        link: surface.link,
    }
}

fn intersect_cylinder(
    track: &FreeTrack,
    surface: &Surface,
    transform: &Transform3,
    mask: &Mask,
    radius: Scalar,
    min_path: Scalar,
    mask_tol: Scalar,
) -> Intersection {
    let pos = transform.point_to_local(track.position);
    let dir = transform.vector_to_local(track.direction);

    // Quadratic in the local x-y plane: |pos_perp + t * dir_perp| = radius
    let a = dir.x * dir.x + dir.y * dir.y;
    if a < PARALLEL_TOLERANCE {
        // Running along the axis
        return Intersection::missed(surface.id, surface.link);
    }
    let b = 2.0 * (pos.x * dir.x + pos.y * dir.y);
    let c = pos.x * pos.x + pos.y * pos.y - radius * radius;
    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 {
        return Intersection::missed(surface.id, surface.link);
    }

    // Smallest root above the admission bound
    let sqrt_d = discriminant.sqrt();
    let t_near = (-b - sqrt_d) / (2.0 * a);
    let t_far = (-b + sqrt_d) / (2.0 * a);
    let path = if t_near >= min_path {
        t_near
    } else if t_far >= min_path {
        t_far
    } else {
        return Intersection::missed(surface.id, surface.link);
    };

    let crossing = pos + dir * path;
    let local2 = Point2::new(radius * crossing.y.atan2(crossing.x), crossing.z);
    let status = if mask.contains(local2, mask_tol) {
        IntersectionStatus::Inside
    } else {
        IntersectionStatus::Outside
    };
    Intersection {
        path,
        status,
        surface: surface.id,
        slot: 0,
        link: surface.link,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use kirana_geom::{Point3, Vec3, VolumeLink, plane_at_x};

    const BACKSTEP: Scalar = 1e-7;
    const MASK_TOL: Scalar = 1e-5;

    fn surface_with(transform: usize, mask: usize) -> Surface {
        Surface {
            id: 0,
            transform,
            mask,
            volume: 0,
            link: VolumeLink::None,
        }
    }

    fn plane_fixture(x: Scalar, mask: Mask) -> (Vec<Transform3>, Vec<Mask>, Surface) {
        (vec![plane_at_x(x)], vec![mask], surface_with(0, 0))
    }

    #[test]
    fn test_plane_head_on() {
        let (transforms, masks, surface) = plane_fixture(
            10.0,
            Mask::Rectangle {
                half_x: 5.0,
                half_y: 5.0,
            },
        );
        let track = FreeTrack::new(Point3::ZERO, Vec3::X);

        let hit = intersect(&track, &surface, &transforms, &masks, BACKSTEP, MASK_TOL);

        assert_eq!(hit.status, IntersectionStatus::Inside);
        assert_relative_eq!(hit.path, 10.0, epsilon = 1e-12);
    }

    #[test]
    fn test_plane_oblique() {
        let (transforms, masks, surface) = plane_fixture(
            10.0,
            Mask::Rectangle {
                half_x: 20.0,
                half_y: 20.0,
            },
        );
        let track = FreeTrack::new(Point3::ZERO, Vec3::new(1.0, 1.0, 0.0));

        let hit = intersect(&track, &surface, &transforms, &masks, BACKSTEP, MASK_TOL);

        assert_eq!(hit.status, IntersectionStatus::Inside);
        assert_relative_eq!(hit.path, 10.0 * (2.0 as Scalar).sqrt(), epsilon = 1e-9);
    }

    #[test]
    fn test_plane_parallel_misses() {
        let (transforms, masks, surface) = plane_fixture(
            10.0,
            Mask::Rectangle {
                half_x: 5.0,
                half_y: 5.0,
            },
        );
        let track = FreeTrack::new(Point3::ZERO, Vec3::Y);

        let hit = intersect(&track, &surface, &transforms, &masks, BACKSTEP, MASK_TOL);

        assert_eq!(hit.status, IntersectionStatus::Missed);
    }

    #[test]
    fn test_plane_behind_admission_bound() {
        let (transforms, masks, surface) = plane_fixture(
            -3.0,
            Mask::Rectangle {
                half_x: 5.0,
                half_y: 5.0,
            },
        );
        let track = FreeTrack::new(Point3::ZERO, Vec3::X);

        let hit = intersect(&track, &surface, &transforms, &masks, BACKSTEP, MASK_TOL);

        assert_eq!(hit.status, IntersectionStatus::Missed);
    }

    #[test]
    fn test_plane_on_surface_accepted_with_negative_bound() {
        // Cursor re-intersection: the track sits on the surface
        let (transforms, masks, surface) = plane_fixture(
            5.0,
            Mask::Rectangle {
                half_x: 5.0,
                half_y: 5.0,
            },
        );
        let track = FreeTrack::new(Point3::new(5.0, 0.0, 0.0), Vec3::X);

        let hit = intersect(&track, &surface, &transforms, &masks, -MASK_TOL, MASK_TOL);

        assert_eq!(hit.status, IntersectionStatus::Inside);
        assert_relative_eq!(hit.path, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_plane_mask_rejects() {
        let (transforms, masks, surface) = plane_fixture(
            10.0,
            Mask::Rectangle {
                half_x: 1.0,
                half_y: 1.0,
            },
        );
        let track = FreeTrack::new(Point3::new(0.0, 3.0, 0.0), Vec3::X);

        let hit = intersect(&track, &surface, &transforms, &masks, BACKSTEP, MASK_TOL);

        assert_eq!(hit.status, IntersectionStatus::Outside);
        assert_relative_eq!(hit.path, 10.0, epsilon = 1e-12);
    }

    #[test]
    fn test_annulus_polar_test() {
        let (transforms, masks, surface) = plane_fixture(
            10.0,
            Mask::Annulus {
                r_min: 1.0,
                r_max: 3.0,
            },
        );
        // Crosses the plane at local radius 2
        let inside = FreeTrack::new(Point3::new(0.0, 2.0, 0.0), Vec3::X);
        let in_bore = FreeTrack::new(Point3::ZERO, Vec3::X);

        let hit = intersect(&inside, &surface, &transforms, &masks, BACKSTEP, MASK_TOL);
        assert_eq!(hit.status, IntersectionStatus::Inside);

        let miss = intersect(&in_bore, &surface, &transforms, &masks, BACKSTEP, MASK_TOL);
        assert_eq!(miss.status, IntersectionStatus::Outside);
    }

    fn cylinder_fixture(radius: Scalar, half_z: Scalar) -> (Vec<Transform3>, Vec<Mask>, Surface) {
        (
            vec![Transform3::identity()],
            vec![Mask::Cylinder { radius, half_z }],
            surface_with(0, 0),
        )
    }

    #[test]
    fn test_cylinder_from_inside() {
        let (transforms, masks, surface) = cylinder_fixture(4.0, 10.0);
        let track = FreeTrack::new(Point3::ZERO, Vec3::X);

        let hit = intersect(&track, &surface, &transforms, &masks, BACKSTEP, MASK_TOL);

        assert_eq!(hit.status, IntersectionStatus::Inside);
        assert_relative_eq!(hit.path, 4.0, epsilon = 1e-12);
    }

    #[test]
    fn test_cylinder_from_outside_picks_near_root() {
        let (transforms, masks, surface) = cylinder_fixture(4.0, 10.0);
        let track = FreeTrack::new(Point3::new(-10.0, 0.0, 0.0), Vec3::X);

        let hit = intersect(&track, &surface, &transforms, &masks, BACKSTEP, MASK_TOL);

        assert_eq!(hit.status, IntersectionStatus::Inside);
        assert_relative_eq!(hit.path, 6.0, epsilon = 1e-12);
    }

    #[test]
    fn test_cylinder_grazing_keeps_root_beyond_backstep() {
        // Track a hair inside the wall, pointing tangentially: both roots
        // straddle the origin at ±sqrt(2 r gap). Only the forward root
        // clears the admission bound; the backward one is discarded.
        let (transforms, masks, surface) = cylinder_fixture(4.0, 10.0);
        let track = FreeTrack::new(Point3::new(4.0 - 1e-6, 0.0, 0.0), Vec3::Y);

        let hit = intersect(&track, &surface, &transforms, &masks, BACKSTEP, MASK_TOL);

        assert_eq!(hit.status, IntersectionStatus::Inside);
        assert!(hit.path > BACKSTEP);
        assert!(hit.path < 3e-3);
    }

    #[test]
    fn test_cylinder_both_roots_behind() {
        let (transforms, masks, surface) = cylinder_fixture(4.0, 10.0);
        let track = FreeTrack::new(Point3::new(10.0, 0.0, 0.0), Vec3::X);

        let hit = intersect(&track, &surface, &transforms, &masks, BACKSTEP, MASK_TOL);

        assert_eq!(hit.status, IntersectionStatus::Missed);
    }

    #[test]
    fn test_cylinder_along_axis_misses() {
        let (transforms, masks, surface) = cylinder_fixture(4.0, 10.0);
        let track = FreeTrack::new(Point3::ZERO, Vec3::Z);

        let hit = intersect(&track, &surface, &transforms, &masks, BACKSTEP, MASK_TOL);

        assert_eq!(hit.status, IntersectionStatus::Missed);
    }

    #[test]
    fn test_cylinder_z_mask_rejects() {
        let (transforms, masks, surface) = cylinder_fixture(4.0, 1.0);
        let track = FreeTrack::new(Point3::new(0.0, 0.0, 5.0), Vec3::X);

        let hit = intersect(&track, &surface, &transforms, &masks, BACKSTEP, MASK_TOL);

        assert_eq!(hit.status, IntersectionStatus::Outside);
    }
}
