//! Shape masks tested in a surface's local frame.
//!
//! A mask bounds the active area of a surface. Intersection points are
//! transformed into the surface-local frame first; the mask then decides
//! whether the crossing is inside the active area. Boundary points count as
//! inside: every test widens the shape by the given tolerance.
//!
//! Each variant has its natural local coordinates:
//! - [`Mask::Rectangle`], [`Mask::Trapezoid`], [`Mask::Polygon`]:
//!   cartesian `(x, y)`
//! - [`Mask::Annulus`]: polar `(r, phi)`
//! - [`Mask::Cylinder`]: cylindrical `(r*phi, z)`

use serde::{Deserialize, Serialize};

use crate::algebra::{Point2, Scalar};

/// Shape mask, dispatched by variant in the intersection kernel.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Mask {
    /// Axis-aligned rectangle with half lengths along local x and y.
    Rectangle {
        /// Half length along local x
        half_x: Scalar,
        /// Half length along local y
        half_y: Scalar,
    },

    /// Symmetric trapezoid; the allowed |x| interpolates linearly in y.
    Trapezoid {
        /// Half length along x at y = -half_y
        half_x_min_y: Scalar,
        /// Half length along x at y = +half_y
        half_x_max_y: Scalar,
        /// Half length along y
        half_y: Scalar,
    },

    /// Ring between two radii, full azimuthal coverage. A disk is an
    /// annulus with `r_min = 0`.
    Annulus {
        /// Inner radius
        r_min: Scalar,
        /// Outer radius
        r_max: Scalar,
    },

    /// Cylinder section around the local z axis. The radius fixes the
    /// intersection; the mask bounds the z extent.
    Cylinder {
        /// Cylinder radius
        radius: Scalar,
        /// Half length along the axis
        half_z: Scalar,
    },

    /// Simple polygon in the local x-y plane, listed as a closed loop of
    /// vertices (last connects back to first).
    Polygon {
        /// Polygon vertices
        vertices: Vec<Point2>,
    },
}

impl Mask {
    /// Test a local-frame point against the mask, widened by `tol`.
    ///
    /// The point's coordinates must already be in the variant's natural
    /// local frame (see the module docs).
    pub fn contains(&self, point: Point2, tol: Scalar) -> bool {
        match self {
            Mask::Rectangle { half_x, half_y } => {
                point.x.abs() <= half_x + tol && point.y.abs() <= half_y + tol
            }
            Mask::Trapezoid {
                half_x_min_y,
                half_x_max_y,
                half_y,
            } => {
                if point.y.abs() > half_y + tol {
                    return false;
                }
                let half_x = if *half_y > 0.0 {
                    0.5 * (half_x_min_y + half_x_max_y)
                        + 0.5 * (half_x_max_y - half_x_min_y) * (point.y / half_y)
                } else {
                    half_x_min_y.max(*half_x_max_y)
                };
                point.x.abs() <= half_x + tol
            }
            Mask::Annulus { r_min, r_max } => {
                point.x >= r_min - tol && point.x <= r_max + tol
            }
            Mask::Cylinder { half_z, .. } => point.y.abs() <= half_z + tol,
            Mask::Polygon { vertices } => polygon_contains(vertices, point, tol),
        }
    }
}

/// Even-odd crossing test, with points within `tol` of any edge inside.
fn polygon_contains(vertices: &[Point2], point: Point2, tol: Scalar) -> bool {
    if vertices.len() < 3 {
        return false;
    }
    let mut inside = false;
    let n = vertices.len();
    for i in 0..n {
        let a = vertices[i];
        let b = vertices[(i + 1) % n];
        if segment_distance(point, a, b) <= tol {
            return true;
        }
        if (a.y > point.y) != (b.y > point.y) {
            let x_cross = a.x + (point.y - a.y) / (b.y - a.y) * (b.x - a.x);
            if point.x < x_cross {
                inside = !inside;
            }
        }
    }
    inside
}

/// Distance from a point to a line segment.
fn segment_distance(p: Point2, a: Point2, b: Point2) -> Scalar {
    let abx = b.x - a.x;
    let aby = b.y - a.y;
    let apx = p.x - a.x;
    let apy = p.y - a.y;
    let len_sq = abx * abx + aby * aby;
    let t = if len_sq > 0.0 {
        ((apx * abx + apy * aby) / len_sq).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let dx = apx - t * abx;
    let dy = apy - t * aby;
    (dx * dx + dy * dy).sqrt()
}
