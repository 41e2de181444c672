//! Scalar, vector, and transform algebra in the detector's global frame.
//!
//! All lengths are in detector units (millimeters by convention, though
//! nothing in the crate depends on the unit). Surfaces carry a [`Transform3`]
//! that places their local frame in the global one; intersection points are
//! taken to the local frame before the shape mask is tested.

use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Mul, Neg, Sub};

/// Scalar type used throughout the workspace.
pub type Scalar = f64;

/// 3D vector in the global frame.
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec3 {
    /// X component
    pub x: Scalar,
    /// Y component
    pub y: Scalar,
    /// Z component
    pub z: Scalar,
}

/// 3D point; shares the representation of [`Vec3`].
pub type Point3 = Vec3;

impl Vec3 {
    /// Zero vector (origin)
    pub const ZERO: Vec3 = Vec3 {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    /// Unit vector along +X
    pub const X: Vec3 = Vec3 {
        x: 1.0,
        y: 0.0,
        z: 0.0,
    };

    /// Unit vector along +Y
    pub const Y: Vec3 = Vec3 {
        x: 0.0,
        y: 1.0,
        z: 0.0,
    };

    /// Unit vector along +Z
    pub const Z: Vec3 = Vec3 {
        x: 0.0,
        y: 0.0,
        z: 1.0,
    };

    /// Create a new vector
    #[inline]
    pub const fn new(x: Scalar, y: Scalar, z: Scalar) -> Self {
        Self { x, y, z }
    }

    /// Dot product
    #[inline]
    pub fn dot(&self, other: &Vec3) -> Scalar {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Cross product
    #[inline]
    pub fn cross(&self, other: &Vec3) -> Vec3 {
        Vec3::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    /// Squared length (faster, avoids sqrt)
    #[inline]
    pub fn norm_squared(&self) -> Scalar {
        self.dot(self)
    }

    /// Length (magnitude)
    #[inline]
    pub fn norm(&self) -> Scalar {
        self.norm_squared().sqrt()
    }

    /// Normalize to unit length
    #[inline]
    pub fn normalized(&self) -> Vec3 {
        let len = self.norm();
        if len > 0.0 { *self * (1.0 / len) } else { *self }
    }

    /// Radial distance from the z axis
    #[inline]
    pub fn perp(&self) -> Scalar {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    /// True if all components are finite
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl Add for Vec3 {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Vec3::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }
}

impl AddAssign for Vec3 {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.x += other.x;
        self.y += other.y;
        self.z += other.z;
    }
}

impl Sub for Vec3 {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Vec3::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }
}

impl Mul<Scalar> for Vec3 {
    type Output = Self;

    #[inline]
    fn mul(self, scalar: Scalar) -> Self {
        Vec3::new(self.x * scalar, self.y * scalar, self.z * scalar)
    }
}

impl Neg for Vec3 {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Vec3::new(-self.x, -self.y, -self.z)
    }
}

/// 2D point in a surface-local frame.
///
/// The reading of the components is contextual: cartesian `(x, y)` for
/// rectangle, trapezoid, and polygon masks, polar `(r, phi)` for annulus
/// masks, and cylindrical `(r*phi, z)` for cylinder masks.
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct Point2 {
    /// First local coordinate
    pub x: Scalar,
    /// Second local coordinate
    pub y: Scalar,
}

impl Point2 {
    /// Create a new local point
    #[inline]
    pub const fn new(x: Scalar, y: Scalar) -> Self {
        Self { x, y }
    }
}

/// Rigid transform placing a surface-local frame in the global frame.
///
/// Stored as the three orthonormal basis columns plus a translation. The
/// local z axis is the surface normal for planar surfaces and the symmetry
/// axis for cylindrical ones.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transform3 {
    x_axis: Vec3,
    y_axis: Vec3,
    z_axis: Vec3,
    translation: Vec3,
}

impl Transform3 {
    /// Identity transform: local frame coincides with the global one.
    pub fn identity() -> Self {
        Self {
            x_axis: Vec3::X,
            y_axis: Vec3::Y,
            z_axis: Vec3::Z,
            translation: Vec3::ZERO,
        }
    }

    /// Pure translation, axes aligned with the global frame.
    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            ..Self::identity()
        }
    }

    /// Build a transform from a translation, the local z axis, and a
    /// reference direction for the local x axis.
    ///
    /// The inputs need not be normalized or exactly orthogonal; z is
    /// normalized, x is re-orthogonalized against z, and y completes the
    /// right-handed basis.
    pub fn new(translation: Vec3, z_axis: Vec3, x_axis: Vec3) -> Self {
        let z = z_axis.normalized();
        let x = (x_axis - z * x_axis.dot(&z)).normalized();
        let y = z.cross(&x);
        Self {
            x_axis: x,
            y_axis: y,
            z_axis: z,
            translation,
        }
    }

    /// Translation component (the local origin in global coordinates).
    #[inline]
    pub fn translation(&self) -> Vec3 {
        self.translation
    }

    /// Surface normal (the local z axis in global coordinates).
    #[inline]
    pub fn normal(&self) -> Vec3 {
        self.z_axis
    }

    /// Transform a point from the local to the global frame.
    #[inline]
    pub fn point_to_global(&self, local: Point3) -> Point3 {
        self.translation + self.x_axis * local.x + self.y_axis * local.y + self.z_axis * local.z
    }

    /// Transform a point from the global to the local frame.
    #[inline]
    pub fn point_to_local(&self, global: Point3) -> Point3 {
        let rel = global - self.translation;
        Point3::new(
            rel.dot(&self.x_axis),
            rel.dot(&self.y_axis),
            rel.dot(&self.z_axis),
        )
    }

    /// Rotate a direction from the local to the global frame.
    #[inline]
    pub fn vector_to_global(&self, local: Vec3) -> Vec3 {
        self.x_axis * local.x + self.y_axis * local.y + self.z_axis * local.z
    }

    /// Rotate a direction from the global to the local frame.
    #[inline]
    pub fn vector_to_local(&self, global: Vec3) -> Vec3 {
        Vec3::new(
            global.dot(&self.x_axis),
            global.dot(&self.y_axis),
            global.dot(&self.z_axis),
        )
    }
}

impl Default for Transform3 {
    fn default() -> Self {
        Self::identity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_vec3_ops() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(4.0, 5.0, 6.0);

        assert_eq!(a + b, Vec3::new(5.0, 7.0, 9.0));
        assert_eq!(b - a, Vec3::new(3.0, 3.0, 3.0));
        assert_eq!(a * 2.0, Vec3::new(2.0, 4.0, 6.0));
        assert_eq!(-a, Vec3::new(-1.0, -2.0, -3.0));
        assert_relative_eq!(a.dot(&b), 32.0, epsilon = 1e-12);
    }

    #[test]
    fn test_vec3_cross() {
        assert_eq!(Vec3::X.cross(&Vec3::Y), Vec3::Z);
        assert_eq!(Vec3::Y.cross(&Vec3::Z), Vec3::X);
        assert_eq!(Vec3::Z.cross(&Vec3::X), Vec3::Y);
    }

    #[test]
    fn test_vec3_norm() {
        let v = Vec3::new(3.0, 4.0, 0.0);
        assert_relative_eq!(v.norm(), 5.0, epsilon = 1e-12);
        assert_relative_eq!(v.normalized().norm(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(v.perp(), 5.0, epsilon = 1e-12);
    }

    #[test]
    fn test_vec3_is_finite() {
        assert!(Vec3::new(1.0, 2.0, 3.0).is_finite());
        assert!(!Vec3::new(Scalar::NAN, 0.0, 0.0).is_finite());
        assert!(!Vec3::new(0.0, Scalar::INFINITY, 0.0).is_finite());
    }

    #[test]
    fn test_transform_roundtrip() {
        let t = Transform3::new(
            Vec3::new(1.0, 2.0, 3.0),
            Vec3::new(1.0, 1.0, 0.0),
            Vec3::new(0.0, 0.0, 1.0),
        );
        let p = Point3::new(0.3, -0.7, 1.9);

        let global = t.point_to_global(p);
        let back = t.point_to_local(global);

        assert_relative_eq!(back.x, p.x, epsilon = 1e-12);
        assert_relative_eq!(back.y, p.y, epsilon = 1e-12);
        assert_relative_eq!(back.z, p.z, epsilon = 1e-12);
    }

    #[test]
    fn test_transform_basis_orthonormal() {
        let t = Transform3::new(
            Vec3::ZERO,
            Vec3::new(0.2, -1.3, 0.4),
            Vec3::new(1.0, 1.0, 1.0),
        );
        let n = t.normal();

        assert_relative_eq!(n.norm(), 1.0, epsilon = 1e-12);
        // Local axes map to orthogonal global directions
        let ex = t.vector_to_global(Vec3::X);
        let ey = t.vector_to_global(Vec3::Y);
        assert_relative_eq!(ex.dot(&ey), 0.0, epsilon = 1e-12);
        assert_relative_eq!(ex.dot(&n), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_plane_transform_normal() {
        // A plane perpendicular to +X at x = 10
        let t = Transform3::new(Vec3::new(10.0, 0.0, 0.0), Vec3::X, Vec3::Y);

        assert_eq!(t.normal(), Vec3::X);
        let local = t.point_to_local(Point3::new(10.0, 1.0, 2.0));
        assert_relative_eq!(local.z, 0.0, epsilon = 1e-12);
        assert_relative_eq!(local.x, 1.0, epsilon = 1e-12);
        assert_relative_eq!(local.y, 2.0, epsilon = 1e-12);
    }
}
