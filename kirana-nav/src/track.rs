//! Free track parameters in the global frame.

use serde::{Deserialize, Serialize};

use kirana_geom::{Point3, Scalar, Vec3};

/// A particle track: position, unit direction, and charge sign.
///
/// The navigator consumes the position and direction only; the charge is
/// carried for the field-aware steppers layered above the core, which bend
/// the direction between navigation steps.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FreeTrack {
    /// Global position
    pub position: Point3,
    /// Unit direction
    pub direction: Vec3,
    /// Charge sign (0 for neutral)
    pub charge: Scalar,
}

impl FreeTrack {
    /// Create a neutral track; the direction is normalized.
    pub fn new(position: Point3, direction: Vec3) -> Self {
        Self {
            position,
            direction: direction.normalized(),
            charge: 0.0,
        }
    }

    /// Set the charge sign.
    pub fn with_charge(mut self, charge: Scalar) -> Self {
        self.charge = charge;
        self
    }

    /// Advance the position by a signed path length along the direction.
    ///
    /// This is the line stepper in miniature; real propagation plugs in a
    /// stepper that also updates the direction.
    #[inline]
    pub fn advance(&mut self, path: Scalar) {
        self.position += self.direction * path;
    }

    /// The same track pointing the opposite way.
    pub fn reversed(&self) -> Self {
        Self {
            direction: -self.direction,
            ..*self
        }
    }

    /// True if position and direction are finite.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.position.is_finite() && self.direction.is_finite()
    }
}
