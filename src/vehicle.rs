//! Vehicle geometry and the derived three-circle collision model.

use serde::{Deserialize, Serialize};

/// Ackermann vehicle dimensions, measured from the rear axle.
///
/// Collision checking approximates the body with three circles placed along
/// the longitudinal axis of the vehicle center: one over the rear block,
/// one over the front block, and (for long vehicles) one over the middle.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct VehicleGeometry {
    /// Body width in meters.
    pub width: f64,
    /// Total body length in meters.
    pub length: f64,
    /// Length from the vehicle center to the rear bumper in meters.
    pub rear_overhang: f64,
    /// Length from the vehicle center to the front bumper in meters.
    pub front_overhang: f64,
}

impl Default for VehicleGeometry {
    fn default() -> Self {
        Self {
            width: 2.4,
            length: 5.0,
            rear_overhang: 2.5,
            front_overhang: 2.5,
        }
    }
}

impl VehicleGeometry {
    /// Longitudinal offset of the rear circle behind the vehicle center.
    #[inline]
    pub fn rear_circle_offset(&self) -> f64 {
        self.rear_overhang - self.width / 2.0
    }

    /// Longitudinal offset of the front circle ahead of the vehicle center.
    #[inline]
    pub fn front_circle_offset(&self) -> f64 {
        self.front_overhang - self.width / 2.0
    }

    /// Radius of the rear and front circles: circumradius of the
    /// width x width end block.
    #[inline]
    pub fn end_circle_radius(&self) -> f64 {
        let half = self.width / 2.0;
        (half * half + half * half).sqrt()
    }

    /// Radius of the middle circle, 0 when the vehicle is short enough
    /// (length <= 2 * width) that the end circles already cover the body.
    #[inline]
    pub fn middle_circle_radius(&self) -> f64 {
        if self.length > 2.0 * self.width {
            let reach = self.rear_overhang.max(self.front_overhang) - self.width;
            let half = self.width / 2.0;
            (reach * reach + half * half).sqrt()
        } else {
            0.0
        }
    }
}
