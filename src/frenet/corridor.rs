//! Drivable-corridor computation by lateral free-space probing.

use std::f64::consts::FRAC_PI_2;

use crate::config::CorridorSection;
use crate::core::math::normalize_angle;
use crate::core::{VehicleState, WorldPoint};
use crate::field::ObstacleField;

use super::footprint::FootprintChecker;

/// Feasible lateral offset band at one station, in meters.
///
/// `right <= left` always; in the nominal case the reference itself is
/// inside the band (`right <= 0 <= left`). Matching signs mean the band
/// lies entirely to one side of the reference. A `(0, 0)` band pins the
/// optimizer to the reference at that station.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Corridor {
    pub left: f64,
    pub right: f64,
}

impl Corridor {
    /// Band width in meters.
    #[inline]
    pub fn width(&self) -> f64 {
        self.left - self.right
    }
}

/// Computes per-station corridors by marching the three-circle template
/// laterally through the obstacle field.
pub struct CorridorBuilder<'a, F: ObstacleField> {
    checker: &'a FootprintChecker<'a, F>,
    probe_step: f64,
    probe_max: f64,
}

impl<'a, F: ObstacleField> CorridorBuilder<'a, F> {
    pub fn new(checker: &'a FootprintChecker<'a, F>, config: &CorridorSection) -> Self {
        Self {
            checker,
            probe_step: config.probe_step,
            probe_max: config.probe_max,
        }
    }

    /// March the template from `center` along `angle` and return the last
    /// offset at which it was still free: 0 when the first step is already
    /// blocked, the full probe range when nothing blocks.
    fn probe(&self, center: WorldPoint, heading: f64, angle: f64) -> f64 {
        let steps = (self.probe_max / self.probe_step).round() as usize;
        let mut offset = 0.0;
        for _ in 0..steps {
            offset += self.probe_step;
            let shifted = center.point_at(angle, offset);
            if !self.checker.center_is_free(shifted, heading) {
                return offset - self.probe_step;
            }
        }
        offset
    }

    /// March along `angle` until the template first becomes free; returns
    /// the offset and the recovered template center.
    fn first_free_offset(
        &self,
        center: WorldPoint,
        heading: f64,
        angle: f64,
    ) -> Option<(f64, WorldPoint)> {
        let steps = (self.probe_max / self.probe_step).round() as usize;
        let mut offset = 0.0;
        for _ in 0..steps {
            offset += self.probe_step;
            let shifted = center.point_at(angle, offset);
            if self.checker.center_is_free(shifted, heading) {
                return Some((offset, shifted));
            }
        }
        None
    }

    /// Corridor at a station of the reference.
    ///
    /// A free station probes symmetrically to both sides. A blocked
    /// station searches laterally for free space, preferring the left; the
    /// recovered band then lies entirely on that side.
    pub fn corridor_for(&self, station: &VehicleState) -> Corridor {
        let heading = station.heading;
        let center = self.checker.center_for_pose(station.position(), heading);
        let left_angle = normalize_angle(heading + FRAC_PI_2);
        let right_angle = normalize_angle(heading - FRAC_PI_2);

        if self.checker.center_is_free(center, heading) {
            return Corridor {
                left: self.probe(center, heading, left_angle),
                right: -self.probe(center, heading, right_angle),
            };
        }

        if let Some((offset, recovered)) = self.first_free_offset(center, heading, left_angle) {
            let right = offset;
            return Corridor {
                left: right + self.probe(recovered, heading, left_angle),
                right,
            };
        }
        if let Some((offset, recovered)) = self.first_free_offset(center, heading, right_angle) {
            let left = -offset;
            return Corridor {
                left,
                right: left - self.probe(recovered, heading, right_angle),
            };
        }
        Corridor {
            left: 0.0,
            right: 0.0,
        }
    }
}
