//! Cartesian reconstruction of the optimized Frenet offsets.

use std::f64::consts::FRAC_PI_2;

use crate::core::math::normalize_angle;
use crate::core::{VehicleState, WorldPoint};
use crate::error::{PlanError, Result};
use crate::field::ObstacleField;
use crate::spline::BSpline2;

use super::footprint::FootprintChecker;
use super::stations::StationLayout;

/// Convert the per-station lateral offsets back to a dense Cartesian path.
///
/// The offset points become control points of a clamped cubic B-spline,
/// sampled at `3N` uniform parameter values. Headings come from finite
/// differences (the first sample keeps the start heading) and every sample
/// passes through the three-circle collision gate: a blocked sample within
/// `tail_s` meters fails the solve, a blocked sample beyond it truncates
/// the path and returns what was built (long-tail truncation).
pub fn reconstruct<F: ObstacleField>(
    stations: &StationLayout,
    offsets: &[f64],
    start: &VehicleState,
    checker: &FootprintChecker<'_, F>,
    tail_s: f64,
) -> Result<Vec<VehicleState>> {
    debug_assert_eq!(offsets.len(), stations.len());

    let mut control = Vec::with_capacity(stations.len());
    for i in 0..stations.len() {
        let normal = normalize_angle(stations.heading[i] + FRAC_PI_2);
        let point = WorldPoint::new(
            stations.x[i] + offsets[i] * normal.cos(),
            stations.y[i] + offsets[i] * normal.sin(),
        );
        if !point.is_finite() {
            return Err(PlanError::NumericFailure);
        }
        control.push(point);
    }

    let spline = BSpline2::new(control).ok_or(PlanError::NumericFailure)?;

    let samples = 3 * stations.len();
    let mut path: Vec<VehicleState> = Vec::with_capacity(samples);
    let mut total_s = 0.0;
    for k in 0..samples {
        let t = k as f64 / samples as f64;
        let point = spline.point_at(t);

        let mut state = if let Some(previous) = path.last() {
            let dx = point.x - previous.x;
            let dy = point.y - previous.y;
            let ds = (dx * dx + dy * dy).sqrt();
            total_s += ds;
            let heading = if ds > 1e-9 {
                dy.atan2(dx)
            } else {
                previous.heading
            };
            VehicleState::new(point.x, point.y, heading)
        } else {
            VehicleState::new(point.x, point.y, start.heading)
        };
        state.s = total_s;

        if checker.pose_is_free(state.position(), state.heading) {
            path.push(state);
        } else if state.s > tail_s {
            break;
        } else {
            return Err(PlanError::Collision { s: state.s });
        }
    }
    Ok(path)
}
