//! Reference path trimming, spline fitting and resampling.

use std::f64::consts::FRAC_PI_2;

use crate::core::{VehicleState, WorldPoint};
use crate::error::{PlanError, Result};
use crate::spline::CubicSpline;

use super::curvature;

/// Distance below which the start is considered to coincide with the first
/// reference point.
const COINCIDENT_EPS: f64 = 1e-3;

/// Once the running minimum distance to the start is below this, the scan
/// for the closest reference point stops at the first farther sample; the
/// reference is assumed smooth enough that the nearest point is local.
const NEAR_SCAN_RADIUS: f64 = 15.0;

/// The reference path after trimming and arc-length resampling.
#[derive(Clone, Debug, PartialEq)]
pub struct ResampledReference {
    /// x as a function of arc-length.
    pub x_spline: CubicSpline,
    /// y as a function of arc-length.
    pub y_spline: CubicSpline,
    /// Curvature as a function of arc-length.
    pub k_spline: CubicSpline,
    /// Resampled arc-length values (uniform step).
    pub s: Vec<f64>,
    /// Total reference length.
    pub s_max: f64,
    /// Signed lateral offset of the start from the reference; positive when
    /// the start lies to the left.
    pub cross_track: f64,
    /// Resampled reference states for visualization.
    pub states: Vec<VehicleState>,
}

impl ResampledReference {
    /// Reference tangent angle at arc-length s.
    pub fn tangent_at(&self, s: f64) -> f64 {
        let dx = self.x_spline.derivative(s);
        if dx == 0.0 {
            FRAC_PI_2
        } else {
            self.y_spline.derivative(s).atan2(dx)
        }
    }

    /// Reference position at arc-length s.
    pub fn position_at(&self, s: f64) -> WorldPoint {
        WorldPoint::new(self.x_spline.value(s), self.y_spline.value(s))
    }
}

/// Trim the raw reference up to the point closest to the start, fit
/// arc-length splines and resample at a fixed spatial step.
pub fn resample(
    reference: &[VehicleState],
    start: &VehicleState,
    step: f64,
) -> Result<ResampledReference> {
    if reference.len() < 2 {
        return Err(PlanError::EmptyReference);
    }

    let (points, cross_track) = trim_to_start(reference, start);
    if points.len() < 2 {
        return Err(PlanError::EmptyReference);
    }

    // Cumulative arc-length over the trimmed points, skipping duplicates.
    let mut s_raw = Vec::with_capacity(points.len());
    let mut x_raw = Vec::with_capacity(points.len());
    let mut y_raw = Vec::with_capacity(points.len());
    let mut total = 0.0;
    let mut previous: Option<WorldPoint> = None;
    for point in &points {
        let position = point.position();
        if let Some(last) = previous {
            let ds = last.distance(&position);
            if ds < 1e-9 {
                continue;
            }
            total += ds;
        }
        previous = Some(position);
        s_raw.push(total);
        x_raw.push(position.x);
        y_raw.push(position.y);
    }
    if s_raw.len() < 2 {
        return Err(PlanError::EmptyReference);
    }
    let s_max = *s_raw.last().unwrap();

    let x_spline = CubicSpline::new(&s_raw, &x_raw).ok_or(PlanError::EmptyReference)?;
    let y_spline = CubicSpline::new(&s_raw, &y_raw).ok_or(PlanError::EmptyReference)?;

    // Densify at the fixed step.
    let mut s = Vec::new();
    let mut x = Vec::new();
    let mut y = Vec::new();
    let mut new_s = 0.0;
    while new_s <= s_max + 1e-9 {
        s.push(new_s.min(s_max));
        x.push(x_spline.value(new_s));
        y.push(y_spline.value(new_s));
        new_s += step;
    }
    if s.len() < 2 {
        return Err(PlanError::EmptyReference);
    }

    let profile = curvature::estimate(&x, &y);
    let k_spline = CubicSpline::new(&s, &profile.values).ok_or(PlanError::EmptyReference)?;

    let states = s
        .iter()
        .enumerate()
        .map(|(i, &si)| {
            let dx = x_spline.derivative(si);
            let heading = if dx == 0.0 {
                FRAC_PI_2
            } else {
                y_spline.derivative(si).atan2(dx)
            };
            let mut state = VehicleState::new(x[i], y[i], heading);
            state.s = si;
            state.curvature = profile.values[i];
            state
        })
        .collect();

    Ok(ResampledReference {
        x_spline,
        y_spline,
        k_spline,
        s,
        s_max,
        cross_track,
        states,
    })
}

/// Drop reference points before the one closest to the start and compute
/// the signed cross-track error.
///
/// The sign convention matches the +pi/2 reconstruction normal: positive
/// offsets lie to the left of the reference. When the first remaining
/// point sits to the vehicle's right (negative local y), the vehicle is
/// left of the reference and the offset is positive.
fn trim_to_start(reference: &[VehicleState], start: &VehicleState) -> (Vec<VehicleState>, f64) {
    if reference[0].distance(start) < COINCIDENT_EPS {
        return (reference.to_vec(), 0.0);
    }

    let mut min_distance = f64::INFINITY;
    let mut min_index = 0;
    for (i, point) in reference.iter().enumerate() {
        let d = point.distance(start);
        if d < min_distance {
            min_distance = d;
            min_index = i;
        } else if d > NEAR_SCAN_RADIUS && min_distance < NEAR_SCAN_RADIUS {
            break;
        }
    }

    let points = reference[min_index..].to_vec();
    let closest_local = start.to_local(points[0].position());
    let cross_track = if closest_local.y < 0.0 {
        min_distance
    } else {
        -min_distance
    };
    (points, cross_track)
}
