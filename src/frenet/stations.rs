//! Station layout along the resampled reference.

use crate::config::OptimizerSection;
use crate::core::math::{angle_diff, deg_to_rad, rad_to_deg};
use crate::core::VehicleState;
use crate::error::{PlanError, Result};

use super::reference::ResampledReference;

/// Optimization stations sampled from the reference, plus the heading
/// errors of the endpoints against the reference tangents.
#[derive(Clone, Debug)]
pub struct StationLayout {
    /// Station arc-lengths along the reference.
    pub s: Vec<f64>,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    /// Reference tangent angle per station.
    pub heading: Vec<f64>,
    /// Reference curvature per station.
    pub curvature: Vec<f64>,
    /// Signed start-heading error against the reference tangent at s = 0.
    pub start_heading_error: f64,
    /// Signed end-heading error against the reference tangent at the end.
    pub end_heading_error: f64,
    /// True when the first segments were refined for a large initial
    /// heading error.
    pub refined_start: bool,
}

impl StationLayout {
    /// Number of stations.
    #[inline]
    pub fn len(&self) -> usize {
        self.s.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.s.is_empty()
    }

    /// Station pose as a vehicle state.
    pub fn state(&self, i: usize) -> VehicleState {
        let mut state = VehicleState::new(self.x[i], self.y[i], self.heading[i]);
        state.s = self.s[i];
        state.curvature = self.curvature[i];
        state
    }

    /// Segment lengths between consecutive stations.
    pub fn segment_lengths(&self) -> Vec<f64> {
        self.s.windows(2).map(|w| w[1] - w[0]).collect()
    }
}

/// Divide the reference into stations and check the endpoint heading
/// preconditions.
///
/// Nominal spacing is `delta_s`; when the start heading deviates from the
/// reference tangent by more than the refinement threshold, four stations
/// are added and the first six segments shrink to a third of the spacing
/// to give the optimizer finer control near the start. A tail station is
/// appended when the remainder exceeds a fifth of the spacing, and always
/// when the reference is shorter than one segment, so a returned layout
/// holds at least two stations.
pub fn build(
    reference: &ResampledReference,
    start: &VehicleState,
    end: &VehicleState,
    config: &OptimizerSection,
) -> Result<StationLayout> {
    let start_heading_error = angle_diff(reference.tangent_at(0.0), start.heading);
    if start_heading_error.abs() > deg_to_rad(config.start_heading_abort_deg) {
        return Err(PlanError::HeadingMismatchStart {
            error_deg: rad_to_deg(start_heading_error),
        });
    }

    let last_s = *reference.s.last().unwrap_or(&0.0);
    let end_heading_error = angle_diff(reference.tangent_at(last_s), end.heading);
    if end_heading_error.abs() > deg_to_rad(config.end_heading_abort_deg) {
        return Err(PlanError::HeadingMismatchEnd {
            error_deg: rad_to_deg(end_heading_error),
        });
    }

    let refined_start = start_heading_error.abs() >= deg_to_rad(config.refine_threshold_deg);
    if refined_start {
        log::info!(
            "large initial heading error ({:.1} deg), refining start stations",
            rad_to_deg(start_heading_error)
        );
    }

    let delta_s = config.delta_s;
    let mut count = (reference.s_max / delta_s) as usize + 1;
    if refined_start {
        count += 4;
    }

    let mut s = Vec::with_capacity(count + 1);
    let mut length = 0.0;
    s.push(0.0);
    for i in 0..count.saturating_sub(1) {
        if refined_start && i <= 5 {
            length += delta_s / 3.0;
        } else {
            length += delta_s;
        }
        s.push(length);
    }
    // Append the tail station for a meaningful remainder, and
    // unconditionally when the reference is shorter than one segment:
    // the program needs at least two stations.
    if reference.s_max - length > 0.2 * delta_s || s.len() < 2 {
        s.push(reference.s_max);
    }

    let mut layout = StationLayout {
        x: Vec::with_capacity(s.len()),
        y: Vec::with_capacity(s.len()),
        heading: Vec::with_capacity(s.len()),
        curvature: Vec::with_capacity(s.len()),
        s,
        start_heading_error,
        end_heading_error,
        refined_start,
    };
    for &si in &layout.s {
        let position = reference.position_at(si);
        layout.x.push(position.x);
        layout.y.push(position.y);
        layout.heading.push(reference.tangent_at(si));
        layout.curvature.push(reference.k_spline.value(si));
    }
    Ok(layout)
}
