//! Default value functions for serde deserialization.

pub fn delta_s() -> f64 {
    1.6
}

pub fn resample_step() -> f64 {
    0.3
}

pub fn max_curvature() -> f64 {
    0.25
}

pub fn start_heading_abort_deg() -> f64 {
    80.0
}

pub fn refine_threshold_deg() -> f64 {
    30.0
}

pub fn end_heading_abort_deg() -> f64 {
    90.0
}

pub fn collision_tail_s() -> f64 {
    30.0
}

pub fn curvature_weight() -> f64 {
    2.0
}

pub fn curvature_rate_weight() -> f64 {
    30.0
}

pub fn boundary_weight() -> f64 {
    0.01
}

pub fn arc_length_weight() -> f64 {
    0.05
}

pub fn probe_step() -> f64 {
    0.1
}

pub fn probe_max() -> f64 {
    5.0
}

pub fn rear_axle_to_center() -> f64 {
    1.3
}

pub fn end_station_clamp() -> f64 {
    1.5
}

pub fn max_cpu_time() -> f64 {
    0.02
}

pub fn max_outer_iterations() -> usize {
    12
}

pub fn max_inner_iterations() -> usize {
    400
}

pub fn feasibility_tolerance() -> f64 {
    1e-5
}

pub fn optimality_tolerance() -> f64 {
    1e-4
}

pub fn initial_penalty() -> f64 {
    10.0
}
