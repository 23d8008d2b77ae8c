//! Discrete curvature estimation along a sampled curve.

use crate::core::math::three_point_curvature;
use crate::core::WorldPoint;

/// Signed per-sample curvature with summary statistics.
#[derive(Clone, Debug)]
pub struct CurvatureProfile {
    /// Curvature per sample (1/m).
    pub values: Vec<f64>,
    /// Maximum curvature magnitude.
    pub max_abs: f64,
    /// Maximum curvature change between consecutive samples.
    pub max_step: f64,
}

/// Estimate signed curvature for each sample of the polyline `(x, y)`.
///
/// Interior samples use the circumscribed-circle formula over their two
/// neighbors; endpoints copy their interior neighbor. Fewer than three
/// samples yield zero curvature.
pub fn estimate(x: &[f64], y: &[f64]) -> CurvatureProfile {
    debug_assert_eq!(x.len(), y.len());
    let n = x.len();
    let mut values = vec![0.0; n];

    if n >= 3 {
        for i in 1..n - 1 {
            values[i] = three_point_curvature(
                WorldPoint::new(x[i - 1], y[i - 1]),
                WorldPoint::new(x[i], y[i]),
                WorldPoint::new(x[i + 1], y[i + 1]),
            );
        }
        values[0] = values[1];
        values[n - 1] = values[n - 2];
    }

    let mut max_abs = 0.0_f64;
    let mut max_step = 0.0_f64;
    for i in 0..n {
        max_abs = max_abs.max(values[i].abs());
        if i + 1 < n {
            max_step = max_step.max((values[i + 1] - values[i]).abs());
        }
    }

    CurvatureProfile {
        values,
        max_abs,
        max_step,
    }
}
