//! Angle utilities and discrete curve geometry.
//!
//! All angles are in radians, CCW positive from +X.

use std::f64::consts::PI;

use super::point::WorldPoint;

/// Two times PI (full circle in radians).
pub const TWO_PI: f64 = 2.0 * PI;

/// Normalize angle to (-pi, pi].
#[inline]
pub fn normalize_angle(angle: f64) -> f64 {
    let mut a = angle % TWO_PI;
    if a > PI {
        a -= TWO_PI;
    } else if a <= -PI {
        a += TWO_PI;
    }
    a
}

/// Signed angular difference from `from` to `to`, in (-pi, pi].
#[inline]
pub fn angle_diff(from: f64, to: f64) -> f64 {
    normalize_angle(to - from)
}

/// Convert degrees to radians.
#[inline]
pub fn deg_to_rad(deg: f64) -> f64 {
    deg * PI / 180.0
}

/// Convert radians to degrees.
#[inline]
pub fn rad_to_deg(rad: f64) -> f64 {
    rad * 180.0 / PI
}

/// Square of a value. Useful for avoiding `powi(2)`.
#[inline]
pub fn sq(x: f64) -> f64 {
    x * x
}

/// Signed curvature of the circle through three consecutive points.
///
/// Uses the circumscribed-circle relation kappa = 4A / (a b c) with A from
/// Heron's formula. The sign follows the turn direction: negative when the
/// second chord rotates clockwise relative to the first.
///
/// Returns 0 for degenerate triples (coincident or collinear within
/// floating-point noise).
pub fn three_point_curvature(p1: WorldPoint, p2: WorldPoint, p3: WorldPoint) -> f64 {
    let a = p1.distance(&p2);
    let b = p2.distance(&p3);
    let c = p3.distance(&p1);

    let product = a * b * c;
    if product < 1e-12 {
        return 0.0;
    }

    let s = (a + b + c) / 2.0;
    let area = (s * (s - a) * (s - b) * (s - c)).abs().sqrt();
    let mut curvature = 4.0 * area / product;

    let turn = (p2 - p1).cross(&(p3 - p2));
    if turn < 0.0 {
        curvature = -curvature;
    }
    curvature
}
