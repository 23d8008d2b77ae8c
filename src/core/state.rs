//! Vehicle state samples along a path.

use serde::{Deserialize, Serialize};

use super::point::WorldPoint;

/// One sample of the vehicle's planar motion.
///
/// Not every producer populates every field: raw reference points may carry
/// position only, the resampled reference adds heading, arc-length and
/// curvature, and the optimizer output carries position, heading and
/// arc-length. Angles are radians (CCW positive from +X, normalized to
/// (-pi, pi]), distances are meters, curvature is 1/m with positive values
/// turning left.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct VehicleState {
    /// X position in meters
    pub x: f64,
    /// Y position in meters
    pub y: f64,
    /// Heading angle in radians
    pub heading: f64,
    /// Arc-length from the start of the path in meters
    pub s: f64,
    /// Signed curvature in 1/m
    pub curvature: f64,
}

impl VehicleState {
    /// Create a pose with heading; arc-length and curvature start at zero.
    #[inline]
    pub fn new(x: f64, y: f64, heading: f64) -> Self {
        Self {
            x,
            y,
            heading,
            s: 0.0,
            curvature: 0.0,
        }
    }

    /// Create a position-only sample (heading = 0).
    #[inline]
    pub fn from_position(x: f64, y: f64) -> Self {
        Self::new(x, y, 0.0)
    }

    /// Builder-style curvature setter.
    #[inline]
    pub fn with_curvature(mut self, curvature: f64) -> Self {
        self.curvature = curvature;
        self
    }

    /// Get the position as a WorldPoint
    #[inline]
    pub fn position(&self) -> WorldPoint {
        WorldPoint::new(self.x, self.y)
    }

    /// Euclidean distance to another state (position only)
    #[inline]
    pub fn distance(&self, other: &VehicleState) -> f64 {
        self.position().distance(&other.position())
    }

    /// Transform a world point into this state's local frame
    /// (X forward along the heading, Y to the left).
    #[inline]
    pub fn to_local(&self, point: WorldPoint) -> WorldPoint {
        (point - self.position()).rotate(-self.heading)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_to_local_ahead() {
        // Vehicle at (1, 0) facing +Y; a point 1 m ahead is at (1, 1).
        let state = VehicleState::new(1.0, 0.0, FRAC_PI_2);
        let local = state.to_local(WorldPoint::new(1.0, 1.0));
        assert!((local.x - 1.0).abs() < 1e-12);
        assert!(local.y.abs() < 1e-12);
    }

    #[test]
    fn test_to_local_left_right() {
        // Vehicle at origin facing +X; a point at +Y is to its left.
        let state = VehicleState::new(0.0, 0.0, 0.0);
        let left = state.to_local(WorldPoint::new(0.0, 2.0));
        assert!(left.y > 0.0);
        let right = state.to_local(WorldPoint::new(0.0, -2.0));
        assert!(right.y < 0.0);
    }

    #[test]
    fn test_with_curvature() {
        let state = VehicleState::new(0.0, 0.0, 0.0).with_curvature(0.1);
        assert!((state.curvature - 0.1).abs() < 1e-12);
    }
}
