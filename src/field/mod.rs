//! Obstacle field interface and the rasterized implementation.
//!
//! The optimizer only consumes the [`ObstacleField`] capability: point
//! containment, distance to the nearest obstacle, and occupancy lookup.
//! [`GridField`] is the in-crate rasterized implementation; callers with
//! their own map stack can implement the trait directly.

mod grid;

pub use grid::GridField;

use crate::core::WorldPoint;

/// Point occupancy state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Occupancy {
    /// Point is in navigable free space.
    Free,
    /// Point is on or inside an obstacle (or outside the mapped region).
    Occupied,
}

/// A rasterized 2-D region annotated with a distance-to-obstacle layer.
///
/// The field is borrowed immutably for the whole duration of a solve; its
/// lifetime strictly exceeds any path computation. Callers that mutate the
/// field must serialize mutations with solver invocations.
pub trait ObstacleField {
    /// True when the point lies inside the mapped region.
    fn contains(&self, point: WorldPoint) -> bool;

    /// Distance from the point to the nearest obstacle in meters.
    ///
    /// Returns `f64::INFINITY` when the field holds no obstacles and 0 for
    /// points on an obstacle or outside the mapped region.
    fn distance_to_obstacle(&self, point: WorldPoint) -> f64;

    /// Occupancy at the point; out-of-map points read as occupied.
    fn occupancy_at(&self, point: WorldPoint) -> Occupancy;
}
