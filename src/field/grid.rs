//! Rasterized obstacle field with a brushfire distance layer.

use std::collections::VecDeque;

use crate::core::WorldPoint;

use super::{ObstacleField, Occupancy};

/// Row-major occupancy raster with a pre-computed distance-to-obstacle
/// field.
///
/// Editing methods ([`fill_circle`](GridField::fill_circle),
/// [`fill_rect`](GridField::fill_rect)) mark cells occupied;
/// [`recompute`](GridField::recompute) must be called afterwards to rebuild
/// the distance layer before the field is queried.
#[derive(Clone, Debug)]
pub struct GridField {
    width: usize,
    height: usize,
    /// Resolution in meters per cell.
    resolution: f64,
    /// World position of the grid's lower-left corner.
    origin: WorldPoint,
    occupied: Vec<bool>,
    /// Distance to the nearest occupied cell, in cells.
    distance: Vec<f64>,
}

impl GridField {
    /// Create an all-free field of `width x height` cells with the given
    /// resolution and lower-left origin.
    pub fn new(width: usize, height: usize, resolution: f64, origin: WorldPoint) -> Self {
        let cells = width * height;
        Self {
            width,
            height,
            resolution,
            origin,
            occupied: vec![false; cells],
            distance: vec![f64::INFINITY; cells],
        }
    }

    /// Create an all-free field centered on the world origin.
    pub fn centered(width: usize, height: usize, resolution: f64) -> Self {
        let origin = WorldPoint::new(
            -(width as f64) * resolution / 2.0,
            -(height as f64) * resolution / 2.0,
        );
        Self::new(width, height, resolution, origin)
    }

    /// Grid resolution in meters per cell.
    #[inline]
    pub fn resolution(&self) -> f64 {
        self.resolution
    }

    /// Convert world coordinates to cell indices (may be out of range).
    #[inline]
    fn cell_of(&self, point: WorldPoint) -> (i64, i64) {
        let x = ((point.x - self.origin.x) / self.resolution).floor() as i64;
        let y = ((point.y - self.origin.y) / self.resolution).floor() as i64;
        (x, y)
    }

    /// World position of a cell center.
    #[inline]
    fn center_of(&self, x: usize, y: usize) -> WorldPoint {
        WorldPoint::new(
            self.origin.x + (x as f64 + 0.5) * self.resolution,
            self.origin.y + (y as f64 + 0.5) * self.resolution,
        )
    }

    #[inline]
    fn in_range(&self, x: i64, y: i64) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    #[inline]
    fn index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    /// Mark every cell whose center lies within the disc as occupied.
    /// Call [`recompute`](GridField::recompute) afterwards.
    pub fn fill_circle(&mut self, center: WorldPoint, radius: f64) {
        let radius_sq = radius * radius;
        for y in 0..self.height {
            for x in 0..self.width {
                if self.center_of(x, y).distance_squared(&center) <= radius_sq {
                    let idx = self.index(x, y);
                    self.occupied[idx] = true;
                }
            }
        }
    }

    /// Mark every cell whose center lies within the axis-aligned rectangle
    /// as occupied. Call [`recompute`](GridField::recompute) afterwards.
    pub fn fill_rect(&mut self, min: WorldPoint, max: WorldPoint) {
        for y in 0..self.height {
            for x in 0..self.width {
                let c = self.center_of(x, y);
                if c.x >= min.x && c.x <= max.x && c.y >= min.y && c.y <= max.y {
                    let idx = self.index(x, y);
                    self.occupied[idx] = true;
                }
            }
        }
    }

    /// Rebuild the distance layer from the occupancy raster using the
    /// brushfire (BFS wavefront) algorithm with 8-connected chamfer steps.
    pub fn recompute(&mut self) {
        let sqrt2 = std::f64::consts::SQRT_2;
        let neighbors = [
            (-1i64, 0i64, 1.0),
            (1, 0, 1.0),
            (0, -1, 1.0),
            (0, 1, 1.0),
            (-1, -1, sqrt2),
            (1, -1, sqrt2),
            (-1, 1, sqrt2),
            (1, 1, sqrt2),
        ];

        self.distance.fill(f64::INFINITY);
        let mut queue = VecDeque::new();
        for y in 0..self.height {
            for x in 0..self.width {
                let idx = self.index(x, y);
                if self.occupied[idx] {
                    self.distance[idx] = 0.0;
                    queue.push_back((x as i64, y as i64));
                }
            }
        }

        while let Some((x, y)) = queue.pop_front() {
            let current = self.distance[self.index(x as usize, y as usize)];
            for &(dx, dy, step) in &neighbors {
                let nx = x + dx;
                let ny = y + dy;
                if !self.in_range(nx, ny) {
                    continue;
                }
                let idx = self.index(nx as usize, ny as usize);
                let candidate = current + step;
                if candidate < self.distance[idx] {
                    self.distance[idx] = candidate;
                    queue.push_back((nx, ny));
                }
            }
        }
    }
}

impl ObstacleField for GridField {
    #[inline]
    fn contains(&self, point: WorldPoint) -> bool {
        let (x, y) = self.cell_of(point);
        self.in_range(x, y)
    }

    #[inline]
    fn distance_to_obstacle(&self, point: WorldPoint) -> f64 {
        let (x, y) = self.cell_of(point);
        if !self.in_range(x, y) {
            return 0.0;
        }
        self.distance[self.index(x as usize, y as usize)] * self.resolution
    }

    #[inline]
    fn occupancy_at(&self, point: WorldPoint) -> Occupancy {
        let (x, y) = self.cell_of(point);
        if !self.in_range(x, y) {
            return Occupancy::Occupied;
        }
        if self.occupied[self.index(x as usize, y as usize)] {
            Occupancy::Occupied
        } else {
            Occupancy::Free
        }
    }
}
