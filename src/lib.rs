//! # Marga-Path: Frenet-Frame Path Optimization
//!
//! A local path optimizer for Ackermann-steered ground vehicles. Given a
//! coarse reference polyline, a start pose (with initial curvature), a
//! desired end pose, and a rasterized obstacle field with a
//! distance-to-obstacle layer, it produces a dense, smooth, collision-free
//! state sequence that minimizes curvature and curvature rate inside
//! lateral free-space corridors.
//!
//! ## Pipeline
//!
//! ```text
//!  reference polyline + start pose
//!            │
//!            ▼
//!  ┌──────────────────┐   trim to closest point, fit x(s)/y(s) splines,
//!  │ ReferenceResample │   resample at 0.3 m, estimate curvature
//!  └────────┬─────────┘
//!           ▼
//!  ┌──────────────────┐   stations every 1.6 m (refined near the start
//!  │  StationLayout   │   for large heading errors), endpoint checks
//!  └────────┬─────────┘
//!           ▼
//!  ┌──────────────────┐   three-circle template marched laterally
//!  │ CorridorBuilder  │◄── ObstacleField (distance-to-obstacle layer)
//!  └────────┬─────────┘
//!           ▼
//!  ┌──────────────────┐   offsets, end heading, slacks, curvatures;
//!  │  FrenetProgram   │──► NlpSolver (augmented Lagrangian)
//!  └────────┬─────────┘
//!           ▼
//!  ┌──────────────────┐   B-spline through offset control points,
//!  │ PathReconstructor │   collision-gated sampling
//!  └────────┬─────────┘
//!           ▼
//!    dense Vec<VehicleState>
//! ```
//!
//! ## Coordinate frame
//!
//! ROS REP-103: X forward, Y left, angles CCW positive from +X and
//! normalized to (-pi, pi]. Distances in meters, curvature in 1/m with
//! positive values turning left. The vehicle reference point is the rear
//! axle.
//!
//! ## Quick start
//!
//! ```no_run
//! use marga_path::{GridField, PathOptimizer, VehicleState, WorldPoint};
//!
//! // 120 m x 60 m free field at 0.2 m resolution, with one obstacle.
//! let mut field = GridField::centered(600, 300, 0.2);
//! field.fill_circle(WorldPoint::new(20.0, 0.5), 1.0);
//! field.recompute();
//!
//! let reference: Vec<VehicleState> = (0..21)
//!     .map(|i| VehicleState::from_position(i as f64 * 2.0, 0.0))
//!     .collect();
//! let start = VehicleState::new(0.0, 0.0, 0.0);
//! let end = VehicleState::new(40.0, 0.0, 0.0);
//!
//! let mut optimizer = PathOptimizer::new(reference, start, end, &field);
//! let path = optimizer.solve().expect("optimization failed");
//! println!("path of {} states, {:.1} m", path.len(), path.last().unwrap().s);
//! ```
//!
//! ## Scope
//!
//! The optimizer is single-threaded and synchronous; one solve is one run
//! against an immutable field snapshot. Dynamic obstacles, velocity
//! planning, and reversing maneuvers are out of scope.

pub mod config;
pub mod core;
pub mod error;
pub mod field;
pub mod frenet;
pub mod solver;
pub mod spline;
pub mod vehicle;

mod optimizer;

pub use config::PlannerConfig;
pub use crate::core::{VehicleState, WorldPoint};
pub use error::{PlanError, Result};
pub use field::{GridField, ObstacleField, Occupancy};
pub use optimizer::PathOptimizer;
pub use vehicle::VehicleGeometry;
