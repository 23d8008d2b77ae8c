//! Path optimizer façade.

use crate::config::PlannerConfig;
use crate::core::VehicleState;
use crate::error::{PlanError, Result};
use crate::field::ObstacleField;
use crate::frenet::{
    reconstruct, reference, stations, Corridor, CorridorBuilder, FootprintChecker,
    FrenetProgram, StationLayout,
};
use crate::solver::{AugLagSolver, NlpSolver, SolverOptions};

/// Computes a smooth, collision-free, kinematically feasible path from a
/// coarse reference polyline.
///
/// One `solve` call is one synchronous run: the reference is trimmed and
/// resampled, corridors are probed once against the reference stations,
/// the Frenet program is solved, and the result is reconstructed and
/// collision-checked. The obstacle field is borrowed immutably throughout.
///
/// # Example
///
/// ```no_run
/// use marga_path::{GridField, PathOptimizer, VehicleState};
///
/// let field = GridField::centered(600, 300, 0.2);
/// let reference: Vec<VehicleState> = (0..20)
///     .map(|i| VehicleState::from_position(i as f64 * 2.0, 0.0))
///     .collect();
/// let start = VehicleState::new(0.0, 0.0, 0.0);
/// let end = VehicleState::new(38.0, 0.0, 0.0);
///
/// let mut optimizer = PathOptimizer::new(reference, start, end, &field);
/// match optimizer.solve() {
///     Ok(path) => println!("{} states", path.len()),
///     Err(e) => eprintln!("failed: {e}"),
/// }
/// ```
pub struct PathOptimizer<'a, F: ObstacleField> {
    reference: Vec<VehicleState>,
    start: VehicleState,
    end: VehicleState,
    field: &'a F,
    config: PlannerConfig,
    smoothed: Vec<VehicleState>,
    stations: Option<StationLayout>,
}

impl<'a, F: ObstacleField> PathOptimizer<'a, F> {
    /// Create an optimizer with the default configuration.
    pub fn new(
        reference: Vec<VehicleState>,
        start: VehicleState,
        end: VehicleState,
        field: &'a F,
    ) -> Self {
        Self::with_config(reference, start, end, field, PlannerConfig::default())
    }

    /// Create an optimizer with an explicit configuration.
    pub fn with_config(
        reference: Vec<VehicleState>,
        start: VehicleState,
        end: VehicleState,
        field: &'a F,
        config: PlannerConfig,
    ) -> Self {
        Self {
            reference,
            start,
            end,
            field,
            config,
            smoothed: Vec::new(),
            stations: None,
        }
    }

    /// Compute the optimized path.
    ///
    /// Returns the dense state sequence from the start to (at or near) the
    /// end, or the terminal failure. All failures log at warning level.
    pub fn solve(&mut self) -> Result<Vec<VehicleState>> {
        match self.run() {
            Ok(path) => Ok(path),
            Err(error) => {
                log::warn!("path optimization failed: {}", error);
                Err(error)
            }
        }
    }

    /// Boolean variant of [`solve`](PathOptimizer::solve): on success the
    /// output vector holds the path, on failure it is cleared.
    pub fn solve_into(&mut self, final_path: &mut Vec<VehicleState>) -> bool {
        match self.solve() {
            Ok(path) => {
                *final_path = path;
                true
            }
            Err(_) => {
                final_path.clear();
                false
            }
        }
    }

    /// The resampled reference of the last (attempted) solve, for
    /// visualization.
    pub fn smoothed_reference(&self) -> &[VehicleState] {
        &self.smoothed
    }

    /// The station layout of the last solve that got past the heading
    /// preconditions.
    pub fn stations(&self) -> Option<&StationLayout> {
        self.stations.as_ref()
    }

    fn run(&mut self) -> Result<Vec<VehicleState>> {
        let optimizer_config = self.config.optimizer;
        let corridor_config = self.config.corridor;

        let resampled = reference::resample(
            &self.reference,
            &self.start,
            optimizer_config.resample_step,
        )?;
        log::debug!(
            "reference resampled: {:.1} m, {} points, cross-track {:.3} m",
            resampled.s_max,
            resampled.s.len(),
            resampled.cross_track
        );
        self.smoothed = resampled.states.clone();

        let layout = stations::build(&resampled, &self.start, &self.end, &optimizer_config)?;
        let station_count = layout.len();
        self.stations = Some(layout);
        let layout = self.stations.as_ref().unwrap();

        let checker = FootprintChecker::new(
            self.field,
            &self.config.vehicle,
            corridor_config.rear_axle_to_center,
        );
        let builder = CorridorBuilder::new(&checker, &corridor_config);
        let corridors: Vec<Corridor> = (2..station_count)
            .map(|i| builder.corridor_for(&layout.state(i)))
            .collect();

        let program = FrenetProgram::new(
            layout,
            &corridors,
            resampled.cross_track,
            self.start.curvature,
            &optimizer_config,
            corridor_config.end_station_clamp,
        );
        let options = SolverOptions::from(&self.config.solver);
        let solution = AugLagSolver.solve(&options, &program);
        log::debug!(
            "solver finished: {:?}, {} iterations, violation {:.2e}",
            solution.status,
            solution.iterations,
            solution.constraint_violation
        );
        if !solution.status.is_success() {
            return Err(PlanError::SolverFailed {
                status: solution.status,
            });
        }

        let offsets = FrenetProgram::offsets(&solution.x, station_count);
        reconstruct::reconstruct(
            layout,
            offsets,
            &self.start,
            &checker,
            optimizer_config.collision_tail_s,
        )
    }
}
