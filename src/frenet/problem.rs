//! The Frenet-frame nonlinear program.
//!
//! Decision vector, in order: lateral offsets `q[0..N-1]` from the
//! reference at each station, the heading deviation `psi_end` at the final
//! station, one heading-increment slack `p` per interior station, and one
//! decision curvature `kappa` per interior station. The first two offsets
//! and the first curvature are fixed by the start pose through equal
//! bounds.
//!
//! All equality constraints are linear in this discretization and vanish
//! when the solution coincides with the reference.

use crate::config::{CostWeights, OptimizerSection};
use crate::core::math::sq;
use crate::solver::NlpProgram;

use super::corridor::Corridor;
use super::stations::StationLayout;

/// Corridor width below which the reciprocal barrier degenerates and is
/// replaced by a quadratic well around the band center.
const NARROW_BAND: f64 = 0.1;
/// Keeps the reciprocal barrier finite when an offset sits on its bound.
const BARRIER_EPS: f64 = 1e-3;

/// The assembled program for one solve.
pub struct FrenetProgram<'a> {
    stations: &'a StationLayout,
    /// Corridors for stations 2..N-1, unclamped (the variable bounds carry
    /// the final-station clamp, the barrier does not).
    corridors: &'a [Corridor],
    /// Segment lengths between consecutive stations.
    h: Vec<f64>,
    weights: CostWeights,
    lower: Vec<f64>,
    upper: Vec<f64>,
    constraint_lower: Vec<f64>,
    constraint_upper: Vec<f64>,
    guess: Vec<f64>,
}

impl<'a> FrenetProgram<'a> {
    /// Assemble the program from the station layout and corridors.
    ///
    /// `cross_track` is the signed start offset, `start_curvature` the
    /// vehicle's current curvature; both become hard-fixed variables. The
    /// second offset follows from the start heading error.
    pub fn new(
        stations: &'a StationLayout,
        corridors: &'a [Corridor],
        cross_track: f64,
        start_curvature: f64,
        config: &OptimizerSection,
        end_clamp: f64,
    ) -> Self {
        let n = stations.len();
        debug_assert!(n >= 2);
        debug_assert_eq!(corridors.len(), n.saturating_sub(2));

        let h = stations.segment_lengths();
        let num_vars = Self::var_count(n);
        let num_constraints = Self::constraint_count(n);

        let mut lower = vec![f64::NEG_INFINITY; num_vars];
        let mut upper = vec![f64::INFINITY; num_vars];
        let mut guess = vec![0.0; num_vars];

        // Fixed start offsets: the first from the cross-track error, the
        // second determined by the start heading error over the first
        // segment.
        let second_q = cross_track + h[0] * stations.start_heading_error.tan();
        lower[0] = cross_track;
        upper[0] = cross_track;
        guess[0] = cross_track;
        lower[1] = second_q;
        upper[1] = second_q;
        guess[1] = second_q;

        // Corridor bounds for the remaining offsets; the final station is
        // clamped toward the reference.
        for i in 2..n {
            let corridor = corridors[i - 2];
            let mut left = corridor.left;
            let mut right = corridor.right;
            if i == n - 1 {
                left = left.min(end_clamp);
                right = right.max(-end_clamp);
            }
            lower[i] = right.min(left);
            upper[i] = left.max(right);
        }

        // Decision curvatures live in the vehicle's curvature range; the
        // first is fixed to the current curvature.
        let kappa0 = Self::kappa_start(n);
        for i in kappa0..num_vars {
            lower[i] = -config.max_curvature;
            upper[i] = config.max_curvature;
        }
        if n > 2 {
            lower[kappa0] = start_curvature;
            upper[kappa0] = start_curvature;
            guess[kappa0] = start_curvature;
        }

        Self {
            stations,
            corridors,
            h,
            weights: config.weights,
            lower,
            upper,
            constraint_lower: vec![0.0; num_constraints],
            constraint_upper: vec![0.0; num_constraints],
            guess,
        }
    }

    /// Decision vector length for N stations.
    #[inline]
    pub fn var_count(n: usize) -> usize {
        n + 1 + 2 * n.saturating_sub(2)
    }

    /// Constraint count for N stations.
    #[inline]
    pub fn constraint_count(n: usize) -> usize {
        1 + 2 * n.saturating_sub(2)
    }

    /// Index of `psi_end`.
    #[inline]
    fn psi(n: usize) -> usize {
        n
    }

    /// Index of the first `p` slack.
    #[inline]
    fn p_start(n: usize) -> usize {
        n + 1
    }

    /// Index of the first decision curvature.
    #[inline]
    fn kappa_start(n: usize) -> usize {
        n + 1 + n.saturating_sub(2)
    }

    /// Lateral offsets of a solution vector.
    pub fn offsets(solution: &[f64], n: usize) -> &[f64] {
        &solution[..n]
    }

    /// Soft barrier keeping an offset centered in its corridor. Narrow
    /// bands switch to a quadratic well to avoid the reciprocal blowing
    /// up.
    fn barrier(&self, offset: f64, corridor: &Corridor) -> f64 {
        if corridor.width() < NARROW_BAND {
            let mid = (corridor.left + corridor.right) / 2.0;
            sq((offset - mid) / (NARROW_BAND / 2.0))
        } else {
            let to_left = (corridor.left - offset).max(BARRIER_EPS);
            let to_right = (offset - corridor.right).max(BARRIER_EPS);
            1.0 / to_left + 1.0 / to_right
        }
    }
}

impl NlpProgram for FrenetProgram<'_> {
    fn num_vars(&self) -> usize {
        Self::var_count(self.stations.len())
    }

    fn num_constraints(&self) -> usize {
        Self::constraint_count(self.stations.len())
    }

    fn initial_guess(&self) -> Vec<f64> {
        self.guess.clone()
    }

    fn bounds(&self) -> (&[f64], &[f64]) {
        (&self.lower, &self.upper)
    }

    fn constraint_bounds(&self) -> (&[f64], &[f64]) {
        (&self.constraint_lower, &self.constraint_upper)
    }

    fn eval(&self, x: &[f64], fg: &mut [f64]) {
        let n = self.stations.len();
        let h = &self.h;
        let w = &self.weights;
        let kappa0 = Self::kappa_start(n);
        let p0 = Self::p_start(n);
        let interior = n.saturating_sub(2);

        // Cost: small curvature, smooth curvature changes, corridor
        // centrality, faithful arc-length.
        let mut cost = 0.0;
        for j in 0..interior {
            cost += w.curvature * sq(x[kappa0 + j]);
        }
        for j in 1..interior {
            cost += w.curvature_rate * sq(x[kappa0 + j] - x[kappa0 + j - 1]);
        }
        for i in 2..n {
            cost += w.boundary * self.barrier(x[i], &self.corridors[i - 2]);
        }
        for i in 0..n - 1 {
            cost += w.arc_length * sq(x[i + 1] - x[i]) / h[i];
        }
        fg[0] = cost;

        // End-heading relation: psi_end equals the offset slope of the
        // final segment.
        fg[1] = x[Self::psi(n)] - (x[n - 1] - x[n - 2]) / h[n - 2];

        // Curvature coupling at each interior station: the decision
        // curvature equals the reference curvature plus the lateral
        // second difference (nonuniform spacing).
        for j in 0..interior {
            let i = j + 1;
            let second_difference =
                2.0 * ((x[i + 1] - x[i]) / h[i] - (x[i] - x[i - 1]) / h[i - 1])
                    / (h[i - 1] + h[i]);
            fg[2 + j] = x[kappa0 + j] - self.stations.curvature[i] - second_difference;
        }

        // Slack definition: p is the heading increment over the segment
        // following its station.
        for j in 0..interior {
            fg[2 + interior + j] = x[p0 + j] - h[j + 1] * x[kappa0 + j];
        }
    }
}
