//! Augmented-Lagrangian solver over projected spectral gradient descent.
//!
//! Outer iterations update Lagrange multiplier estimates for the (clamped)
//! constraint residuals and grow the quadratic penalty when feasibility
//! stalls. Inner iterations minimize the augmented Lagrangian over the box
//! bounds with Barzilai-Borwein steps, projection, and Armijo
//! backtracking. Gradients come from central differences, so programs only
//! provide the combined objective/constraint evaluation.
//!
//! The solve is fully deterministic: no randomization, no threading, and
//! the wall-clock budget only decides when to stop, never what to compute.

use std::time::Instant;

use super::{NlpProgram, NlpSolver, SolverOptions, SolverResult, SolverStatus};

const PENALTY_GROWTH: f64 = 10.0;
const MAX_PENALTY: f64 = 1e8;
/// Required feasibility progress per outer iteration before the penalty grows.
const PROGRESS_RATIO: f64 = 0.25;
const ARMIJO_SLOPE: f64 = 1e-4;
const MAX_BACKTRACKS: usize = 30;
/// Barzilai-Borwein step clamp.
const STEP_MIN: f64 = 1e-8;
const STEP_MAX: f64 = 1e4;

/// Derivative-free augmented-Lagrangian solver.
#[derive(Clone, Copy, Debug, Default)]
pub struct AugLagSolver;

/// Scratch space shared by merit evaluations.
struct Workspace<'a, P: NlpProgram> {
    program: &'a P,
    constraint_lower: &'a [f64],
    constraint_upper: &'a [f64],
    fg: Vec<f64>,
    residual: Vec<f64>,
}

impl<'a, P: NlpProgram> Workspace<'a, P> {
    fn new(program: &'a P) -> Self {
        let m = program.num_constraints();
        let (constraint_lower, constraint_upper) = program.constraint_bounds();
        Self {
            program,
            constraint_lower,
            constraint_upper,
            fg: vec![0.0; 1 + m],
            residual: vec![0.0; m],
        }
    }

    /// Augmented Lagrangian value at x; refreshes `fg` and `residual`.
    fn merit(&mut self, x: &[f64], lambda: &[f64], penalty: f64) -> f64 {
        self.program.eval(x, &mut self.fg);
        let mut value = self.fg[0];
        for j in 0..self.residual.len() {
            let c = self.fg[1 + j];
            let r = c - c.clamp(self.constraint_lower[j], self.constraint_upper[j]);
            self.residual[j] = r;
            value += lambda[j] * r + 0.5 * penalty * r * r;
        }
        value
    }

    /// Constraint violation (infinity norm) of the last evaluation.
    fn violation(&self) -> f64 {
        self.residual.iter().fold(0.0, |acc, r| acc.max(r.abs()))
    }
}

/// Central-difference gradient of the merit function over the free
/// variables; pinned variables (equal bounds) get a zero component.
fn merit_gradient<P: NlpProgram>(
    workspace: &mut Workspace<'_, P>,
    x: &mut [f64],
    lambda: &[f64],
    penalty: f64,
    lower: &[f64],
    upper: &[f64],
    grad: &mut [f64],
) {
    for i in 0..x.len() {
        if upper[i] - lower[i] <= f64::EPSILON {
            grad[i] = 0.0;
            continue;
        }
        let h = 1e-6 * (1.0 + x[i].abs());
        let xi = x[i];
        x[i] = xi + h;
        let plus = workspace.merit(x, lambda, penalty);
        x[i] = xi - h;
        let minus = workspace.merit(x, lambda, penalty);
        x[i] = xi;
        grad[i] = (plus - minus) / (2.0 * h);
    }
}

#[inline]
fn project(x: &mut [f64], lower: &[f64], upper: &[f64]) {
    for i in 0..x.len() {
        x[i] = x[i].clamp(lower[i], upper[i]);
    }
}

/// Infinity norm of the projected gradient `P(x - g) - x`, the box-bound
/// optimality measure.
fn projected_gradient_norm(x: &[f64], grad: &[f64], lower: &[f64], upper: &[f64]) -> f64 {
    let mut worst = 0.0_f64;
    for i in 0..x.len() {
        let moved = (x[i] - grad[i]).clamp(lower[i], upper[i]);
        worst = worst.max((moved - x[i]).abs());
    }
    worst
}

impl NlpSolver for AugLagSolver {
    fn solve<P: NlpProgram>(&self, options: &SolverOptions, program: &P) -> SolverResult {
        let n = program.num_vars();
        let m = program.num_constraints();
        let (lower, upper) = program.bounds();
        let started = Instant::now();

        let mut workspace = Workspace::new(program);
        let mut x = program.initial_guess();
        project(&mut x, lower, upper);

        let mut lambda = vec![0.0; m];
        let mut penalty = options.initial_penalty.max(1.0);
        let mut grad = vec![0.0; n];
        let mut status = SolverStatus::IterationLimit;
        let mut iterations = 0;
        let mut previous_violation = f64::INFINITY;
        let mut out_of_time = false;

        'outer: for _ in 0..options.max_outer_iterations {
            let mut phi = workspace.merit(&x, &lambda, penalty);
            if !phi.is_finite() {
                status = SolverStatus::NumericError;
                break;
            }
            merit_gradient(
                &mut workspace,
                &mut x,
                &lambda,
                penalty,
                lower,
                upper,
                &mut grad,
            );

            let mut step = 1.0;
            let mut inner_converged = false;
            for _ in 0..options.max_inner_iterations {
                iterations += 1;

                if projected_gradient_norm(&x, &grad, lower, upper)
                    < options.optimality_tolerance
                {
                    inner_converged = true;
                    break;
                }

                // Projected spectral step as the trial direction.
                let mut direction = vec![0.0; n];
                let mut slope = 0.0;
                for i in 0..n {
                    let target = (x[i] - step * grad[i]).clamp(lower[i], upper[i]);
                    direction[i] = target - x[i];
                    slope += grad[i] * direction[i];
                }
                if slope >= 0.0 {
                    inner_converged = true;
                    break;
                }

                // Armijo backtracking along the projected direction.
                let mut alpha = 1.0;
                let mut accepted = None;
                for _ in 0..MAX_BACKTRACKS {
                    let candidate: Vec<f64> =
                        (0..n).map(|i| x[i] + alpha * direction[i]).collect();
                    let value = workspace.merit(&candidate, &lambda, penalty);
                    if value <= phi + ARMIJO_SLOPE * alpha * slope {
                        accepted = Some((candidate, value));
                        break;
                    }
                    alpha *= 0.5;
                }
                let Some((candidate, value)) = accepted else {
                    // Descent stalled at evaluation noise.
                    inner_converged = true;
                    break;
                };

                let mut new_grad = vec![0.0; n];
                let mut new_x = candidate;
                merit_gradient(
                    &mut workspace,
                    &mut new_x,
                    &lambda,
                    penalty,
                    lower,
                    upper,
                    &mut new_grad,
                );

                // Barzilai-Borwein spectral step length.
                let mut ss = 0.0;
                let mut sy = 0.0;
                for i in 0..n {
                    let si = new_x[i] - x[i];
                    let yi = new_grad[i] - grad[i];
                    ss += si * si;
                    sy += si * yi;
                }
                step = if sy > 1e-12 {
                    (ss / sy).clamp(STEP_MIN, STEP_MAX)
                } else {
                    1.0
                };

                x = new_x;
                phi = value;
                grad = new_grad;

                if started.elapsed().as_secs_f64() > options.max_cpu_time {
                    out_of_time = true;
                    break;
                }
            }

            // Refresh residuals at the accepted iterate (backtracking may
            // have evaluated a rejected candidate last).
            workspace.merit(&x, &lambda, penalty);
            let violation = workspace.violation();

            if violation <= options.feasibility_tolerance && inner_converged {
                status = SolverStatus::Solved;
                break 'outer;
            }

            for j in 0..m {
                lambda[j] += penalty * workspace.residual[j];
            }
            if violation > PROGRESS_RATIO * previous_violation && penalty < MAX_PENALTY {
                penalty *= PENALTY_GROWTH;
            }
            previous_violation = violation;

            if out_of_time {
                status = SolverStatus::TimeLimit;
                break;
            }
        }

        workspace.merit(&x, &lambda, penalty);
        let objective = workspace.fg[0];
        let constraint_violation = workspace.violation();
        SolverResult {
            x,
            status,
            objective,
            constraint_violation,
            iterations,
        }
    }
}
