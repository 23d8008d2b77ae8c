//! Error types for path optimization.

use thiserror::Error;

use crate::solver::SolverStatus;

/// Terminal failures of a `solve` call. There is no retry inside the
/// optimizer; the caller is expected to try a different reference or abort.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum PlanError {
    #[error("reference path is empty or too short to interpolate")]
    EmptyReference,

    #[error("start heading deviates {error_deg:.1} deg from the reference tangent")]
    HeadingMismatchStart { error_deg: f64 },

    #[error("end heading deviates {error_deg:.1} deg from the reference tangent")]
    HeadingMismatchEnd { error_deg: f64 },

    #[error("NLP solver stopped without success ({status:?})")]
    SolverFailed { status: SolverStatus },

    #[error("reconstructed path contains non-finite coordinates")]
    NumericFailure,

    #[error("reconstructed path collides with an obstacle at s = {s:.2} m")]
    Collision { s: f64 },
}

pub type Result<T> = std::result::Result<T, PlanError>;
