//! Spline interpolants used by the optimizer: arc-length parameterized
//! cubic splines for the reference and a clamped B-spline for the
//! Cartesian reconstruction.

mod bspline;
mod cubic;

pub use bspline::BSpline2;
pub use cubic::CubicSpline;
