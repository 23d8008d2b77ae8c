//! The Frenet-frame optimizer core: reference resampling, corridor
//! probing, the nonlinear program, and Cartesian reconstruction.

pub mod corridor;
pub mod curvature;
pub mod footprint;
pub mod problem;
pub mod reconstruct;
pub mod reference;
pub mod stations;

pub use corridor::{Corridor, CorridorBuilder};
pub use footprint::FootprintChecker;
pub use problem::FrenetProgram;
pub use reference::ResampledReference;
pub use stations::StationLayout;
