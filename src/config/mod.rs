//! Planner configuration.
//!
//! All tunables live in serde sections with per-field defaults so a YAML
//! file can override any subset. `PlannerConfig::default()` reproduces the
//! built-in constants.

mod defaults;

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::vehicle::VehicleGeometry;

/// Configuration loading failure.
#[derive(Error, Debug)]
pub enum ConfigLoadError {
    #[error("config io error: {0}")]
    Io(String),
    #[error("config parse error: {0}")]
    Parse(String),
}

/// Cost weights of the Frenet program.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct CostWeights {
    /// Weight on the sum of squared curvatures.
    #[serde(default = "defaults::curvature_weight")]
    pub curvature: f64,
    /// Weight on the sum of squared curvature changes.
    #[serde(default = "defaults::curvature_rate_weight")]
    pub curvature_rate: f64,
    /// Weight on the soft barrier keeping offsets away from corridor walls.
    #[serde(default = "defaults::boundary_weight")]
    pub boundary: f64,
    /// Weight on arc-length deviation from the reference segments.
    #[serde(default = "defaults::arc_length_weight")]
    pub arc_length: f64,
}

impl Default for CostWeights {
    fn default() -> Self {
        Self {
            curvature: defaults::curvature_weight(),
            curvature_rate: defaults::curvature_rate_weight(),
            boundary: defaults::boundary_weight(),
            arc_length: defaults::arc_length_weight(),
        }
    }
}

/// Stationing, resampling and cost settings of the optimizer core.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct OptimizerSection {
    /// Nominal station spacing along the reference (m).
    #[serde(default = "defaults::delta_s")]
    pub delta_s: f64,
    /// Reference resampling step (m).
    #[serde(default = "defaults::resample_step")]
    pub resample_step: f64,
    /// Curvature bound of the vehicle (1/m).
    #[serde(default = "defaults::max_curvature")]
    pub max_curvature: f64,
    /// Abort threshold for the start-heading error (degrees).
    #[serde(default = "defaults::start_heading_abort_deg")]
    pub start_heading_abort_deg: f64,
    /// Start-heading error above which the first stations are refined
    /// to a third of the nominal spacing (degrees).
    #[serde(default = "defaults::refine_threshold_deg")]
    pub refine_threshold_deg: f64,
    /// Abort threshold for the end-heading error (degrees).
    #[serde(default = "defaults::end_heading_abort_deg")]
    pub end_heading_abort_deg: f64,
    /// Arc-length beyond which a blocked sample truncates the output
    /// instead of failing the solve (m).
    #[serde(default = "defaults::collision_tail_s")]
    pub collision_tail_s: f64,
    /// Cost weights.
    #[serde(default)]
    pub weights: CostWeights,
}

impl Default for OptimizerSection {
    fn default() -> Self {
        Self {
            delta_s: defaults::delta_s(),
            resample_step: defaults::resample_step(),
            max_curvature: defaults::max_curvature(),
            start_heading_abort_deg: defaults::start_heading_abort_deg(),
            refine_threshold_deg: defaults::refine_threshold_deg(),
            end_heading_abort_deg: defaults::end_heading_abort_deg(),
            collision_tail_s: defaults::collision_tail_s(),
            weights: CostWeights::default(),
        }
    }
}

/// Lateral free-space probing settings.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct CorridorSection {
    /// Lateral probing step (m).
    #[serde(default = "defaults::probe_step")]
    pub probe_step: f64,
    /// Maximum lateral probing distance (m).
    #[serde(default = "defaults::probe_max")]
    pub probe_max: f64,
    /// Distance from the rear axle to the vehicle center (m); the probe
    /// template is placed around the center for Ackermann vehicles.
    #[serde(default = "defaults::rear_axle_to_center")]
    pub rear_axle_to_center: f64,
    /// Lateral clamp applied to the final station's corridor (m).
    #[serde(default = "defaults::end_station_clamp")]
    pub end_station_clamp: f64,
}

impl Default for CorridorSection {
    fn default() -> Self {
        Self {
            probe_step: defaults::probe_step(),
            probe_max: defaults::probe_max(),
            rear_axle_to_center: defaults::rear_axle_to_center(),
            end_station_clamp: defaults::end_station_clamp(),
        }
    }
}

/// NLP solver settings.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct SolverSection {
    /// Wall-clock budget for one solve (seconds).
    #[serde(default = "defaults::max_cpu_time")]
    pub max_cpu_time: f64,
    /// Maximum augmented-Lagrangian (multiplier update) iterations.
    #[serde(default = "defaults::max_outer_iterations")]
    pub max_outer_iterations: usize,
    /// Maximum descent iterations per multiplier update.
    #[serde(default = "defaults::max_inner_iterations")]
    pub max_inner_iterations: usize,
    /// Constraint violation tolerance.
    #[serde(default = "defaults::feasibility_tolerance")]
    pub feasibility_tolerance: f64,
    /// Projected-gradient tolerance.
    #[serde(default = "defaults::optimality_tolerance")]
    pub optimality_tolerance: f64,
    /// Initial quadratic penalty on constraint violation.
    #[serde(default = "defaults::initial_penalty")]
    pub initial_penalty: f64,
}

impl Default for SolverSection {
    fn default() -> Self {
        Self {
            max_cpu_time: defaults::max_cpu_time(),
            max_outer_iterations: defaults::max_outer_iterations(),
            max_inner_iterations: defaults::max_inner_iterations(),
            feasibility_tolerance: defaults::feasibility_tolerance(),
            optimality_tolerance: defaults::optimality_tolerance(),
            initial_penalty: defaults::initial_penalty(),
        }
    }
}

/// Full planner configuration.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
pub struct PlannerConfig {
    /// Vehicle body dimensions.
    #[serde(default)]
    pub vehicle: VehicleGeometry,

    /// Corridor probing settings.
    #[serde(default)]
    pub corridor: CorridorSection,

    /// Optimizer core settings.
    #[serde(default)]
    pub optimizer: OptimizerSection,

    /// Solver settings.
    #[serde(default)]
    pub solver: SolverSection,
}

impl PlannerConfig {
    /// Load configuration from a YAML file.
    pub fn load(path: &Path) -> Result<Self, ConfigLoadError> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| ConfigLoadError::Io(e.to_string()))?;
        Self::from_yaml(&contents)
    }

    /// Parse from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigLoadError> {
        serde_yaml::from_str(yaml).map_err(|e| ConfigLoadError::Parse(e.to_string()))
    }
}
