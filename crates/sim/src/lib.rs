//! What-if simulation engine over the screening model
//!
//! Composes repeated inference calls into counterfactual views: systolic
//! blood-pressure sweeps, ten-year aging trajectories under two fixed
//! lifestyle scenarios, and the prescription derived from the gap between
//! a current and a target profile. The engine is stateless between calls
//! and purely associative: it projects what the model predicts under
//! changed inputs, it does not infer causation.
//!
//! Modules:
//! - `sweep`: blood-pressure reduction curve
//! - `trajectory`: aging projection and reduction summary
//! - `prescription`: ordered lifestyle-change list
//! - `errors`: simulation preconditions

pub mod errors;
pub mod prescription;
pub mod sweep;
pub mod trajectory;

pub use errors::SimulationError;
pub use prescription::{apply_goals, generate_prescription, LifestyleGoals, PrescriptionItem, RiskFactor};
pub use sweep::{simulate_bp_reduction, SimulationCurve, SweepPoint};
pub use trajectory::{
    project_trajectory, reduction_summary, ReductionSummary, TrajectoryPoint, TrajectoryTable,
    DEFAULT_RISK_POINTS_PER_YEAR, TRAJECTORY_YEARS,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Round to two decimals, as risk percentages are presented
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Round to one decimal
pub(crate) fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
