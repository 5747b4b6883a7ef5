//! Simulation precondition errors

use thiserror::Error;

/// Errors raised when a simulation request violates its domain
#[derive(Debug, Error)]
pub enum SimulationError {
    #[error("target systolic BP {target} exceeds the current value {current}")]
    TargetAboveCurrent { target: i32, current: i32 },
}
