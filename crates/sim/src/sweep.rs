//! Systolic blood-pressure reduction sweep
//!
//! Holds every input fixed except systolic BP and evaluates the screening
//! model at every integer value from the target up to the current
//! reading. Height and weight do not change across the sweep, so the
//! derived BMI is constant by construction.

use serde::{Deserialize, Serialize};

use cardiolens_model::schema::ScreeningInput;
use cardiolens_service::screening::ScreeningModel;

use crate::errors::SimulationError;
use crate::round2;

/// One point of a sweep: systolic BP and the predicted risk percentage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepPoint {
    pub systolic_bp: i32,
    /// Predicted risk, percent, rounded to two decimals
    pub risk_pct: f64,
}

/// Ordered sweep curve, ascending in systolic BP
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationCurve {
    pub points: Vec<SweepPoint>,
}

impl SimulationCurve {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Risk reduction achieved by moving from the current reading (last
    /// point) down to the target (first point). Non-positive only when
    /// the sweep has a single point or the model is non-monotonic over
    /// the range.
    pub fn reduction(&self) -> f64 {
        match (self.points.last(), self.points.first()) {
            (Some(current), Some(target)) => round2(current.risk_pct - target.risk_pct),
            _ => 0.0,
        }
    }
}

/// Evaluate the screening model at every integer systolic BP in
/// `[target_bp, base.ap_hi]`, ascending.
///
/// Precondition: `target_bp <= base.ap_hi`; when equal the curve has one
/// point.
pub fn simulate_bp_reduction(
    model: &ScreeningModel,
    base: &ScreeningInput,
    target_bp: i32,
) -> Result<SimulationCurve, SimulationError> {
    if target_bp > base.ap_hi {
        return Err(SimulationError::TargetAboveCurrent {
            target: target_bp,
            current: base.ap_hi,
        });
    }

    let mut points = Vec::with_capacity((base.ap_hi - target_bp + 1) as usize);

    for bp in target_bp..=base.ap_hi {
        let mut input = base.clone();
        input.ap_hi = bp;

        let probability = model.predict(&input);
        points.push(SweepPoint {
            systolic_bp: bp,
            risk_pct: round2(probability * 100.0),
        });
    }

    Ok(SimulationCurve { points })
}
