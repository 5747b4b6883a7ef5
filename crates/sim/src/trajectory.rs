//! Ten-year risk trajectory under two fixed lifestyle scenarios
//!
//! For each year offset the screening model is evaluated twice at the
//! projected age: once with every "current" habit held fixed and once
//! with every "target" habit held fixed. Age is the only variable that
//! changes within a scenario, isolating the effect of aging alone under
//! each lifestyle.

use serde::{Deserialize, Serialize};

use cardiolens_model::schema::ScreeningInput;
use cardiolens_service::screening::ScreeningModel;

use crate::{round1, round2};

/// Projection horizon in years
pub const TRAJECTORY_YEARS: u32 = 10;

/// Assumed population risk increase per year of aging, in percentage
/// points. An informal linear heuristic used only to translate a risk
/// reduction into "years of aging reversed" for presentation; it is not
/// clinically validated.
pub const DEFAULT_RISK_POINTS_PER_YEAR: f64 = 3.5;

/// One trajectory row: projected age and both scenario risks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrajectoryPoint {
    pub age: u32,
    /// Risk percent under current habits, rounded to two decimals
    pub current_risk_pct: f64,
    /// Risk percent under target habits, rounded to two decimals
    pub target_risk_pct: f64,
}

/// Ordered trajectory, ascending by one year per row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrajectoryTable {
    pub points: Vec<TrajectoryPoint>,
}

impl TrajectoryTable {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Project risk from `age0` through `age0 + 10` under both profiles.
/// Always returns exactly 11 rows.
pub fn project_trajectory(
    model: &ScreeningModel,
    current: &ScreeningInput,
    target: &ScreeningInput,
    age0: u32,
) -> TrajectoryTable {
    let mut points = Vec::with_capacity(TRAJECTORY_YEARS as usize + 1);

    for offset in 0..=TRAJECTORY_YEARS {
        let age = age0 + offset;

        let mut current_at_age = current.clone();
        current_at_age.age_years = f64::from(age);

        let mut target_at_age = target.clone();
        target_at_age.age_years = f64::from(age);

        points.push(TrajectoryPoint {
            age,
            current_risk_pct: round2(model.predict(&current_at_age) * 100.0),
            target_risk_pct: round2(model.predict(&target_at_age) * 100.0),
        });
    }

    TrajectoryTable { points }
}

/// Summary of a risk change between the current and target scenario at
/// the starting age
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReductionSummary {
    /// current risk% minus target risk%
    pub reduction_points: f64,
    /// Reduction translated into years of cardiovascular aging, rounded
    /// to one decimal
    pub years_equivalent: f64,
}

/// Translate a risk reduction into equivalent years of aging using the
/// supplied points-per-year rate (see [`DEFAULT_RISK_POINTS_PER_YEAR`]).
pub fn reduction_summary(
    current_risk_pct: f64,
    target_risk_pct: f64,
    points_per_year: f64,
) -> ReductionSummary {
    let reduction_points = current_risk_pct - target_risk_pct;
    ReductionSummary {
        reduction_points,
        years_equivalent: round1(reduction_points / points_per_year),
    }
}
