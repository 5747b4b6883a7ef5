//! Prescription generation from the gap between two profiles
//!
//! Emits one entry per risk factor that improves between the current and
//! target profile, in a fixed priority order: blood pressure, weight,
//! cholesterol, smoking, activity. When nothing differs the output is a
//! single "already optimal" entry.

use serde::{Deserialize, Serialize};

use cardiolens_model::schema::{Level3, ScreeningInput};

/// Risk-factor categories in presentation priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskFactor {
    BloodPressure,
    Weight,
    Cholesterol,
    Smoking,
    Activity,
    AlreadyOptimal,
}

impl RiskFactor {
    /// Display title of the category
    pub fn title(self) -> &'static str {
        match self {
            RiskFactor::BloodPressure => "Blood Pressure",
            RiskFactor::Weight => "Weight Loss",
            RiskFactor::Cholesterol => "Cholesterol",
            RiskFactor::Smoking => "Quit Smoking",
            RiskFactor::Activity => "Exercise",
            RiskFactor::AlreadyOptimal => "Already Optimal",
        }
    }
}

/// One prescription entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrescriptionItem {
    pub factor: RiskFactor,
    pub description: String,
    pub magnitude: String,
}

/// Lifestyle goals captured by the what-if form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LifestyleGoals {
    pub target_bp: i32,
    pub target_weight_kg: f64,
    pub target_cholesterol: Level3,
    pub quit_smoking: bool,
    pub become_active: bool,
}

/// Build the target profile a goal set implies: goal BP, weight, and
/// cholesterol, glucose back to normal, alcohol dropped, smoking per the
/// cessation choice, activity per the exercise choice.
pub fn apply_goals(current: &ScreeningInput, goals: &LifestyleGoals) -> ScreeningInput {
    ScreeningInput {
        weight_kg: goals.target_weight_kg,
        ap_hi: goals.target_bp,
        cholesterol: goals.target_cholesterol,
        gluc: Level3::Normal,
        smoke: current.smoke && !goals.quit_smoking,
        alco: false,
        active: current.active || goals.become_active,
        ..current.clone()
    }
}

/// Compare the two profiles and emit the ordered improvement list
pub fn generate_prescription(
    current: &ScreeningInput,
    target: &ScreeningInput,
) -> Vec<PrescriptionItem> {
    let mut items = Vec::new();

    if target.ap_hi < current.ap_hi {
        items.push(PrescriptionItem {
            factor: RiskFactor::BloodPressure,
            description: format!(
                "Reduce systolic BP from {} to {} mmHg",
                current.ap_hi, target.ap_hi
            ),
            magnitude: format!("-{} mmHg", current.ap_hi - target.ap_hi),
        });
    }

    if target.weight_kg < current.weight_kg {
        let loss = current.weight_kg - target.weight_kg;
        items.push(PrescriptionItem {
            factor: RiskFactor::Weight,
            description: format!("Lose {loss:.1} kg through diet and exercise"),
            magnitude: format!("-{loss:.1} kg"),
        });
    }

    if target.cholesterol < current.cholesterol {
        items.push(PrescriptionItem {
            factor: RiskFactor::Cholesterol,
            description: "Improve cholesterol through diet, statins if needed".to_string(),
            magnitude: "Improved".to_string(),
        });
    }

    if current.smoke && !target.smoke {
        items.push(PrescriptionItem {
            factor: RiskFactor::Smoking,
            description: "Cessation reduces cardiovascular risk within 1 year".to_string(),
            magnitude: "Eliminated".to_string(),
        });
    }

    if !current.active && target.active {
        items.push(PrescriptionItem {
            factor: RiskFactor::Activity,
            description: "30 min moderate activity, 5x per week".to_string(),
            magnitude: "Active".to_string(),
        });
    }

    if items.is_empty() {
        items.push(PrescriptionItem {
            factor: RiskFactor::AlreadyOptimal,
            description: "Your goals match your current lifestyle".to_string(),
            magnitude: "Maintained".to_string(),
        });
    }

    items
}
