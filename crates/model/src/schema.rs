//! Fixed feature schemas and typed inputs for both model tiers
//!
//! The screening model consumes 12 basic biometric features; the clinical
//! model consumes 15 features including one-hot-encoded categorical
//! groups. Each schema is fixed and ordered: training and inference both
//! assemble vectors in exactly this order.
//!
//! One-hot contract: within each categorical group, at most one flag is
//! set; all flags zero encodes the baseline level (ASY chest pain, LVH
//! resting ECG, Down ST slope). The typed [`ClinicalInput`] encoder makes
//! this impossible to get wrong; callers building raw mappings by hand
//! carry the contract themselves.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Screening-tier feature names in training order
pub const SCREENING_FEATURES: [&str; 12] = [
    "age_years",
    "gender",
    "height",
    "weight",
    "bmi",
    "ap_hi",
    "ap_lo",
    "cholesterol",
    "gluc",
    "smoke",
    "alco",
    "active",
];

/// Clinical-tier feature names in training order
pub const CLINICAL_FEATURES: [&str; 15] = [
    "Age",
    "RestingBP",
    "Cholesterol",
    "FastingBS",
    "MaxHR",
    "Oldpeak",
    "Sex_M",
    "ChestPainType_ATA",
    "ChestPainType_NAP",
    "ChestPainType_TA",
    "RestingECG_Normal",
    "RestingECG_ST",
    "ExerciseAngina_Y",
    "ST_Slope_Flat",
    "ST_Slope_Up",
];

/// Human-readable label for a clinical feature name
pub fn clinical_label(feature: &str) -> &str {
    match feature {
        "Age" => "Age",
        "RestingBP" => "Resting BP",
        "Cholesterol" => "Cholesterol",
        "FastingBS" => "Fasting Blood Sugar",
        "MaxHR" => "Max Heart Rate",
        "Oldpeak" => "ST Depression (Oldpeak)",
        "Sex_M" => "Sex (Male)",
        "ChestPainType_ATA" => "Chest Pain: Atypical Angina",
        "ChestPainType_NAP" => "Chest Pain: Non-Anginal",
        "ChestPainType_TA" => "Chest Pain: Typical Angina",
        "RestingECG_Normal" => "ECG: Normal",
        "RestingECG_ST" => "ECG: ST Abnormality",
        "ExerciseAngina_Y" => "Exercise-Induced Angina",
        "ST_Slope_Flat" => "ST Slope: Flat",
        "ST_Slope_Up" => "ST Slope: Upsloping",
        other => other,
    }
}

/// Gender code used by the population table (1 = female, 2 = male)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Female,
    Male,
}

impl Gender {
    /// Dataset encoding of the gender code
    pub fn code(self) -> f64 {
        match self {
            Gender::Female => 1.0,
            Gender::Male => 2.0,
        }
    }
}

/// Three-level ordinal scale for cholesterol and glucose (1 = normal,
/// 2 = above normal, 3 = well above normal)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Level3 {
    Normal,
    AboveNormal,
    WellAboveNormal,
}

impl Level3 {
    /// Dataset encoding of the ordinal level
    pub fn code(self) -> f64 {
        match self {
            Level3::Normal => 1.0,
            Level3::AboveNormal => 2.0,
            Level3::WellAboveNormal => 3.0,
        }
    }
}

fn flag(value: bool) -> f64 {
    if value {
        1.0
    } else {
        0.0
    }
}

/// Screening-tier input profile
///
/// BMI is intentionally absent: it is always derived from height and
/// weight at vector-assembly time, so it cannot drift from them under
/// simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreeningInput {
    pub age_years: f64,
    pub gender: Gender,
    pub height_cm: f64,
    pub weight_kg: f64,
    /// Systolic blood pressure (mmHg)
    pub ap_hi: i32,
    /// Diastolic blood pressure (mmHg)
    pub ap_lo: i32,
    pub cholesterol: Level3,
    pub gluc: Level3,
    pub smoke: bool,
    pub alco: bool,
    pub active: bool,
}

impl ScreeningInput {
    /// Body-mass index derived from height and weight
    pub fn bmi(&self) -> f64 {
        self.weight_kg / (self.height_cm / 100.0).powi(2)
    }

    /// Assemble the 12-feature vector in [`SCREENING_FEATURES`] order
    pub fn feature_vector(&self) -> Vec<f64> {
        vec![
            self.age_years,
            self.gender.code(),
            self.height_cm,
            self.weight_kg,
            self.bmi(),
            f64::from(self.ap_hi),
            f64::from(self.ap_lo),
            self.cholesterol.code(),
            self.gluc.code(),
            flag(self.smoke),
            flag(self.alco),
            flag(self.active),
        ]
    }
}

/// Patient sex for the clinical table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sex {
    Female,
    Male,
}

/// Chest pain type; `Asymptomatic` is the all-zero baseline of its
/// one-hot group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChestPainType {
    Asymptomatic,
    AtypicalAngina,
    NonAnginal,
    TypicalAngina,
}

/// Resting ECG reading; `Lvh` is the all-zero baseline of its one-hot
/// group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RestingEcg {
    Lvh,
    Normal,
    St,
}

/// Peak-exercise ST slope; `Down` is the all-zero baseline of its one-hot
/// group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StSlope {
    Down,
    Flat,
    Up,
}

/// Clinical-tier input profile
///
/// The typed fields encode into the full 15-field mapping the clinical
/// model expects, with every one-hot group encoded exactly as during
/// training.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClinicalInput {
    pub age: f64,
    /// Resting blood pressure (mmHg)
    pub resting_bp: f64,
    /// Serum cholesterol (mg/dL)
    pub cholesterol: f64,
    /// Fasting blood sugar above 120 mg/dL
    pub fasting_bs: bool,
    pub max_hr: f64,
    /// ST depression induced by exercise
    pub oldpeak: f64,
    pub sex: Sex,
    pub chest_pain: ChestPainType,
    pub resting_ecg: RestingEcg,
    pub exercise_angina: bool,
    pub st_slope: StSlope,
}

impl ClinicalInput {
    /// One-hot encode into the complete mapping over [`CLINICAL_FEATURES`]
    pub fn to_feature_map(&self) -> BTreeMap<String, f64> {
        let mut map = BTreeMap::new();
        map.insert("Age".to_string(), self.age);
        map.insert("RestingBP".to_string(), self.resting_bp);
        map.insert("Cholesterol".to_string(), self.cholesterol);
        map.insert("FastingBS".to_string(), flag(self.fasting_bs));
        map.insert("MaxHR".to_string(), self.max_hr);
        map.insert("Oldpeak".to_string(), self.oldpeak);
        map.insert("Sex_M".to_string(), flag(self.sex == Sex::Male));
        map.insert(
            "ChestPainType_ATA".to_string(),
            flag(self.chest_pain == ChestPainType::AtypicalAngina),
        );
        map.insert(
            "ChestPainType_NAP".to_string(),
            flag(self.chest_pain == ChestPainType::NonAnginal),
        );
        map.insert(
            "ChestPainType_TA".to_string(),
            flag(self.chest_pain == ChestPainType::TypicalAngina),
        );
        map.insert(
            "RestingECG_Normal".to_string(),
            flag(self.resting_ecg == RestingEcg::Normal),
        );
        map.insert(
            "RestingECG_ST".to_string(),
            flag(self.resting_ecg == RestingEcg::St),
        );
        map.insert(
            "ExerciseAngina_Y".to_string(),
            flag(self.exercise_angina),
        );
        map.insert(
            "ST_Slope_Flat".to_string(),
            flag(self.st_slope == StSlope::Flat),
        );
        map.insert(
            "ST_Slope_Up".to_string(),
            flag(self.st_slope == StSlope::Up),
        );
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_input() -> ScreeningInput {
        ScreeningInput {
            age_years: 45.0,
            gender: Gender::Male,
            height_cm: 170.0,
            weight_kg: 75.0,
            ap_hi: 130,
            ap_lo: 85,
            cholesterol: Level3::Normal,
            gluc: Level3::Normal,
            smoke: false,
            alco: false,
            active: true,
        }
    }

    #[test]
    fn test_bmi_is_derived() {
        let input = sample_input();
        // 75 / 1.70^2 = 25.95...
        assert!((input.bmi() - 25.951557).abs() < 1e-5);
    }

    #[test]
    fn test_screening_vector_order() {
        let input = sample_input();
        let vector = input.feature_vector();

        assert_eq!(vector.len(), SCREENING_FEATURES.len());
        assert_eq!(vector[0], 45.0); // age_years
        assert_eq!(vector[1], 2.0); // gender code
        assert_eq!(vector[4], input.bmi()); // derived bmi
        assert_eq!(vector[5], 130.0); // ap_hi
        assert_eq!(vector[9], 0.0); // smoke
        assert_eq!(vector[11], 1.0); // active
    }

    #[test]
    fn test_level3_ordering() {
        assert!(Level3::Normal < Level3::AboveNormal);
        assert!(Level3::AboveNormal < Level3::WellAboveNormal);
    }

    #[test]
    fn test_clinical_map_covers_schema() {
        let input = ClinicalInput {
            age: 54.0,
            resting_bp: 140.0,
            cholesterol: 239.0,
            fasting_bs: false,
            max_hr: 160.0,
            oldpeak: 1.2,
            sex: Sex::Male,
            chest_pain: ChestPainType::AtypicalAngina,
            resting_ecg: RestingEcg::Normal,
            exercise_angina: false,
            st_slope: StSlope::Up,
        };

        let map = input.to_feature_map();
        assert_eq!(map.len(), CLINICAL_FEATURES.len());
        for feature in CLINICAL_FEATURES {
            assert!(map.contains_key(feature), "missing {feature}");
        }

        assert_eq!(map["Sex_M"], 1.0);
        assert_eq!(map["ChestPainType_ATA"], 1.0);
        assert_eq!(map["ChestPainType_NAP"], 0.0);
        assert_eq!(map["ST_Slope_Up"], 1.0);
        assert_eq!(map["ST_Slope_Flat"], 0.0);
    }

    #[test]
    fn test_baseline_levels_encode_all_zero() {
        let input = ClinicalInput {
            age: 60.0,
            resting_bp: 150.0,
            cholesterol: 300.0,
            fasting_bs: true,
            max_hr: 120.0,
            oldpeak: 2.5,
            sex: Sex::Female,
            chest_pain: ChestPainType::Asymptomatic,
            resting_ecg: RestingEcg::Lvh,
            exercise_angina: true,
            st_slope: StSlope::Down,
        };

        let map = input.to_feature_map();
        assert_eq!(map["ChestPainType_ATA"], 0.0);
        assert_eq!(map["ChestPainType_NAP"], 0.0);
        assert_eq!(map["ChestPainType_TA"], 0.0);
        assert_eq!(map["RestingECG_Normal"], 0.0);
        assert_eq!(map["RestingECG_ST"], 0.0);
        assert_eq!(map["ST_Slope_Flat"], 0.0);
        assert_eq!(map["ST_Slope_Up"], 0.0);
    }

    #[test]
    fn test_one_hot_groups_mutually_exclusive() {
        for chest_pain in [
            ChestPainType::Asymptomatic,
            ChestPainType::AtypicalAngina,
            ChestPainType::NonAnginal,
            ChestPainType::TypicalAngina,
        ] {
            let input = ClinicalInput {
                age: 50.0,
                resting_bp: 130.0,
                cholesterol: 200.0,
                fasting_bs: false,
                max_hr: 150.0,
                oldpeak: 0.0,
                sex: Sex::Male,
                chest_pain,
                resting_ecg: RestingEcg::Normal,
                exercise_angina: false,
                st_slope: StSlope::Flat,
            };
            let map = input.to_feature_map();
            let set: f64 =
                map["ChestPainType_ATA"] + map["ChestPainType_NAP"] + map["ChestPainType_TA"];
            assert!(set <= 1.0);
        }
    }
}
