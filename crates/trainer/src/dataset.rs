//! Delimited-table loading and per-tier cleaning
//!
//! Both sources are header-mapped text tables. The screening table is
//! semicolon-delimited and needs unit conversion (age in days -> years),
//! BMI derivation, and blood-pressure range filtering; the clinical table
//! is comma-delimited, pre-validated, and only needs boolean coercion.
//! Rows with a missing or unparseable cell in any required column are
//! dropped.

use std::path::Path;

use tracing::info;

use cardiolens_model::schema::{CLINICAL_FEATURES, SCREENING_FEATURES};

use crate::errors::DataLoadError;

/// Label column of the screening table
pub const SCREENING_LABEL: &str = "cardio";

/// Label column of the clinical table
pub const CLINICAL_LABEL: &str = "HeartDisease";

/// Blood-pressure plausibility bounds applied to the screening table
const AP_HI_RANGE: (f64, f64) = (90.0, 200.0);
const AP_LO_RANGE: (f64, f64) = (50.0, 140.0);

/// Cleaned training table with a fixed, ordered feature schema
#[derive(Clone, Debug)]
pub struct Dataset {
    pub schema: Vec<String>,
    pub features: Vec<Vec<f64>>,
    pub labels: Vec<u8>,
}

impl Dataset {
    /// Number of rows
    pub fn len(&self) -> usize {
        self.features.len()
    }

    /// Check if the dataset has no rows
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Positive-label share
    pub fn prevalence(&self) -> f64 {
        if self.labels.is_empty() {
            return 0.0;
        }
        let positives = self.labels.iter().filter(|&&l| l == 1).count();
        positives as f64 / self.labels.len() as f64
    }

    /// Per-feature (min, max) over all rows, for validation and logging
    pub fn feature_stats(&self) -> Vec<(f64, f64)> {
        let mut stats = vec![(f64::INFINITY, f64::NEG_INFINITY); self.schema.len()];

        for row in &self.features {
            for (i, &val) in row.iter().enumerate() {
                stats[i].0 = stats[i].0.min(val);
                stats[i].1 = stats[i].1.max(val);
            }
        }

        stats
    }
}

struct Table {
    header: Vec<String>,
    rows: Vec<Vec<String>>,
}

fn read_table(path: &Path, sep: char) -> Result<Table, DataLoadError> {
    let content = std::fs::read_to_string(path).map_err(|source| DataLoadError::Unreadable {
        path: path.to_path_buf(),
        source,
    })?;

    let mut lines = content.lines().filter(|line| !line.trim().is_empty());

    let header = match lines.next() {
        Some(line) => line.split(sep).map(|s| s.trim().to_string()).collect(),
        None => return Err(DataLoadError::MissingHeader(path.to_path_buf())),
    };

    let rows = lines
        .map(|line| line.split(sep).map(|s| s.trim().to_string()).collect())
        .collect();

    Ok(Table { header, rows })
}

fn column_index(table: &Table, name: &str) -> Result<usize, DataLoadError> {
    table
        .header
        .iter()
        .position(|col| col == name)
        .ok_or_else(|| DataLoadError::MissingColumn(name.to_string()))
}

/// Parse one cell to a numeric value. Boolean-typed cells coerce to 0/1;
/// empty or unparseable cells read as missing.
fn parse_cell(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(value) = trimmed.parse::<f64>() {
        if value.is_finite() {
            return Some(value);
        }
        return None;
    }
    match trimmed {
        "True" | "true" | "TRUE" => Some(1.0),
        "False" | "false" | "FALSE" => Some(0.0),
        _ => None,
    }
}

fn cell(row: &[String], idx: usize) -> Option<f64> {
    row.get(idx).and_then(|raw| parse_cell(raw))
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Load and clean the population screening table.
///
/// Semicolon-delimited with header. Converts age from days to years
/// (rounded to one decimal), derives BMI from height and weight, keeps
/// only rows with plausible blood pressure, and drops rows with any
/// missing feature or label cell. The output schema is
/// [`SCREENING_FEATURES`], in order.
pub fn load_screening_dataset<P: AsRef<Path>>(path: P) -> Result<Dataset, DataLoadError> {
    let path = path.as_ref();
    let table = read_table(path, ';')?;

    let col_age = column_index(&table, "age")?;
    let col_gender = column_index(&table, "gender")?;
    let col_height = column_index(&table, "height")?;
    let col_weight = column_index(&table, "weight")?;
    let col_ap_hi = column_index(&table, "ap_hi")?;
    let col_ap_lo = column_index(&table, "ap_lo")?;
    let col_chol = column_index(&table, "cholesterol")?;
    let col_gluc = column_index(&table, "gluc")?;
    let col_smoke = column_index(&table, "smoke")?;
    let col_alco = column_index(&table, "alco")?;
    let col_active = column_index(&table, "active")?;
    let col_label = column_index(&table, SCREENING_LABEL)?;

    let mut features = Vec::new();
    let mut labels = Vec::new();
    let mut dropped_incomplete = 0usize;
    let mut dropped_bp = 0usize;

    for row in &table.rows {
        let cells = [
            cell(row, col_age),
            cell(row, col_gender),
            cell(row, col_height),
            cell(row, col_weight),
            cell(row, col_ap_hi),
            cell(row, col_ap_lo),
            cell(row, col_chol),
            cell(row, col_gluc),
            cell(row, col_smoke),
            cell(row, col_alco),
            cell(row, col_active),
            cell(row, col_label),
        ];

        let Some([age_days, gender, height, weight, ap_hi, ap_lo, chol, gluc, smoke, alco, active, label]) =
            collect_cells(cells)
        else {
            dropped_incomplete += 1;
            continue;
        };

        if !(AP_HI_RANGE.0..=AP_HI_RANGE.1).contains(&ap_hi)
            || !(AP_LO_RANGE.0..=AP_LO_RANGE.1).contains(&ap_lo)
        {
            dropped_bp += 1;
            continue;
        }

        let age_years = round1(age_days / 365.25);
        let bmi = weight / (height / 100.0).powi(2);

        features.push(vec![
            age_years, gender, height, weight, bmi, ap_hi, ap_lo, chol, gluc, smoke, alco, active,
        ]);
        labels.push(if label != 0.0 { 1 } else { 0 });
    }

    if features.is_empty() {
        return Err(DataLoadError::Empty(path.to_path_buf()));
    }

    info!(
        kept = features.len(),
        dropped_incomplete, dropped_bp, "screening table cleaned"
    );

    Ok(Dataset {
        schema: SCREENING_FEATURES.iter().map(|s| s.to_string()).collect(),
        features,
        labels,
    })
}

/// Load and clean the clinical table.
///
/// Comma-delimited with header, one-hot columns already expanded.
/// Boolean-typed cells coerce to 0/1; rows with missing cells are
/// dropped. No range filtering: the clinical data is pre-validated.
/// The output schema is [`CLINICAL_FEATURES`], in order.
pub fn load_clinical_dataset<P: AsRef<Path>>(path: P) -> Result<Dataset, DataLoadError> {
    let path = path.as_ref();
    let table = read_table(path, ',')?;

    let mut feature_cols = Vec::with_capacity(CLINICAL_FEATURES.len());
    for name in CLINICAL_FEATURES {
        feature_cols.push(column_index(&table, name)?);
    }
    let col_label = column_index(&table, CLINICAL_LABEL)?;

    let mut features = Vec::new();
    let mut labels = Vec::new();
    let mut dropped_incomplete = 0usize;

    'rows: for row in &table.rows {
        let mut values = Vec::with_capacity(feature_cols.len());
        for &idx in &feature_cols {
            match cell(row, idx) {
                Some(value) => values.push(value),
                None => {
                    dropped_incomplete += 1;
                    continue 'rows;
                }
            }
        }

        let Some(label) = cell(row, col_label) else {
            dropped_incomplete += 1;
            continue;
        };

        features.push(values);
        labels.push(if label != 0.0 { 1 } else { 0 });
    }

    if features.is_empty() {
        return Err(DataLoadError::Empty(path.to_path_buf()));
    }

    info!(kept = features.len(), dropped_incomplete, "clinical table cleaned");

    Ok(Dataset {
        schema: CLINICAL_FEATURES.iter().map(|s| s.to_string()).collect(),
        features,
        labels,
    })
}

fn collect_cells<const N: usize>(cells: [Option<f64>; N]) -> Option<[f64; N]> {
    let mut out = [0.0; N];
    for (slot, cell) in out.iter_mut().zip(cells) {
        *slot = cell?;
    }
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn screening_file() -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            "id;age;gender;height;weight;ap_hi;ap_lo;cholesterol;gluc;smoke;alco;active;cardio"
        )
        .unwrap();
        // 18262 days ~ 50.0 years
        writeln!(file, "0;18262;2;170;75;130;85;1;1;0;0;1;0").unwrap();
        writeln!(file, "1;20000;1;160;60;120;80;2;1;0;0;1;1").unwrap();
        // implausible systolic BP, filtered
        writeln!(file, "2;19000;2;175;80;250;90;1;1;1;0;0;1").unwrap();
        // implausible diastolic BP, filtered
        writeln!(file, "3;19000;2;175;80;140;30;1;1;1;0;0;1").unwrap();
        // missing weight, dropped
        writeln!(file, "4;19000;2;175;;140;90;1;1;1;0;0;1").unwrap();
        file.flush().unwrap();
        file
    }

    fn clinical_file() -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            "Age,RestingBP,Cholesterol,FastingBS,MaxHR,Oldpeak,Sex_M,ChestPainType_ATA,ChestPainType_NAP,ChestPainType_TA,RestingECG_Normal,RestingECG_ST,ExerciseAngina_Y,ST_Slope_Flat,ST_Slope_Up,HeartDisease"
        )
        .unwrap();
        writeln!(file, "40,140,289,0,172,0.0,True,True,False,False,True,False,False,False,True,0").unwrap();
        writeln!(file, "49,160,180,0,156,1.0,False,False,True,False,True,False,False,True,False,1").unwrap();
        // missing MaxHR, dropped
        writeln!(file, "37,130,283,0,,0.0,True,True,False,False,False,True,False,False,True,0").unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_screening_cleaning_contract() {
        let file = screening_file();
        let dataset = load_screening_dataset(file.path()).unwrap();

        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.schema.len(), SCREENING_FEATURES.len());

        // age converted from days to years, one decimal
        assert_eq!(dataset.features[0][0], 50.0);
        // bmi derived: 75 / 1.70^2
        assert!((dataset.features[0][4] - 25.951557).abs() < 1e-5);
        assert_eq!(dataset.labels, vec![0, 1]);
    }

    #[test]
    fn test_screening_missing_column() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "id;age;gender").unwrap();
        writeln!(file, "0;18262;2").unwrap();
        file.flush().unwrap();

        let err = load_screening_dataset(file.path()).unwrap_err();
        assert!(matches!(err, DataLoadError::MissingColumn(_)));
    }

    #[test]
    fn test_clinical_bool_coercion() {
        let file = clinical_file();
        let dataset = load_clinical_dataset(file.path()).unwrap();

        assert_eq!(dataset.len(), 2);
        // Sex_M came in as True/False text
        assert_eq!(dataset.features[0][6], 1.0);
        assert_eq!(dataset.features[1][6], 0.0);
        assert_eq!(dataset.labels, vec![0, 1]);
    }

    #[test]
    fn test_unreadable_source() {
        let err = load_screening_dataset("/nonexistent/cardio.csv").unwrap_err();
        assert!(matches!(err, DataLoadError::Unreadable { .. }));
    }

    #[test]
    fn test_prevalence_and_stats() {
        let file = screening_file();
        let dataset = load_screening_dataset(file.path()).unwrap();

        assert!((dataset.prevalence() - 0.5).abs() < 1e-12);

        let stats = dataset.feature_stats();
        assert_eq!(stats.len(), SCREENING_FEATURES.len());
        // ap_hi min/max over the two kept rows
        assert_eq!(stats[5], (120.0, 130.0));
    }
}
