//! Dataset profiling for the dashboard view
//!
//! Reads the PaySim-style CSV the models were trained on and computes the
//! summary statistics the dashboard renders. A missing file is a
//! recognized error; malformed rows are skipped with a warning.

use crate::error::DatasetError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{info, warn};

/// One dataset row. Only the columns the profile needs are typed strictly;
/// the label columns are optional so unlabeled exports still profile.
#[derive(Debug, Deserialize)]
struct DatasetRow {
    step: u32,
    #[serde(rename = "type")]
    tx_type: String,
    amount: f64,
    #[serde(rename = "isFraud", default)]
    is_fraud: u8,
    #[serde(rename = "isFlaggedFraud", default)]
    is_flagged_fraud: u8,
}

/// Summary statistics over the dataset.
#[derive(Debug, Clone, Serialize)]
pub struct DatasetProfile {
    pub rows: u64,
    pub fraud_count: u64,
    pub flagged_count: u64,
    /// Fraction of rows labeled fraudulent
    pub fraud_rate: f64,
    /// Row counts per transaction category
    pub by_type: BTreeMap<String, u64>,
    pub amount_min: f64,
    pub amount_max: f64,
    pub amount_mean: f64,
    pub step_min: u32,
    pub step_max: u32,
}

/// Profile the dataset at `path`.
pub fn profile<P: AsRef<Path>>(path: P) -> Result<DatasetProfile, DatasetError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(DatasetError::Missing {
            path: path.to_path_buf(),
        });
    }

    let mut reader = csv::Reader::from_path(path)?;

    let mut rows: u64 = 0;
    let mut skipped: u64 = 0;
    let mut fraud_count: u64 = 0;
    let mut flagged_count: u64 = 0;
    let mut by_type: BTreeMap<String, u64> = BTreeMap::new();
    let mut amount_min = f64::INFINITY;
    let mut amount_max = f64::NEG_INFINITY;
    let mut amount_sum = 0.0;
    let mut step_min = u32::MAX;
    let mut step_max = 0;

    for result in reader.deserialize::<DatasetRow>() {
        let row = match result {
            Ok(row) => row,
            Err(e) => {
                skipped += 1;
                warn!(error = %e, "Skipping malformed dataset row");
                continue;
            }
        };

        rows += 1;
        fraud_count += row.is_fraud as u64;
        flagged_count += row.is_flagged_fraud as u64;
        *by_type.entry(row.tx_type).or_insert(0) += 1;
        amount_min = amount_min.min(row.amount);
        amount_max = amount_max.max(row.amount);
        amount_sum += row.amount;
        step_min = step_min.min(row.step);
        step_max = step_max.max(row.step);
    }

    if rows == 0 {
        return Err(DatasetError::Empty);
    }

    info!(
        path = %path.display(),
        rows = rows,
        skipped = skipped,
        fraud_count = fraud_count,
        "Dataset profiled"
    );

    Ok(DatasetProfile {
        rows,
        fraud_count,
        flagged_count,
        fraud_rate: fraud_count as f64 / rows as f64,
        by_type,
        amount_min,
        amount_max,
        amount_mean: amount_sum / rows as f64,
        step_min,
        step_max,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;

    fn write_temp_csv(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("fraud_detector_{name}_{}.csv", std::process::id()));
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_missing_dataset_is_a_recognized_error() {
        let err = profile("no/such/Fraud.csv").unwrap_err();
        match err {
            DatasetError::Missing { path } => assert!(path.ends_with("Fraud.csv")),
            other => panic!("expected Missing, got {other:?}"),
        }
    }

    #[test]
    fn test_profile_counts_and_rates() {
        let csv = "\
step,type,amount,nameOrig,oldbalanceOrg,newbalanceOrig,nameDest,oldbalanceDest,newbalanceDest,isFraud,isFlaggedFraud
1,PAYMENT,100.0,C1,500.0,400.0,M1,0.0,0.0,0,0
1,TRANSFER,1000.0,C2,1000.0,0.0,C3,0.0,1000.0,1,0
2,CASH_OUT,250.0,C4,250.0,0.0,C5,0.0,250.0,1,1
3,PAYMENT,50.0,C6,60.0,10.0,M2,0.0,0.0,0,0
";
        let path = write_temp_csv("profile", csv);
        let profile = profile(&path).unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(profile.rows, 4);
        assert_eq!(profile.fraud_count, 2);
        assert_eq!(profile.flagged_count, 1);
        assert!((profile.fraud_rate - 0.5).abs() < f64::EPSILON);
        assert_eq!(profile.by_type.get("PAYMENT"), Some(&2));
        assert_eq!(profile.by_type.get("TRANSFER"), Some(&1));
        assert_eq!(profile.amount_min, 50.0);
        assert_eq!(profile.amount_max, 1000.0);
        assert_eq!(profile.amount_mean, 350.0);
        assert_eq!(profile.step_min, 1);
        assert_eq!(profile.step_max, 3);
    }

    #[test]
    fn test_empty_dataset_is_rejected() {
        let csv = "step,type,amount,isFraud,isFlaggedFraud\n";
        let path = write_temp_csv("empty", csv);
        let err = profile(&path).unwrap_err();
        fs::remove_file(&path).unwrap();

        assert!(matches!(err, DatasetError::Empty));
    }
}
