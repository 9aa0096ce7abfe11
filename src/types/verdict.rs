//! Binary classification verdict

use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of classifying a single transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Fraudulent,
    NotFraudulent,
}

impl Verdict {
    /// Map a raw class label to a verdict.
    ///
    /// Exactly 1 means fraud; every other value is treated as legitimate.
    pub fn from_label(label: i64) -> Self {
        if label == 1 {
            Verdict::Fraudulent
        } else {
            Verdict::NotFraudulent
        }
    }

    pub fn is_fraud(&self) -> bool {
        matches!(self, Verdict::Fraudulent)
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Fraudulent => f.write_str("Fraudulent"),
            Verdict::NotFraudulent => f.write_str("Not Fraudulent"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_mapping_is_exact() {
        assert_eq!(Verdict::from_label(1), Verdict::Fraudulent);
        assert_eq!(Verdict::from_label(0), Verdict::NotFraudulent);
        assert_eq!(Verdict::from_label(-1), Verdict::NotFraudulent);
        assert_eq!(Verdict::from_label(2), Verdict::NotFraudulent);
    }

    #[test]
    fn test_display_labels() {
        assert_eq!(Verdict::Fraudulent.to_string(), "Fraudulent");
        assert_eq!(Verdict::NotFraudulent.to_string(), "Not Fraudulent");
    }

    #[test]
    fn test_serde_tags() {
        assert_eq!(
            serde_json::to_string(&Verdict::Fraudulent).unwrap(),
            "\"fraudulent\""
        );
        assert_eq!(
            serde_json::to_string(&Verdict::NotFraudulent).unwrap(),
            "\"not_fraudulent\""
        );
    }
}
