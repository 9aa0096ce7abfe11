//! Transaction data structures for fraud classification

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Category of a money-movement transaction (PaySim schema).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionType {
    #[default]
    CashOut,
    Payment,
    Debit,
    Transfer,
    CashIn,
}

impl TransactionType {
    /// All categories, in the order the form presents them.
    pub const ALL: [TransactionType; 5] = [
        TransactionType::CashOut,
        TransactionType::Payment,
        TransactionType::Debit,
        TransactionType::Transfer,
        TransactionType::CashIn,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::CashOut => "CASH_OUT",
            TransactionType::Payment => "PAYMENT",
            TransactionType::Debit => "DEBIT",
            TransactionType::Transfer => "TRANSFER",
            TransactionType::CashIn => "CASH_IN",
        }
    }

    /// Ordinal code used by the feature encoding.
    ///
    /// Categories are numbered alphabetically, matching the label encoding
    /// applied when the model artifacts were exported.
    pub fn ordinal(&self) -> u8 {
        match self {
            TransactionType::CashIn => 0,
            TransactionType::CashOut => 1,
            TransactionType::Debit => 2,
            TransactionType::Payment => 3,
            TransactionType::Transfer => 4,
        }
    }
}

impl FromStr for TransactionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CASH_OUT" => Ok(TransactionType::CashOut),
            "PAYMENT" => Ok(TransactionType::Payment),
            "DEBIT" => Ok(TransactionType::Debit),
            "TRANSFER" => Ok(TransactionType::Transfer),
            "CASH_IN" => Ok(TransactionType::CashIn),
            other => Err(format!("unknown transaction type: {other}")),
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One financial transaction submitted for classification.
///
/// Field names follow the PaySim dataset headers so the same struct
/// deserializes CSV rows and JSON request bodies. Built once per
/// submission, consumed by a single predict call, then discarded.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// Time unit index since the start of the simulation
    #[serde(default)]
    pub step: u32,

    /// Transaction category
    #[serde(rename = "type", default)]
    pub tx_type: TransactionType,

    /// Transaction amount
    #[serde(default)]
    pub amount: f64,

    /// Originator identifier
    #[serde(rename = "nameOrig", default)]
    pub name_orig: String,

    /// Originator balance before the transaction
    #[serde(rename = "oldbalanceOrg", default)]
    pub oldbalance_org: f64,

    /// Originator balance after the transaction
    #[serde(rename = "newbalanceOrig", default)]
    pub newbalance_orig: f64,

    /// Destination identifier
    #[serde(rename = "nameDest", default)]
    pub name_dest: String,

    /// Destination balance before the transaction
    #[serde(rename = "oldbalanceDest", default)]
    pub oldbalance_dest: f64,

    /// Destination balance after the transaction
    #[serde(rename = "newbalanceDest", default)]
    pub newbalance_dest: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_zero_and_empty() {
        let record = TransactionRecord::default();
        assert_eq!(record.step, 0);
        assert_eq!(record.tx_type, TransactionType::CashOut);
        assert_eq!(record.amount, 0.0);
        assert!(record.name_orig.is_empty());
        assert!(record.name_dest.is_empty());
    }

    #[test]
    fn test_serde_uses_dataset_headers() {
        let json = r#"{
            "step": 1,
            "type": "TRANSFER",
            "amount": 1000.0,
            "nameOrig": "A",
            "oldbalanceOrg": 1000.0,
            "newbalanceOrig": 0.0,
            "nameDest": "B",
            "oldbalanceDest": 0.0,
            "newbalanceDest": 1000.0
        }"#;

        let record: TransactionRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.tx_type, TransactionType::Transfer);
        assert_eq!(record.amount, 1000.0);
        assert_eq!(record.name_dest, "B");

        let back = serde_json::to_string(&record).unwrap();
        assert!(back.contains("\"nameOrig\""));
        assert!(back.contains("\"TRANSFER\""));
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let record: TransactionRecord = serde_json::from_str(r#"{"amount": 42.5}"#).unwrap();
        assert_eq!(record.amount, 42.5);
        assert_eq!(record.step, 0);
        assert!(record.name_orig.is_empty());
    }

    #[test]
    fn test_type_ordinal_is_alphabetical() {
        assert_eq!(TransactionType::CashIn.ordinal(), 0);
        assert_eq!(TransactionType::CashOut.ordinal(), 1);
        assert_eq!(TransactionType::Debit.ordinal(), 2);
        assert_eq!(TransactionType::Payment.ordinal(), 3);
        assert_eq!(TransactionType::Transfer.ordinal(), 4);
    }

    #[test]
    fn test_type_round_trip() {
        for ty in TransactionType::ALL {
            assert_eq!(ty.as_str().parse::<TransactionType>().unwrap(), ty);
        }
        assert!("CHEQUE".parse::<TransactionType>().is_err());
    }
}
