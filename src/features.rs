//! Feature encoding for model inference.
//!
//! Transforms a [`TransactionRecord`] into the single-row numeric vector
//! the model artifacts expect. The encoding must match the preprocessing
//! applied when the artifacts were exported: same features, same order.

use crate::types::transaction::TransactionRecord;

/// Encoder that turns transaction records into model input features.
///
/// Identifier strings contribute only through the PaySim merchant
/// convention: identifiers starting with `M` are merchant accounts.
pub struct FeatureEncoder;

impl FeatureEncoder {
    pub fn new() -> Self {
        Self
    }

    /// Encode a record into the fixed-order feature vector (11 features).
    pub fn encode(&self, record: &TransactionRecord) -> Vec<f32> {
        let mut features = Vec::with_capacity(self.feature_count());

        // Raw fields (7)
        features.push(record.step as f32);
        features.push(record.tx_type.ordinal() as f32);
        features.push(record.amount as f32);
        features.push(record.oldbalance_org as f32);
        features.push(record.newbalance_orig as f32);
        features.push(record.oldbalance_dest as f32);
        features.push(record.newbalance_dest as f32);

        // Merchant flags (2)
        features.push(if record.name_orig.starts_with('M') { 1.0 } else { 0.0 });
        features.push(if record.name_dest.starts_with('M') { 1.0 } else { 0.0 });

        // Balance error terms (2). For a consistent ledger both are zero;
        // nonzero values are a strong fraud signal in the PaySim data.
        let error_balance_orig = record.newbalance_orig + record.amount - record.oldbalance_org;
        let error_balance_dest = record.oldbalance_dest + record.amount - record.newbalance_dest;
        features.push(error_balance_orig as f32);
        features.push(error_balance_dest as f32);

        features
    }

    /// Number of features produced.
    pub fn feature_count(&self) -> usize {
        11
    }

    /// Feature names, in encoding order.
    pub fn feature_names(&self) -> Vec<&'static str> {
        vec![
            "step",
            "type",
            "amount",
            "oldbalanceOrg",
            "newbalanceOrig",
            "oldbalanceDest",
            "newbalanceDest",
            "origIsMerchant",
            "destIsMerchant",
            "errorBalanceOrig",
            "errorBalanceDest",
        ]
    }
}

impl Default for FeatureEncoder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::transaction::TransactionType;

    fn reference_transfer() -> TransactionRecord {
        TransactionRecord {
            step: 1,
            tx_type: TransactionType::Transfer,
            amount: 1000.0,
            name_orig: "A".to_string(),
            oldbalance_org: 1000.0,
            newbalance_orig: 0.0,
            name_dest: "B".to_string(),
            oldbalance_dest: 0.0,
            newbalance_dest: 1000.0,
        }
    }

    #[test]
    fn test_encoding_of_reference_transfer() {
        let encoder = FeatureEncoder::new();
        let features = encoder.encode(&reference_transfer());

        assert_eq!(
            features,
            vec![1.0, 4.0, 1000.0, 1000.0, 0.0, 0.0, 1000.0, 0.0, 0.0, 0.0, 0.0]
        );
    }

    #[test]
    fn test_encoding_is_deterministic() {
        let encoder = FeatureEncoder::new();
        let record = reference_transfer();
        assert_eq!(encoder.encode(&record), encoder.encode(&record));
    }

    #[test]
    fn test_merchant_flags() {
        let encoder = FeatureEncoder::new();
        let mut record = reference_transfer();
        record.name_orig = "C12345".to_string();
        record.name_dest = "M98765".to_string();

        let features = encoder.encode(&record);
        assert_eq!(features[7], 0.0);
        assert_eq!(features[8], 1.0);
    }

    #[test]
    fn test_balance_error_terms() {
        let encoder = FeatureEncoder::new();
        let mut record = reference_transfer();
        // Originator claims nothing left but only 600 moved out.
        record.amount = 600.0;
        let features = encoder.encode(&record);

        // errorBalanceOrig = 0 + 600 - 1000
        assert_eq!(features[9], -400.0);
        // errorBalanceDest = 0 + 600 - 1000
        assert_eq!(features[10], -400.0);
    }

    #[test]
    fn test_feature_count_matches_names() {
        let encoder = FeatureEncoder::new();
        assert_eq!(encoder.feature_count(), 11);
        assert_eq!(encoder.feature_names().len(), 11);
        assert_eq!(encoder.encode(&TransactionRecord::default()).len(), 11);
    }
}
