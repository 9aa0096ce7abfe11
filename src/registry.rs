//! Registry of supported classification models
//!
//! The set of models is closed: identifiers are a tagged enum rather than
//! a string-keyed map, so unknown names are rejected when the request is
//! parsed instead of somewhere inside the loader.

use crate::error::PredictError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A supported classifier, identified by the short id its artifact is
/// exported under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelKind {
    /// Logistic regression
    Lr,
    /// Decision tree
    Dt,
    /// Random forest
    Rf,
    /// Extra trees
    Et,
    /// LightGBM
    Lightgbm,
    /// Support vector machine
    Svm,
    /// Naive Bayes
    Nb,
}

impl ModelKind {
    /// Every registered model, in dropdown order.
    pub const ALL: [ModelKind; 7] = [
        ModelKind::Lr,
        ModelKind::Dt,
        ModelKind::Rf,
        ModelKind::Et,
        ModelKind::Lightgbm,
        ModelKind::Svm,
        ModelKind::Nb,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ModelKind::Lr => "lr",
            ModelKind::Dt => "dt",
            ModelKind::Rf => "rf",
            ModelKind::Et => "et",
            ModelKind::Lightgbm => "lightgbm",
            ModelKind::Svm => "svm",
            ModelKind::Nb => "nb",
        }
    }

    /// Human-readable name shown in the model dropdown.
    pub fn display_name(&self) -> &'static str {
        match self {
            ModelKind::Lr => "Logistic Regression",
            ModelKind::Dt => "Decision Tree",
            ModelKind::Rf => "Random Forest",
            ModelKind::Et => "Extra Trees",
            ModelKind::Lightgbm => "LightGBM",
            ModelKind::Svm => "Support Vector Machine",
            ModelKind::Nb => "Naive Bayes",
        }
    }

    /// Filename of the serialized artifact for this model.
    pub fn artifact_file(&self) -> String {
        format!("{}.onnx", self.as_str())
    }
}

impl FromStr for ModelKind {
    type Err = PredictError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "lr" => Ok(ModelKind::Lr),
            "dt" => Ok(ModelKind::Dt),
            "rf" => Ok(ModelKind::Rf),
            "et" => Ok(ModelKind::Et),
            "lightgbm" => Ok(ModelKind::Lightgbm),
            "svm" => Ok(ModelKind::Svm),
            "nb" => Ok(ModelKind::Nb),
            other => Err(PredictError::UnknownModel(other.to_string())),
        }
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_registered_id_parses() {
        for kind in ModelKind::ALL {
            assert_eq!(kind.as_str().parse::<ModelKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_unknown_id_is_rejected() {
        let err = "unknown_model".parse::<ModelKind>().unwrap_err();
        match err {
            PredictError::UnknownModel(name) => assert_eq!(name, "unknown_model"),
            other => panic!("expected UnknownModel, got {other:?}"),
        }
    }

    #[test]
    fn test_artifact_filenames() {
        assert_eq!(ModelKind::Lr.artifact_file(), "lr.onnx");
        assert_eq!(ModelKind::Lightgbm.artifact_file(), "lightgbm.onnx");
    }

    #[test]
    fn test_registry_is_closed_over_seven_models() {
        assert_eq!(ModelKind::ALL.len(), 7);
    }

    #[test]
    fn test_serde_uses_short_ids() {
        assert_eq!(serde_json::to_string(&ModelKind::Rf).unwrap(), "\"rf\"");
        let kind: ModelKind = serde_json::from_str("\"svm\"").unwrap();
        assert_eq!(kind, ModelKind::Svm);
    }
}
