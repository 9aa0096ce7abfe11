//! Error types for prediction and dataset profiling

use std::path::PathBuf;
use thiserror::Error;

/// Failures of the prediction dispatcher.
#[derive(Debug, Error)]
pub enum PredictError {
    /// Model identifier is not in the registry. Rejected at the parse
    /// boundary; no artifact I/O happens for this case.
    #[error("unknown model \"{0}\"")]
    UnknownModel(String),

    /// The registry resolved a filename but no artifact exists there.
    #[error("model artifact not found: {}", path.display())]
    MissingArtifact { path: PathBuf },

    /// The artifact exists but ONNX Runtime could not deserialize it.
    #[error("failed to load model artifact {}: {source}", path.display())]
    ArtifactLoad {
        path: PathBuf,
        #[source]
        source: ort::Error,
    },

    /// The session ran but produced no output we can read a class from.
    #[error("model produced no usable classification output")]
    MalformedOutput,

    #[error("inference failed: {0}")]
    Inference(#[from] ort::Error),

    /// The blocking inference task was cancelled or panicked.
    #[error("prediction task was aborted")]
    Aborted,
}

/// Failures of the dataset profiler.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("dataset not found: {}", path.display())]
    Missing { path: PathBuf },

    #[error("failed to read dataset: {0}")]
    Read(#[from] csv::Error),

    #[error("failed to open dataset: {0}")]
    Io(#[from] std::io::Error),

    #[error("dataset contains no rows")]
    Empty,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_model_message_names_the_id() {
        let err = PredictError::UnknownModel("unknown_model".to_string());
        assert_eq!(err.to_string(), "unknown model \"unknown_model\"");
    }

    #[test]
    fn test_missing_artifact_message_names_the_path() {
        let err = PredictError::MissingArtifact {
            path: PathBuf::from("models/lr.onnx"),
        };
        assert!(err.to_string().contains("models/lr.onnx"));
    }

    #[test]
    fn test_missing_dataset_message() {
        let err = DatasetError::Missing {
            path: PathBuf::from("Fraud.csv"),
        };
        assert!(err.to_string().contains("Fraud.csv"));
    }
}
