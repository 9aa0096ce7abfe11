//! Prediction dispatcher
//!
//! Resolves a model identifier to its artifact, runs a one-shot inference
//! on a single transaction record, and maps the class output to a verdict.
//! Each call is stateless and independent: the artifact is reloaded from
//! storage every time, so there is no cross-call cache to manage.

use crate::error::PredictError;
use crate::features::FeatureEncoder;
use crate::models::loader::{LoadedModel, ModelLoader};
use crate::registry::ModelKind;
use crate::types::transaction::TransactionRecord;
use crate::types::verdict::Verdict;
use chrono::{DateTime, Utc};
use ort::memory::Allocator;
use ort::value::{DowncastableTarget, DynMapValueType, DynSequenceValueType};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info};

/// Result of classifying one transaction with one model.
#[derive(Debug, Clone, Serialize)]
pub struct Prediction {
    /// Model that produced the verdict
    pub model: ModelKind,
    /// Binary classification outcome
    pub verdict: Verdict,
    /// Class-1 probability, when the artifact exposes one
    pub probability: Option<f64>,
    /// When the prediction was made
    pub timestamp: DateTime<Utc>,
    /// Wall time of load + inference, in milliseconds
    pub elapsed_ms: u64,
}

/// Dispatcher from model identifiers to one-shot inference calls.
pub struct Dispatcher {
    artifacts_dir: PathBuf,
    encoder: FeatureEncoder,
    loader: ModelLoader,
}

impl Dispatcher {
    pub fn new<P: AsRef<Path>>(artifacts_dir: P, intra_threads: usize) -> Self {
        Self {
            artifacts_dir: artifacts_dir.as_ref().to_path_buf(),
            encoder: FeatureEncoder::new(),
            loader: ModelLoader::with_threads(intra_threads),
        }
    }

    /// Path the registry resolves `kind` to.
    pub fn artifact_path(&self, kind: ModelKind) -> PathBuf {
        self.artifacts_dir.join(kind.artifact_file())
    }

    /// Classify `record` with the model identified by `kind`.
    ///
    /// Loads the artifact fresh, encodes the record as a `[1, N]` tensor,
    /// runs the session once, and reads the binary class from the output.
    pub fn predict(
        &self,
        kind: ModelKind,
        record: &TransactionRecord,
    ) -> Result<Prediction, PredictError> {
        let start = Instant::now();

        let mut model = self.loader.load(&self.artifacts_dir, kind)?;
        let features = self.encoder.encode(record);

        let (label, probability) = self.run_session(&mut model, &features)?;
        let verdict = Verdict::from_label(label);

        let elapsed_ms = start.elapsed().as_millis() as u64;
        info!(
            model = %kind,
            verdict = %verdict,
            probability = ?probability,
            elapsed_ms = elapsed_ms,
            "Prediction complete"
        );

        Ok(Prediction {
            model: kind,
            verdict,
            probability,
            timestamp: Utc::now(),
            elapsed_ms,
        })
    }

    /// Run one inference and extract the class label and, when available,
    /// the class-1 probability.
    fn run_session(
        &self,
        model: &mut LoadedModel,
        features: &[f32],
    ) -> Result<(i64, Option<f64>), PredictError> {
        use ort::value::Tensor;

        let shape = vec![1_i64, features.len() as i64];
        let input_tensor = Tensor::from_array((shape, features.to_vec()))?;

        let outputs = model
            .session
            .run(ort::inputs![&model.input_name => input_tensor])?;

        let probability = self.extract_probability(&outputs, &model.prob_output, model.kind);

        // Prefer the label output the exporter named.
        if let Some(name) = &model.label_output {
            if let Some(output) = outputs.get(name) {
                if let Ok((_, data)) = output.try_extract_tensor::<i64>() {
                    if let Some(&label) = data.first() {
                        return Ok((label, probability));
                    }
                }
            }
        }

        // No label output; threshold the probability at 0.5.
        match probability {
            Some(prob) => Ok((if prob >= 0.5 { 1 } else { 0 }, probability)),
            None => Err(PredictError::MalformedOutput),
        }
    }

    /// Extract the class-1 probability from the session outputs.
    ///
    /// Handles both tensor outputs and the `seq(map(int64, float))` shape
    /// that sklearn-onnx and LightGBM exports emit for probabilities.
    fn extract_probability(
        &self,
        outputs: &ort::session::SessionOutputs,
        prob_output: &Option<String>,
        kind: ModelKind,
    ) -> Option<f64> {
        if let Some(name) = prob_output {
            if let Some(output) = outputs.get(name) {
                if let Some(prob) = self.probability_from_value(output, kind) {
                    return Some(prob);
                }
            }
        }

        // Fallback: scan every non-label output.
        for (name, output) in outputs.iter() {
            if name.contains("label") {
                continue;
            }
            if let Some(prob) = self.probability_from_value(&output, kind) {
                return Some(prob);
            }
        }

        None
    }

    fn probability_from_value(&self, output: &ort::value::DynValue, kind: ModelKind) -> Option<f64> {
        let dtype = output.dtype();

        if let Ok((shape, data)) = output.try_extract_tensor::<f32>() {
            let prob = self.class1_prob_from_tensor(&shape, data);
            debug!(model = %kind, prob = ?prob, "Probability extracted from tensor");
            return prob;
        }

        if DynSequenceValueType::can_downcast(&dtype) {
            if let Ok(prob) = self.class1_prob_from_sequence_map(output) {
                debug!(model = %kind, prob = prob, "Probability extracted from seq(map)");
                return Some(prob);
            }
        }

        None
    }

    /// Read the class-1 probability out of `seq(map(int64, float))`.
    fn class1_prob_from_sequence_map(
        &self,
        output: &ort::value::DynValue,
    ) -> Result<f64, PredictError> {
        let allocator = Allocator::default();

        let sequence = output
            .downcast_ref::<DynSequenceValueType>()
            .map_err(|_| PredictError::MalformedOutput)?;

        let maps = sequence.try_extract_sequence::<DynMapValueType>(&allocator)?;
        let map_value = maps.first().ok_or(PredictError::MalformedOutput)?;

        let kv_pairs = map_value.try_extract_key_values::<i64, f32>()?;

        for (class_id, prob) in &kv_pairs {
            if *class_id == 1 {
                return Ok(*prob as f64);
            }
        }
        // Binary classifier with only class 0 present.
        for (class_id, prob) in &kv_pairs {
            if *class_id == 0 {
                return Ok(1.0 - *prob as f64);
            }
        }

        Err(PredictError::MalformedOutput)
    }

    /// Read the class-1 probability from a `[1, num_classes]` tensor.
    fn class1_prob_from_tensor(&self, shape: &ort::tensor::Shape, data: &[f32]) -> Option<f64> {
        let dims: Vec<i64> = shape.iter().copied().collect();

        let num_classes = match dims.len() {
            2 => dims[1] as usize,
            1 => dims[0] as usize,
            _ => return None,
        };

        if num_classes >= 2 {
            data.get(1).map(|&v| v as f64)
        } else {
            data.first().map(|&v| v as f64)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_artifact_path_resolution() {
        let dispatcher = Dispatcher::new("models", 1);
        assert_eq!(
            dispatcher.artifact_path(ModelKind::Lightgbm),
            PathBuf::from("models/lightgbm.onnx")
        );
    }

    #[test]
    fn test_missing_artifact_surfaces_before_inference() {
        let dispatcher = Dispatcher::new("no/such/dir", 1);
        let record = TransactionRecord::default();

        let err = dispatcher.predict(ModelKind::Nb, &record).unwrap_err();
        match err {
            PredictError::MissingArtifact { path } => {
                assert!(path.ends_with("nb.onnx"));
            }
            other => panic!("expected MissingArtifact, got {other:?}"),
        }
    }
}
