//! ONNX artifact loader

use crate::error::PredictError;
use crate::registry::ModelKind;
use ort::session::{builder::GraphOptimizationLevel, Session};
use std::path::Path;
use tracing::info;

/// A model artifact deserialized into an ONNX Runtime session.
#[derive(Debug)]
pub struct LoadedModel {
    /// Which registry entry this session came from
    pub kind: ModelKind,
    /// ONNX Runtime session
    pub session: Session,
    /// Input name the session expects
    pub input_name: String,
    /// Output carrying the class label, when the exporter named one
    pub label_output: Option<String>,
    /// Output carrying class probabilities
    pub prob_output: Option<String>,
}

/// Loader for serialized model artifacts.
///
/// Holds no sessions itself: every [`load`](ModelLoader::load) call reads
/// and deserializes the artifact from storage again.
pub struct ModelLoader {
    /// Number of intra-op threads per session
    intra_threads: usize,
}

impl ModelLoader {
    pub fn new() -> Self {
        Self::with_threads(1)
    }

    pub fn with_threads(intra_threads: usize) -> Self {
        Self { intra_threads }
    }

    /// Load the artifact for `kind` from `artifacts_dir`.
    ///
    /// A missing file is reported before ONNX Runtime is touched, so the
    /// registry-to-filename contract can be checked without a runtime.
    pub fn load(&self, artifacts_dir: &Path, kind: ModelKind) -> Result<LoadedModel, PredictError> {
        let path = artifacts_dir.join(kind.artifact_file());
        if !path.exists() {
            return Err(PredictError::MissingArtifact { path });
        }

        ort::init().commit()?;

        info!(model = %kind, path = %path.display(), "Loading model artifact");

        let session = Session::builder()
            .and_then(|b| b.with_optimization_level(GraphOptimizationLevel::Level3))
            .and_then(|b| b.with_intra_threads(self.intra_threads))
            .and_then(|b| b.commit_from_file(&path))
            .map_err(|source| PredictError::ArtifactLoad {
                path: path.clone(),
                source,
            })?;

        let input_name = session
            .inputs
            .first()
            .map(|i| i.name.clone())
            .unwrap_or_else(|| "float_input".to_string());

        // sklearn-onnx exports name these "output_label" / "output_probability";
        // other exporters use "label" / "probabilities".
        let label_output = session
            .outputs
            .iter()
            .find(|o| o.name.contains("label"))
            .map(|o| o.name.clone());

        let prob_output = session
            .outputs
            .iter()
            .find(|o| o.name.contains("prob"))
            .map(|o| o.name.clone());

        info!(
            model = %kind,
            input = %input_name,
            label = label_output.as_deref().unwrap_or("-"),
            probabilities = prob_output.as_deref().unwrap_or("-"),
            "Model artifact loaded"
        );

        Ok(LoadedModel {
            kind,
            session,
            input_name,
            label_output,
            prob_output,
        })
    }
}

impl Default for ModelLoader {
    fn default() -> Self {
        Self::new()
    }
}
