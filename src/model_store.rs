/// Forecasting model access.
///
/// The pre-trained per-parameter models are opaque collaborators: tensors
/// in, a normalized step sequence out. This module defines that contract,
/// resolves parameter names to artifact files through the parameter
/// registry, and surfaces a typed error when an artifact is missing so the
/// failure never travels as a silently-handled null.

use std::path::PathBuf;

use ndarray::Array3;

use crate::logging::{self, DataSource};
use crate::model::{PipelineError, FORECAST_WINDOW};
use crate::parameters::find_parameter;

/// The opaque forecasting collaborator.
///
/// `predict` receives the 1×10×1 normalized history tensor and the 1×5×2
/// normalized exogenous tensor, and returns one value per predicted step in
/// the same normalized range as the history input.
pub trait ForecastModel {
    fn predict(
        &self,
        history: &Array3<f64>,
        exogenous: &Array3<f64>,
    ) -> Result<Vec<f64>, PipelineError>;
}

/// Resolves parameters to model artifacts under a configured directory.
pub struct ModelStore {
    model_dir: PathBuf,
}

impl ModelStore {
    pub fn new(model_dir: impl Into<PathBuf>) -> Self {
        Self {
            model_dir: model_dir.into(),
        }
    }

    /// Full path of the artifact registered for a parameter.
    ///
    /// Fails with `ModelUnavailable` when the parameter has no registry
    /// entry; an unregistered parameter has no artifact by definition.
    pub fn artifact_path(&self, parameter: &str) -> Result<PathBuf, PipelineError> {
        let entry = find_parameter(parameter).ok_or_else(|| PipelineError::ModelUnavailable {
            parameter: parameter.to_string(),
            artifact: "<unregistered parameter>".to_string(),
        })?;
        Ok(self.model_dir.join(entry.model_artifact))
    }

    /// Checks that the artifact registered for a parameter exists on disk.
    ///
    /// Other parameters proceed independently when one artifact is missing;
    /// the caller records the error against that parameter only.
    pub fn require_artifact(&self, parameter: &str) -> Result<PathBuf, PipelineError> {
        let path = self.artifact_path(parameter)?;
        if path.is_file() {
            Ok(path)
        } else {
            logging::warn(
                DataSource::Model,
                None,
                &format!("Artifact missing for {}: {}", parameter, path.display()),
            );
            Err(PipelineError::ModelUnavailable {
                parameter: parameter.to_string(),
                artifact: path.display().to_string(),
            })
        }
    }
}

/// Deterministic stand-in model for development and tests.
///
/// When live artifacts are unavailable, this model predicts persistence:
/// every step repeats the last normalized observation in the history
/// window. Useful for exercising the full pipeline without the real
/// inference runtime.
pub struct PersistenceModel;

impl ForecastModel for PersistenceModel {
    fn predict(
        &self,
        history: &Array3<f64>,
        _exogenous: &Array3<f64>,
    ) -> Result<Vec<f64>, PipelineError> {
        let timesteps = history.shape()[1];
        let last = history[[0, timesteps - 1, 0]];
        Ok(vec![last; FORECAST_WINDOW])
    }
}

/// Per-parameter model lookup used by the pipeline.
///
/// A resolver owns the mapping from parameter identity to a usable model;
/// a missing model is a typed, per-parameter failure.
pub trait ModelResolver {
    fn model_for(&self, parameter: &str) -> Result<&dyn ForecastModel, PipelineError>;
}

/// Development-mode resolver: requires the registered artifact to exist on
/// disk (so missing-model handling behaves as in production) but answers
/// with the persistence stand-in instead of a live inference runtime.
pub struct DevModeResolver {
    store: ModelStore,
    model: PersistenceModel,
}

impl DevModeResolver {
    pub fn new(store: ModelStore) -> Self {
        Self {
            store,
            model: PersistenceModel,
        }
    }
}

impl ModelResolver for DevModeResolver {
    fn model_for(&self, parameter: &str) -> Result<&dyn ForecastModel, PipelineError> {
        self.store.require_artifact(parameter)?;
        Ok(&self.model)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_artifact_path_uses_registry_file_name() {
        let store = ModelStore::new("/var/lib/aquamon/models");
        let path = store.artifact_path("Dissolved Oxygen").unwrap();
        assert_eq!(
            path,
            Path::new("/var/lib/aquamon/models")
                .join("Dissolved_Oxygen_water_quality_lstm_model.keras")
        );
    }

    #[test]
    fn test_unregistered_parameter_is_model_unavailable() {
        let store = ModelStore::new("/var/lib/aquamon/models");
        let result = store.artifact_path("Chlorophyll");
        assert!(
            matches!(result, Err(PipelineError::ModelUnavailable { .. })),
            "expected ModelUnavailable, got {:?}",
            result
        );
    }

    #[test]
    fn test_missing_artifact_file_is_model_unavailable() {
        let store = ModelStore::new("/nonexistent/model/dir");
        let result = store.require_artifact("pH");
        match result {
            Err(PipelineError::ModelUnavailable { parameter, artifact }) => {
                assert_eq!(parameter, "pH");
                assert!(artifact.contains("pH_water_quality_lstm_model.keras"));
            }
            other => panic!("expected ModelUnavailable, got {:?}", other),
        }
    }

    #[test]
    fn test_persistence_model_repeats_last_history_value() {
        let mut history = Array3::zeros((1, 10, 1));
        for t in 0..10 {
            history[[0, t, 0]] = t as f64 / 10.0;
        }
        let exogenous = Array3::zeros((1, 5, 2));
        let prediction = PersistenceModel.predict(&history, &exogenous).unwrap();
        assert_eq!(prediction, vec![0.9; FORECAST_WINDOW]);
    }
}
