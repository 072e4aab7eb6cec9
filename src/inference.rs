//! Inference engine: loads the artifact once and answers single-record
//! prediction requests for the lifetime of the process.

use crate::artifact::{ModelArtifact, ModelFamily};
use crate::error::{AgroError, Result};
use crate::recommend::recommend;
use crate::schema::FeatureRecord;
use ndarray::Array2;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;

/// Predictions are rounded to two decimal places for display.
const DISPLAY_SCALE: f64 = 100.0;

/// Response payload for one prediction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionResult {
    pub predicted_yield: f64,
    pub recommendations: Vec<String>,
}

/// Shared, read-only prediction engine. Cheap to clone; safe to share
/// across request handlers.
#[derive(Debug, Clone)]
pub struct InferenceEngine {
    artifact: Arc<ModelArtifact>,
}

impl InferenceEngine {
    /// Load the artifact from disk. Called once at startup; a failure
    /// here is fatal to the service.
    pub fn load(path: &Path) -> Result<Self> {
        let artifact = ModelArtifact::load(path)?;
        tracing::info!(
            path = %path.display(),
            family = %artifact.regressor.family(),
            cv_score = artifact.cv_score,
            "inference engine ready"
        );
        Ok(Self {
            artifact: Arc::new(artifact),
        })
    }

    pub fn from_artifact(artifact: ModelArtifact) -> Self {
        Self {
            artifact: Arc::new(artifact),
        }
    }

    pub fn model_family(&self) -> ModelFamily {
        self.artifact.regressor.family()
    }

    pub fn cv_score(&self) -> f64 {
        self.artifact.cv_score
    }

    /// Predict yield for one record, rounded to 2 decimal places.
    pub fn predict(&self, record: &FeatureRecord) -> Result<f64> {
        record.validate()?;

        let vector = self.artifact.pipeline.transform_record(record)?;
        let n_features = vector.len();
        let x = Array2::from_shape_vec((1, n_features), vector).map_err(|e| {
            AgroError::Prediction(format!("design vector reshape failed: {}", e))
        })?;

        let predictions = self.artifact.regressor.predict(&x)?;
        let raw = predictions[0];
        if !raw.is_finite() {
            return Err(AgroError::Prediction(format!(
                "regressor produced a non-finite value: {}",
                raw
            )));
        }

        Ok((raw * DISPLAY_SCALE).round() / DISPLAY_SCALE)
    }

    /// Predict and attach agronomy recommendations.
    pub fn predict_with_recommendations(&self, record: &FeatureRecord) -> Result<PredictionResult> {
        let predicted_yield = self.predict(record)?;
        let recommendations = recommend(record, predicted_yield);
        Ok(PredictionResult {
            predicted_yield,
            recommendations,
        })
    }
}
