//! Persisted model artifact: fitted pipeline + winning regressor
//!
//! Saved as bincode, published atomically (write to a temp file in the
//! destination directory, then rename) so readers never observe a
//! half-written artifact.

use crate::error::{AgroError, Result};
use crate::preprocessing::FeaturePipeline;
use crate::training::{GradientBoostingRegressor, RandomForestRegressor};
use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;

/// Which candidate family won model selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModelFamily {
    GradientBoosting,
    RandomForest,
}

impl fmt::Display for ModelFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelFamily::GradientBoosting => write!(f, "gradient_boosting"),
            ModelFamily::RandomForest => write!(f, "random_forest"),
        }
    }
}

/// A fitted regressor of either family.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum FittedRegressor {
    GradientBoosting(GradientBoostingRegressor),
    RandomForest(RandomForestRegressor),
}

impl FittedRegressor {
    pub fn family(&self) -> ModelFamily {
        match self {
            FittedRegressor::GradientBoosting(_) => ModelFamily::GradientBoosting,
            FittedRegressor::RandomForest(_) => ModelFamily::RandomForest,
        }
    }

    pub fn predict(&self, x: &Array2<f64>) -> Result<Array1<f64>> {
        match self {
            FittedRegressor::GradientBoosting(model) => model.predict(x),
            FittedRegressor::RandomForest(model) => model.predict(x),
        }
    }
}

/// Everything inference needs, bundled into one file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub pipeline: FeaturePipeline,
    pub regressor: FittedRegressor,
    /// Mean out-of-fold R² of the winning grid point
    pub cv_score: f64,
    /// Winning hyperparameters as a JSON document, for reporting.
    /// Kept as text: bincode cannot decode self-describing JSON values.
    pub params: String,
}

impl ModelArtifact {
    /// Serialize to `path`, replacing any previous artifact atomically.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let bytes = bincode::serialize(self)
            .map_err(|e| AgroError::Serialization(e.to_string()))?;

        let mut tmp = path.as_os_str().to_owned();
        tmp.push(".tmp");
        let tmp = std::path::PathBuf::from(tmp);

        fs::write(&tmp, &bytes)?;
        fs::rename(&tmp, path)?;

        tracing::info!(path = %path.display(), bytes = bytes.len(), "saved model artifact");
        Ok(())
    }

    /// Deserialize from `path` and rebuild transient pipeline state.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(AgroError::ArtifactMissing(path.to_path_buf()));
        }

        let bytes = fs::read(path)?;
        let mut artifact: ModelArtifact = bincode::deserialize(&bytes)
            .map_err(|e| AgroError::ArtifactCorrupt(e.to_string()))?;
        artifact.pipeline.rebuild_after_load();

        Ok(artifact)
    }
}
