//! Combined preprocessing pipeline: one-hot categoricals + standardized numerics

use crate::error::{AgroError, Result};
use crate::preprocessing::{OneHotEncoder, StandardScaler};
use crate::schema::FeatureRecord;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

/// The fitted preprocessing state shared by training and inference.
///
/// Design-vector layout: indicator blocks for the categorical fields in
/// schema order, followed by the standardized numeric fields in schema
/// order. The layout is fixed at fit time; the same record transformed
/// twice with the same fitted pipeline yields bit-identical vectors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeaturePipeline {
    encoder: OneHotEncoder,
    scaler: StandardScaler,
    is_fitted: bool,
}

impl FeaturePipeline {
    pub fn new() -> Self {
        Self {
            encoder: OneHotEncoder::new(),
            scaler: StandardScaler::new(),
            is_fitted: false,
        }
    }

    /// Fit encoder and scaler on the training records.
    pub fn fit(&mut self, records: &[FeatureRecord]) -> Result<&mut Self> {
        self.encoder.fit(records)?;
        self.scaler.fit(records)?;
        self.is_fitted = true;
        Ok(self)
    }

    /// Width of the design vector.
    pub fn n_features(&self) -> usize {
        self.encoder.width() + self.scaler.width()
    }

    /// Transform one record into its design vector.
    pub fn transform_record(&self, record: &FeatureRecord) -> Result<Vec<f64>> {
        if !self.is_fitted {
            return Err(AgroError::NotFitted);
        }
        let mut out = Vec::with_capacity(self.n_features());
        self.encoder.encode_into(record, &mut out)?;
        self.scaler.scale_into(record, &mut out)?;
        Ok(out)
    }

    /// Transform a record slice into a row-major design matrix.
    ///
    /// Each row goes through [`Self::transform_record`], so training and
    /// single-record inference encode through exactly the same path.
    pub fn transform(&self, records: &[FeatureRecord]) -> Result<Array2<f64>> {
        let n_features = self.n_features();
        let mut flat = Vec::with_capacity(records.len() * n_features);
        for record in records {
            flat.extend(self.transform_record(record)?);
        }
        Array2::from_shape_vec((records.len(), n_features), flat).map_err(|e| AgroError::Shape {
            expected: format!("{} x {}", records.len(), n_features),
            actual: e.to_string(),
        })
    }

    /// Fit and transform in one step.
    pub fn fit_transform(&mut self, records: &[FeatureRecord]) -> Result<Array2<f64>> {
        self.fit(records)?;
        self.transform(records)
    }

    /// Rebuild transient lookup state after deserialization.
    pub fn rebuild_after_load(&mut self) {
        self.encoder.rebuild_index();
    }
}

impl Default for FeaturePipeline {
    fn default() -> Self {
        Self::new()
    }
}
