//! Standardization for the numeric feature fields

use crate::error::{AgroError, Result};
use crate::schema::{FeatureRecord, NUMERIC_FIELDS};
use serde::{Deserialize, Serialize};

/// Parameters of one standardized column.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ScalerParams {
    mean: f64,
    std: f64,
}

/// Z-score scaler over the schema's numeric fields: `(x - mean) / std`.
///
/// A constant column gets std replaced with 1.0 so it scales to zero
/// instead of dividing by zero.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandardScaler {
    /// Per numeric field, in schema order.
    params: Vec<ScalerParams>,
    is_fitted: bool,
}

impl StandardScaler {
    pub fn new() -> Self {
        Self {
            params: Vec::new(),
            is_fitted: false,
        }
    }

    /// Learn mean and standard deviation of each numeric field.
    pub fn fit(&mut self, records: &[FeatureRecord]) -> Result<&mut Self> {
        if records.is_empty() {
            return Err(AgroError::Dataset(
                "cannot fit scaler on an empty record set".to_string(),
            ));
        }

        let n = records.len() as f64;
        self.params = (0..NUMERIC_FIELDS.len())
            .map(|field_idx| {
                let values: Vec<f64> = records
                    .iter()
                    .map(|r| r.numeric_values()[field_idx])
                    .collect();
                let mean = values.iter().sum::<f64>() / n;
                let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
                let std = variance.sqrt();
                ScalerParams {
                    mean,
                    std: if std == 0.0 { 1.0 } else { std },
                }
            })
            .collect();

        self.is_fitted = true;
        Ok(self)
    }

    /// Append the standardized numeric fields to `out`.
    pub fn scale_into(&self, record: &FeatureRecord, out: &mut Vec<f64>) -> Result<()> {
        if !self.is_fitted {
            return Err(AgroError::NotFitted);
        }

        for (params, value) in self.params.iter().zip(record.numeric_values()) {
            out.push((value - params.mean) / params.std);
        }

        Ok(())
    }

    /// Number of output columns (one per numeric field).
    pub fn width(&self) -> usize {
        self.params.len()
    }
}

impl Default for StandardScaler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record_with_rainfall(rainfall: f64) -> FeatureRecord {
        FeatureRecord {
            crop_type: "rice".to_string(),
            season: "kharif".to_string(),
            state: "punjab".to_string(),
            rainfall,
            avg_temperature: 25.0,
            pesticide_usage: 1.0,
            fertilizer: 40.0,
            area: 1.0,
        }
    }

    #[test]
    fn test_scaled_values_center_on_zero() {
        let records: Vec<FeatureRecord> =
            [100.0, 200.0, 300.0].iter().map(|&r| record_with_rainfall(r)).collect();

        let mut scaler = StandardScaler::new();
        scaler.fit(&records).unwrap();

        let mut out = Vec::new();
        scaler.scale_into(&record_with_rainfall(200.0), &mut out).unwrap();
        // rainfall is the first numeric field; 200 is the mean
        assert!(out[0].abs() < 1e-12);
    }

    #[test]
    fn test_constant_column_scales_to_zero() {
        let records: Vec<FeatureRecord> =
            [500.0, 500.0, 500.0].iter().map(|&r| record_with_rainfall(r)).collect();

        let mut scaler = StandardScaler::new();
        scaler.fit(&records).unwrap();

        let mut out = Vec::new();
        scaler.scale_into(&record_with_rainfall(500.0), &mut out).unwrap();
        assert_eq!(out[0], 0.0);
        // avg_temperature is constant too
        assert_eq!(out[1], 0.0);
    }

    #[test]
    fn test_unfitted_scaler_is_error() {
        let scaler = StandardScaler::new();
        let mut out = Vec::new();
        assert!(matches!(
            scaler.scale_into(&record_with_rainfall(1.0), &mut out),
            Err(AgroError::NotFitted)
        ));
    }
}
