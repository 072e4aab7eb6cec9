//! Feature schema: the shared field contract between training and inference
//!
//! The field set is declared once here and validated at both boundaries,
//! instead of relying on matching column names by convention.

use crate::error::{AgroError, Result};
use serde::{Deserialize, Serialize};

/// Categorical feature columns, in design-matrix order.
pub const CATEGORICAL_FIELDS: [&str; 3] = ["crop_type", "season", "state"];

/// Numeric feature columns, in design-matrix order.
pub const NUMERIC_FIELDS: [&str; 5] = [
    "rainfall",
    "avg_temperature",
    "pesticide_usage",
    "fertilizer",
    "area",
];

/// Training target column.
pub const TARGET_FIELD: &str = "crop_yield";

/// All feature columns (categorical then numeric), in schema order.
pub fn feature_fields() -> Vec<&'static str> {
    CATEGORICAL_FIELDS
        .iter()
        .chain(NUMERIC_FIELDS.iter())
        .copied()
        .collect()
}

/// One input observation with the 8 declared agronomic fields.
///
/// Serde enforces presence and type of every field, so a deserialized
/// record is structurally valid; [`FeatureRecord::validate`] checks the
/// value domain on top of that.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureRecord {
    pub crop_type: String,
    pub season: String,
    pub state: String,
    pub rainfall: f64,
    // The original public API used `avg_temp` on the wire.
    #[serde(alias = "avg_temp")]
    pub avg_temperature: f64,
    pub pesticide_usage: f64,
    pub fertilizer: f64,
    pub area: f64,
}

impl FeatureRecord {
    /// Categorical values in schema order.
    pub fn categorical_values(&self) -> [&str; 3] {
        [&self.crop_type, &self.season, &self.state]
    }

    /// Numeric values in schema order.
    pub fn numeric_values(&self) -> [f64; 5] {
        [
            self.rainfall,
            self.avg_temperature,
            self.pesticide_usage,
            self.fertilizer,
            self.area,
        ]
    }

    /// Validate value domains: numerics must be finite and non-negative,
    /// categoricals non-empty. Unknown category *values* are fine — only
    /// malformed input is rejected.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in NUMERIC_FIELDS.iter().zip(self.numeric_values()) {
            if !value.is_finite() {
                return Err(AgroError::InvalidInput(format!(
                    "field '{}' must be a finite number, got {}",
                    name, value
                )));
            }
            if value < 0.0 {
                return Err(AgroError::InvalidInput(format!(
                    "field '{}' must be non-negative, got {}",
                    name, value
                )));
            }
        }
        for (name, value) in CATEGORICAL_FIELDS.iter().zip(self.categorical_values()) {
            if value.trim().is_empty() {
                return Err(AgroError::InvalidInput(format!(
                    "field '{}' must not be empty",
                    name
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    pub(crate) fn sample_record() -> FeatureRecord {
        FeatureRecord {
            crop_type: "rice".to_string(),
            season: "kharif".to_string(),
            state: "punjab".to_string(),
            rainfall: 800.0,
            avg_temperature: 28.0,
            pesticide_usage: 2.0,
            fertilizer: 50.0,
            area: 2.0,
        }
    }

    #[test]
    fn test_field_order() {
        let fields = feature_fields();
        assert_eq!(fields.len(), 8);
        assert_eq!(fields[0], "crop_type");
        assert_eq!(fields[7], "area");
    }

    #[test]
    fn test_validate_ok() {
        assert!(sample_record().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_nan() {
        let mut record = sample_record();
        record.rainfall = f64::NAN;
        assert!(matches!(
            record.validate(),
            Err(AgroError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_validate_rejects_negative() {
        let mut record = sample_record();
        record.area = -1.0;
        assert!(record.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_empty_categorical() {
        let mut record = sample_record();
        record.state = "  ".to_string();
        assert!(record.validate().is_err());
    }

    #[test]
    fn test_deserialize_requires_all_fields() {
        let json = r#"{"crop_type":"rice","season":"kharif","state":"punjab"}"#;
        assert!(serde_json::from_str::<FeatureRecord>(json).is_err());
    }

    #[test]
    fn test_deserialize_accepts_avg_temp_alias() {
        let json = r#"{
            "crop_type":"rice","season":"kharif","state":"punjab",
            "rainfall":800,"avg_temp":28,"pesticide_usage":2,
            "fertilizer":50,"area":2
        }"#;
        let record: FeatureRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.avg_temperature, 28.0);
    }
}
