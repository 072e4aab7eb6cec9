//! One-hot encoding for the categorical feature fields

use crate::error::{AgroError, Result};
use crate::schema::{FeatureRecord, CATEGORICAL_FIELDS};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One-hot encoder over the schema's categorical fields.
///
/// The vocabulary for each field is the sequence of distinct values in order
/// of first appearance during fit; that order defines the indicator column
/// layout and never changes afterwards. A value not seen during fit encodes
/// as the all-zero block for its field — inference inputs are uncontrolled
/// free text, so this is not an error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OneHotEncoder {
    /// Per categorical field (schema order): categories in column order.
    vocabularies: Vec<Vec<String>>,
    /// Per categorical field: category -> indicator column offset.
    #[serde(skip)]
    index: Vec<HashMap<String, usize>>,
    is_fitted: bool,
}

impl OneHotEncoder {
    pub fn new() -> Self {
        Self {
            vocabularies: vec![Vec::new(); CATEGORICAL_FIELDS.len()],
            index: vec![HashMap::new(); CATEGORICAL_FIELDS.len()],
            is_fitted: false,
        }
    }

    /// Learn the vocabulary of each categorical field.
    pub fn fit(&mut self, records: &[FeatureRecord]) -> Result<&mut Self> {
        if records.is_empty() {
            return Err(AgroError::Dataset(
                "cannot fit encoder on an empty record set".to_string(),
            ));
        }

        self.vocabularies = vec![Vec::new(); CATEGORICAL_FIELDS.len()];
        self.index = vec![HashMap::new(); CATEGORICAL_FIELDS.len()];

        for record in records {
            for (field_idx, value) in record.categorical_values().into_iter().enumerate() {
                let index = &mut self.index[field_idx];
                if !index.contains_key(value) {
                    index.insert(value.to_string(), self.vocabularies[field_idx].len());
                    self.vocabularies[field_idx].push(value.to_string());
                }
            }
        }

        self.is_fitted = true;
        Ok(self)
    }

    /// Total number of indicator columns across all categorical fields.
    pub fn width(&self) -> usize {
        self.vocabularies.iter().map(|v| v.len()).sum()
    }

    /// Vocabulary of one categorical field (schema order).
    pub fn vocabulary(&self, field_idx: usize) -> &[String] {
        &self.vocabularies[field_idx]
    }

    /// Append the indicator block of every categorical field to `out`.
    pub fn encode_into(&self, record: &FeatureRecord, out: &mut Vec<f64>) -> Result<()> {
        if !self.is_fitted {
            return Err(AgroError::NotFitted);
        }

        for (field_idx, value) in record.categorical_values().into_iter().enumerate() {
            let vocab_len = self.vocabularies[field_idx].len();
            let start = out.len();
            out.resize(start + vocab_len, 0.0);
            if let Some(&offset) = self.index[field_idx].get(value) {
                out[start + offset] = 1.0;
            }
            // Unknown category: block stays all-zero.
        }

        Ok(())
    }

    /// Rebuild the lookup index after deserialization (serde skips it).
    pub fn rebuild_index(&mut self) {
        self.index = self
            .vocabularies
            .iter()
            .map(|vocab| {
                vocab
                    .iter()
                    .enumerate()
                    .map(|(i, cat)| (cat.clone(), i))
                    .collect()
            })
            .collect();
    }
}

impl Default for OneHotEncoder {
    fn default() -> Self {
        Self::new()
    }
}
