//! Data-driven agronomy recommendations
//!
//! Crop-specific guidance comes from a static table keyed by lowercase
//! crop name; yield-band advice is appended from the predicted value.

use crate::schema::FeatureRecord;

/// Below this predicted yield a low-yield caution is appended.
pub const LOW_YIELD_THRESHOLD: f64 = 3000.0;
/// Above this predicted yield a high-yield note is appended.
pub const HIGH_YIELD_THRESHOLD: f64 = 6000.0;

enum YieldBand {
    /// Strictly below the threshold
    Below(f64),
    /// Strictly above the threshold
    Above(f64),
}

struct YieldBandRule {
    band: YieldBand,
    message: &'static str,
}

impl YieldBandRule {
    fn matches(&self, predicted_yield: f64) -> bool {
        match self.band {
            YieldBand::Below(t) => predicted_yield < t,
            YieldBand::Above(t) => predicted_yield > t,
        }
    }
}

/// Checked in order; the first match contributes the only band message.
static YIELD_BAND_RULES: &[YieldBandRule] = &[
    YieldBandRule {
        band: YieldBand::Below(LOW_YIELD_THRESHOLD),
        message: "Yield is low - consider adjusting fertilizer dosage or irrigation.",
    },
    YieldBandRule {
        band: YieldBand::Above(HIGH_YIELD_THRESHOLD),
        message: "Great yield expected! Maintain proper weed control and nutrient management.",
    },
];

struct CropGuidance {
    crop: &'static str,
    fertilizer: &'static str,
    pesticide: &'static str,
}

static CROP_GUIDANCE: &[CropGuidance] = &[
    CropGuidance {
        crop: "rice",
        fertilizer: "Use 60 kg/ha of Urea and 30 kg/ha of DAP for optimal rice growth.",
        pesticide: "Apply 2.5 L/ha of Monocrotophos pesticide during tillering stage.",
    },
    CropGuidance {
        crop: "wheat",
        fertilizer: "Use 50 kg/ha of NPK (12:32:16) at sowing.",
        pesticide: "Apply 2 sprays of Chlorpyrifos at 10-day intervals.",
    },
];

/// Build the recommendation list for a record and its predicted yield.
///
/// Pure function of its inputs: the same record and prediction always
/// produce the same messages in the same order. Thresholds are strict,
/// so a prediction of exactly 3000 or 6000 gets no band message.
pub fn recommend(record: &FeatureRecord, predicted_yield: f64) -> Vec<String> {
    let crop = record.crop_type.trim().to_lowercase();
    let mut recommendations = Vec::new();

    match CROP_GUIDANCE.iter().find(|g| g.crop == crop) {
        Some(guidance) => {
            recommendations.push(guidance.fertilizer.to_string());
            recommendations.push(guidance.pesticide.to_string());
        }
        None => {
            recommendations.push(format!(
                "Follow local extension guidelines for {} pesticide/fertilizer usage.",
                crop
            ));
        }
    }

    if let Some(rule) = YIELD_BAND_RULES.iter().find(|r| r.matches(predicted_yield)) {
        recommendations.push(rule.message.to_string());
    }

    recommendations
}
