//! Candidate training and model selection
//!
//! Both families run their hyperparameter grid under cross validation;
//! the family with the higher mean out-of-fold R² is refit on the full
//! dataset and packaged as the artifact. A tied score keeps gradient
//! boosting, the first family evaluated.

use crate::artifact::{FittedRegressor, ModelArtifact, ModelFamily};
use crate::error::Result;
use crate::preprocessing::FeaturePipeline;
use crate::schema::FeatureRecord;
use crate::training::gradient_boosting::{GradientBoostingConfig, GradientBoostingRegressor};
use crate::training::random_forest::{RandomForestConfig, RandomForestRegressor};
use crate::training::search::{grid_search, KFold};
use ndarray::Array1;
use serde::Serialize;

/// CV verdict for one candidate family.
#[derive(Debug, Clone, Serialize)]
pub struct CandidateReport {
    pub family: ModelFamily,
    pub cv_score: f64,
    pub params: serde_json::Value,
}

/// Outcome of a full training run.
#[derive(Debug, Clone)]
pub struct SelectionResult {
    pub artifact: ModelArtifact,
    pub candidates: Vec<CandidateReport>,
}

impl SelectionResult {
    pub fn winner(&self) -> ModelFamily {
        self.artifact.regressor.family()
    }
}

fn gradient_boosting_grid() -> Vec<GradientBoostingConfig> {
    let mut grid = Vec::new();
    for &n_estimators in &[100, 200] {
        for &max_depth in &[3, 5] {
            for &learning_rate in &[0.05, 0.1] {
                grid.push(GradientBoostingConfig {
                    n_estimators,
                    max_depth,
                    learning_rate,
                    ..Default::default()
                });
            }
        }
    }
    grid
}

fn random_forest_grid() -> Vec<RandomForestConfig> {
    [None, Some(10)]
        .iter()
        .map(|&max_depth| RandomForestConfig {
            n_estimators: 100,
            max_depth,
            ..Default::default()
        })
        .collect()
}

/// Train both candidate families and select the better one.
pub fn train_and_select(
    records: &[FeatureRecord],
    targets: &Array1<f64>,
) -> Result<SelectionResult> {
    tracing::info!(n_samples = records.len(), "starting candidate search");

    let gb = grid_search(
        records,
        targets,
        gradient_boosting_grid(),
        &KFold::new(5),
        |config, x_train, y_train, x_test| {
            let mut model = GradientBoostingRegressor::new(config.clone());
            model.fit(x_train, y_train)?;
            model.predict(x_test)
        },
    )?;
    tracing::info!(cv_score = gb.cv_score, "gradient boosting search done");

    let rf = grid_search(
        records,
        targets,
        random_forest_grid(),
        &KFold::new(3),
        |config, x_train, y_train, x_test| {
            let mut model = RandomForestRegressor::new(config.clone());
            model.fit(x_train, y_train)?;
            model.predict(x_test)
        },
    )?;
    tracing::info!(cv_score = rf.cv_score, "random forest search done");

    let candidates = vec![
        CandidateReport {
            family: ModelFamily::GradientBoosting,
            cv_score: gb.cv_score,
            params: serde_json::to_value(&gb.config)?,
        },
        CandidateReport {
            family: ModelFamily::RandomForest,
            cv_score: rf.cv_score,
            params: serde_json::to_value(&rf.config)?,
        },
    ];

    // Refit the winner on the full dataset with a fresh pipeline
    let mut pipeline = FeaturePipeline::new();
    let x = pipeline.fit_transform(records)?;

    let artifact = if rf.cv_score > gb.cv_score {
        let mut model = RandomForestRegressor::new(rf.config.clone());
        model.fit(&x, targets)?;
        ModelArtifact {
            pipeline,
            regressor: FittedRegressor::RandomForest(model),
            cv_score: rf.cv_score,
            params: serde_json::to_string(&rf.config)?,
        }
    } else {
        let mut model = GradientBoostingRegressor::new(gb.config.clone());
        model.fit(&x, targets)?;
        ModelArtifact {
            pipeline,
            regressor: FittedRegressor::GradientBoosting(model),
            cv_score: gb.cv_score,
            params: serde_json::to_string(&gb.config)?,
        }
    };

    tracing::info!(
        winner = %artifact.regressor.family(),
        cv_score = artifact.cv_score,
        "model selection complete"
    );

    Ok(SelectionResult {
        artifact,
        candidates,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gradient_boosting_grid_has_eight_points() {
        assert_eq!(gradient_boosting_grid().len(), 8);
    }

    #[test]
    fn test_random_forest_grid_has_two_points() {
        let grid = random_forest_grid();
        assert_eq!(grid.len(), 2);
        assert!(grid.iter().all(|c| c.n_estimators == 100));
    }

    fn synthetic_records(n: usize) -> (Vec<FeatureRecord>, Array1<f64>) {
        let crops = ["rice", "wheat", "maize"];
        let seasons = ["kharif", "rabi"];
        let states = ["punjab", "haryana", "bihar"];

        let mut records = Vec::with_capacity(n);
        let mut targets = Vec::with_capacity(n);
        for i in 0..n {
            let rainfall = 300.0 + (i % 17) as f64 * 50.0;
            let fertilizer = 20.0 + (i % 7) as f64 * 10.0;
            records.push(FeatureRecord {
                crop_type: crops[i % crops.len()].to_string(),
                season: seasons[i % seasons.len()].to_string(),
                state: states[i % states.len()].to_string(),
                rainfall,
                avg_temperature: 15.0 + (i % 13) as f64,
                pesticide_usage: (i % 5) as f64 * 0.5,
                fertilizer,
                area: 1.0 + (i % 4) as f64,
            });
            targets.push(2.0 * rainfall + 10.0 * fertilizer + 500.0);
        }
        (records, Array1::from_vec(targets))
    }

    #[test]
    fn test_selector_produces_usable_artifact() {
        let (records, targets) = synthetic_records(40);
        let result = train_and_select(&records, &targets).unwrap();

        assert_eq!(result.candidates.len(), 2);
        let x = result.artifact.pipeline.transform(&records).unwrap();
        let predictions = result.artifact.regressor.predict(&x).unwrap();
        assert!(predictions.iter().all(|p| p.is_finite()));
    }
}
