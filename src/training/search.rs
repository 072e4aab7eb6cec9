//! K-fold cross validation and hyperparameter grid search
//!
//! Each fold fits a fresh [`FeaturePipeline`] on the training split only,
//! so encoder vocabularies and scaler statistics never leak from held-out
//! rows into the score.

use crate::error::{AgroError, Result};
use crate::preprocessing::FeaturePipeline;
use crate::schema::FeatureRecord;
use crate::training::metrics::r2_score;
use ndarray::{Array1, Array2};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Seeded k-fold splitter.
#[derive(Debug, Clone)]
pub struct KFold {
    pub n_splits: usize,
    pub random_state: u64,
}

impl KFold {
    pub fn new(n_splits: usize) -> Self {
        Self {
            n_splits,
            random_state: 42,
        }
    }

    pub fn with_random_state(mut self, seed: u64) -> Self {
        self.random_state = seed;
        self
    }

    /// Produce `(train_indices, test_indices)` pairs covering every sample
    /// exactly once as test data.
    pub fn split(&self, n_samples: usize) -> Result<Vec<(Vec<usize>, Vec<usize>)>> {
        if self.n_splits < 2 {
            return Err(AgroError::InvalidInput(format!(
                "k-fold requires at least 2 splits, got {}",
                self.n_splits
            )));
        }
        if n_samples < self.n_splits {
            return Err(AgroError::Dataset(format!(
                "cannot split {} samples into {} folds",
                n_samples, self.n_splits
            )));
        }

        let mut indices: Vec<usize> = (0..n_samples).collect();
        let mut rng = ChaCha8Rng::seed_from_u64(self.random_state);
        indices.shuffle(&mut rng);

        let fold_size = n_samples / self.n_splits;
        let remainder = n_samples % self.n_splits;

        let mut folds = Vec::with_capacity(self.n_splits);
        let mut start = 0;
        for fold_idx in 0..self.n_splits {
            // First `remainder` folds take one extra sample
            let size = fold_size + usize::from(fold_idx < remainder);
            let test: Vec<usize> = indices[start..start + size].to_vec();
            let train: Vec<usize> = indices[..start]
                .iter()
                .chain(indices[start + size..].iter())
                .copied()
                .collect();
            folds.push((train, test));
            start += size;
        }

        Ok(folds)
    }
}

/// One evaluated grid point.
#[derive(Debug, Clone)]
pub struct GridSearchOutcome<C> {
    pub config: C,
    pub cv_score: f64,
}

/// Evaluate every config by k-fold cross validation and keep the best.
///
/// Scores are mean out-of-fold R². On a tied score the earlier grid point
/// wins. `fit_predict` trains a model on the fold's design matrix and
/// returns predictions for the held-out matrix.
pub fn grid_search<C, F>(
    records: &[FeatureRecord],
    targets: &Array1<f64>,
    configs: Vec<C>,
    kfold: &KFold,
    fit_predict: F,
) -> Result<GridSearchOutcome<C>>
where
    C: Clone,
    F: Fn(&C, &Array2<f64>, &Array1<f64>, &Array2<f64>) -> Result<Array1<f64>>,
{
    if configs.is_empty() {
        return Err(AgroError::InvalidInput(
            "grid search needs at least one candidate config".to_string(),
        ));
    }

    let folds = kfold.split(records.len())?;
    let mut best: Option<GridSearchOutcome<C>> = None;

    for config in configs {
        let mut fold_scores = Vec::with_capacity(folds.len());

        for (train_idx, test_idx) in &folds {
            let train_records: Vec<FeatureRecord> =
                train_idx.iter().map(|&i| records[i].clone()).collect();
            let test_records: Vec<FeatureRecord> =
                test_idx.iter().map(|&i| records[i].clone()).collect();
            let y_train: Array1<f64> =
                Array1::from_vec(train_idx.iter().map(|&i| targets[i]).collect());
            let y_test: Array1<f64> =
                Array1::from_vec(test_idx.iter().map(|&i| targets[i]).collect());

            let mut pipeline = FeaturePipeline::new();
            let x_train = pipeline.fit_transform(&train_records)?;
            let x_test = pipeline.transform(&test_records)?;

            let y_pred = fit_predict(&config, &x_train, &y_train, &x_test)?;
            fold_scores.push(r2_score(&y_test, &y_pred));
        }

        let cv_score = fold_scores.iter().sum::<f64>() / fold_scores.len() as f64;
        tracing::debug!(cv_score, "evaluated grid point");

        let better = match &best {
            None => true,
            Some(b) => cv_score > b.cv_score,
        };
        if better {
            best = Some(GridSearchOutcome { config, cv_score });
        }
    }

    best.ok_or_else(|| AgroError::InvalidInput("empty grid".to_string()))
}
