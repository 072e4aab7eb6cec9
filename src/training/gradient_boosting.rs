//! Gradient boosted regression trees
//!
//! Native implementation: each round fits a shallow tree to the residuals
//! of the running prediction and adds it with shrinkage.

use crate::error::{AgroError, Result};
use crate::training::decision_tree::DecisionTree;
use ndarray::{Array1, Array2, Axis};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Hyperparameters for the gradient boosting family.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradientBoostingConfig {
    /// Number of boosting rounds (trees)
    pub n_estimators: usize,
    /// Learning rate (shrinkage)
    pub learning_rate: f64,
    /// Maximum tree depth
    pub max_depth: usize,
    /// Minimum samples per leaf
    pub min_samples_leaf: usize,
    /// Row subsample ratio per round; 1.0 uses every row
    pub subsample: f64,
    /// Random seed
    pub random_state: u64,
}

impl Default for GradientBoostingConfig {
    fn default() -> Self {
        Self {
            n_estimators: 100,
            learning_rate: 0.1,
            max_depth: 3,
            min_samples_leaf: 1,
            subsample: 1.0,
            random_state: 42,
        }
    }
}

/// Gradient boosting regressor (squared-error objective).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradientBoostingRegressor {
    config: GradientBoostingConfig,
    trees: Vec<DecisionTree>,
    initial_prediction: f64,
}

impl GradientBoostingRegressor {
    pub fn new(config: GradientBoostingConfig) -> Self {
        Self {
            config,
            trees: Vec::new(),
            initial_prediction: 0.0,
        }
    }

    pub fn config(&self) -> &GradientBoostingConfig {
        &self.config
    }

    /// Fit the boosted ensemble.
    pub fn fit(&mut self, x: &Array2<f64>, y: &Array1<f64>) -> Result<&mut Self> {
        let n_samples = x.nrows();

        if n_samples != y.len() {
            return Err(AgroError::Shape {
                expected: format!("y length = {}", n_samples),
                actual: format!("y length = {}", y.len()),
            });
        }
        if n_samples == 0 {
            return Err(AgroError::Dataset(
                "cannot fit booster on zero samples".to_string(),
            ));
        }

        // Initialize with the target mean
        self.initial_prediction = y.mean().unwrap_or(0.0);
        self.trees = Vec::with_capacity(self.config.n_estimators);

        let mut predictions = Array1::from_elem(n_samples, self.initial_prediction);
        let mut rng = ChaCha8Rng::seed_from_u64(self.config.random_state);

        for _ in 0..self.config.n_estimators {
            let residuals: Array1<f64> = y
                .iter()
                .zip(predictions.iter())
                .map(|(yi, pi)| yi - pi)
                .collect();

            let sample_indices = self.subsample_indices(n_samples, &mut rng);

            let x_sub = x.select(Axis(0), &sample_indices);
            let y_sub: Array1<f64> =
                Array1::from_vec(sample_indices.iter().map(|&i| residuals[i]).collect());

            let mut tree = DecisionTree::new()
                .with_max_depth(self.config.max_depth)
                .with_min_samples_leaf(self.config.min_samples_leaf);
            tree.fit(&x_sub, &y_sub)?;

            // Update running predictions on the full set with shrinkage
            let tree_pred = tree.predict(x)?;
            for i in 0..n_samples {
                predictions[i] += self.config.learning_rate * tree_pred[i];
            }

            self.trees.push(tree);
        }

        Ok(self)
    }

    /// Make predictions
    pub fn predict(&self, x: &Array2<f64>) -> Result<Array1<f64>> {
        if self.trees.is_empty() {
            return Err(AgroError::NotFitted);
        }

        let n = x.nrows();
        let mut predictions = Array1::from_elem(n, self.initial_prediction);

        for tree in &self.trees {
            let tree_pred = tree.predict(x)?;
            for i in 0..n {
                predictions[i] += self.config.learning_rate * tree_pred[i];
            }
        }

        Ok(predictions)
    }

    /// Number of fitted boosting rounds
    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    fn subsample_indices(&self, n: usize, rng: &mut ChaCha8Rng) -> Vec<usize> {
        if self.config.subsample >= 1.0 {
            return (0..n).collect();
        }
        let sample_size = ((n as f64) * self.config.subsample).ceil() as usize;
        let mut indices: Vec<usize> = (0..n).collect();
        indices.shuffle(rng);
        indices.truncate(sample_size.max(1));
        indices.sort_unstable();
        indices
    }
}
