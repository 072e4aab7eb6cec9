//! Random forest regressor

use crate::error::{AgroError, Result};
use crate::training::decision_tree::DecisionTree;
use ndarray::{Array1, Array2, Axis};
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Hyperparameters for the random forest family.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RandomForestConfig {
    /// Number of trees
    pub n_estimators: usize,
    /// Maximum depth per tree; `None` grows unbounded
    pub max_depth: Option<usize>,
    /// Minimum samples in leaf
    pub min_samples_leaf: usize,
    /// Random seed
    pub random_state: u64,
}

impl Default for RandomForestConfig {
    fn default() -> Self {
        Self {
            n_estimators: 100,
            max_depth: None,
            min_samples_leaf: 1,
            random_state: 42,
        }
    }
}

/// Bagged ensemble of regression trees; predictions are the tree mean.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RandomForestRegressor {
    config: RandomForestConfig,
    trees: Vec<DecisionTree>,
}

impl RandomForestRegressor {
    pub fn new(config: RandomForestConfig) -> Self {
        Self {
            config,
            trees: Vec::new(),
        }
    }

    pub fn config(&self) -> &RandomForestConfig {
        &self.config
    }

    /// Fit the forest: each tree trains on a bootstrap sample with
    /// sqrt(n_features) feature subsampling per split.
    pub fn fit(&mut self, x: &Array2<f64>, y: &Array1<f64>) -> Result<&mut Self> {
        let n_samples = x.nrows();
        let n_features = x.ncols();

        if n_samples != y.len() {
            return Err(AgroError::Shape {
                expected: format!("y length = {}", n_samples),
                actual: format!("y length = {}", y.len()),
            });
        }
        if n_samples == 0 {
            return Err(AgroError::Dataset(
                "cannot fit forest on zero samples".to_string(),
            ));
        }

        let max_features = ((n_features as f64).sqrt().ceil() as usize).max(1);
        let base_seed = self.config.random_state;

        let trees: Result<Vec<DecisionTree>> = (0..self.config.n_estimators)
            .into_par_iter()
            .map(|tree_idx| {
                let seed = base_seed.wrapping_add(tree_idx as u64);
                let mut rng = ChaCha8Rng::seed_from_u64(seed);

                // Bootstrap sample
                let sample_indices: Vec<usize> = (0..n_samples)
                    .map(|_| (rng.next_u64() as usize) % n_samples)
                    .collect();

                let x_boot = x.select(Axis(0), &sample_indices);
                let y_boot: Array1<f64> =
                    Array1::from_vec(sample_indices.iter().map(|&i| y[i]).collect());

                let mut tree = DecisionTree::new()
                    .with_min_samples_leaf(self.config.min_samples_leaf);
                if let Some(d) = self.config.max_depth {
                    tree = tree.with_max_depth(d);
                }
                tree.max_features = Some(max_features);
                tree.random_state = seed;
                tree.fit(&x_boot, &y_boot)?;

                Ok(tree)
            })
            .collect();

        self.trees = trees?;
        Ok(self)
    }

    /// Predict as the mean over all trees.
    pub fn predict(&self, x: &Array2<f64>) -> Result<Array1<f64>> {
        if self.trees.is_empty() {
            return Err(AgroError::NotFitted);
        }

        let all_predictions: Result<Vec<Array1<f64>>> =
            self.trees.par_iter().map(|tree| tree.predict(x)).collect();
        let all_predictions = all_predictions?;

        let n_samples = x.nrows();
        let n_trees = all_predictions.len() as f64;

        let predictions: Vec<f64> = (0..n_samples)
            .map(|i| all_predictions.iter().map(|p| p[i]).sum::<f64>() / n_trees)
            .collect();

        Ok(Array1::from_vec(predictions))
    }

    /// Number of fitted trees
    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_regressor_learns_linear_target() {
        let x = array![[1.0], [2.0], [3.0], [4.0], [5.0], [6.0], [7.0], [8.0]];
        let y = array![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0];

        let mut rf = RandomForestRegressor::new(RandomForestConfig {
            n_estimators: 20,
            ..Default::default()
        });
        rf.fit(&x, &y).unwrap();

        let predictions = rf.predict(&x).unwrap();
        let mse: f64 = predictions
            .iter()
            .zip(y.iter())
            .map(|(p, a)| (p - a).powi(2))
            .sum::<f64>()
            / y.len() as f64;

        assert!(mse < 2.0, "MSE too high: {}", mse);
    }

    #[test]
    fn test_fit_is_reproducible_with_seed() {
        let x = array![[1.0], [2.0], [3.0], [4.0], [5.0]];
        let y = array![2.0, 4.0, 6.0, 8.0, 10.0];

        let config = RandomForestConfig {
            n_estimators: 10,
            random_state: 7,
            ..Default::default()
        };

        let mut a = RandomForestRegressor::new(config.clone());
        let mut b = RandomForestRegressor::new(config);
        a.fit(&x, &y).unwrap();
        b.fit(&x, &y).unwrap();

        assert_eq!(a.predict(&x).unwrap(), b.predict(&x).unwrap());
    }

    #[test]
    fn test_unfitted_predict_is_error() {
        let rf = RandomForestRegressor::new(RandomForestConfig::default());
        let x = array![[1.0]];
        assert!(matches!(rf.predict(&x), Err(AgroError::NotFitted)));
    }
}
