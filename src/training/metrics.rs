//! Regression metrics

use ndarray::Array1;
use serde::{Deserialize, Serialize};

/// Summary metrics for a fitted regressor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegressionMetrics {
    pub r2: f64,
    pub mae: f64,
    pub rmse: f64,
}

impl RegressionMetrics {
    pub fn compute(y_true: &Array1<f64>, y_pred: &Array1<f64>) -> Self {
        Self {
            r2: r2_score(y_true, y_pred),
            mae: mean_absolute_error(y_true, y_pred),
            rmse: mean_squared_error(y_true, y_pred).sqrt(),
        }
    }
}

/// Coefficient of determination: `1 - SS_res / SS_tot`.
///
/// A constant target (zero total variance) scores 0.0 so a degenerate
/// fold cannot dominate model selection.
pub fn r2_score(y_true: &Array1<f64>, y_pred: &Array1<f64>) -> f64 {
    if y_true.is_empty() || y_true.len() != y_pred.len() {
        return 0.0;
    }

    let mean = y_true.mean().unwrap_or(0.0);
    let ss_tot: f64 = y_true.iter().map(|&y| (y - mean).powi(2)).sum();
    let ss_res: f64 = y_true
        .iter()
        .zip(y_pred.iter())
        .map(|(&yt, &yp)| (yt - yp).powi(2))
        .sum();

    if ss_tot == 0.0 {
        return 0.0;
    }

    1.0 - ss_res / ss_tot
}

pub fn mean_absolute_error(y_true: &Array1<f64>, y_pred: &Array1<f64>) -> f64 {
    if y_true.is_empty() {
        return 0.0;
    }
    y_true
        .iter()
        .zip(y_pred.iter())
        .map(|(&yt, &yp)| (yt - yp).abs())
        .sum::<f64>()
        / y_true.len() as f64
}

pub fn mean_squared_error(y_true: &Array1<f64>, y_pred: &Array1<f64>) -> f64 {
    if y_true.is_empty() {
        return 0.0;
    }
    y_true
        .iter()
        .zip(y_pred.iter())
        .map(|(&yt, &yp)| (yt - yp).powi(2))
        .sum::<f64>()
        / y_true.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_perfect_fit_scores_one() {
        let y = array![1.0, 2.0, 3.0, 4.0];
        assert!((r2_score(&y, &y) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_mean_prediction_scores_zero() {
        let y_true = array![1.0, 2.0, 3.0];
        let y_pred = array![2.0, 2.0, 2.0];
        assert!(r2_score(&y_true, &y_pred).abs() < 1e-12);
    }

    #[test]
    fn test_worse_than_mean_is_negative() {
        let y_true = array![1.0, 2.0, 3.0];
        let y_pred = array![3.0, 1.0, 5.0];
        assert!(r2_score(&y_true, &y_pred) < 0.0);
    }

    #[test]
    fn test_constant_target_scores_zero() {
        let y_true = array![5.0, 5.0, 5.0];
        let y_pred = array![4.0, 5.0, 6.0];
        assert_eq!(r2_score(&y_true, &y_pred), 0.0);
    }

    #[test]
    fn test_metrics_bundle() {
        let y_true = array![0.0, 2.0];
        let y_pred = array![1.0, 1.0];
        let m = RegressionMetrics::compute(&y_true, &y_pred);
        assert_eq!(m.mae, 1.0);
        assert_eq!(m.rmse, 1.0);
    }
}
