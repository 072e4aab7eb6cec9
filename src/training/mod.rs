//! Model training: base tree, both candidate families, cross-validated
//! grid search, and the selector that picks the winner.

pub mod decision_tree;
pub mod gradient_boosting;
pub mod metrics;
pub mod random_forest;
pub mod search;
pub mod selector;

pub use decision_tree::DecisionTree;
pub use gradient_boosting::{GradientBoostingConfig, GradientBoostingRegressor};
pub use metrics::{r2_score, RegressionMetrics};
pub use random_forest::{RandomForestConfig, RandomForestRegressor};
pub use search::{grid_search, GridSearchOutcome, KFold};
pub use selector::{train_and_select, CandidateReport, SelectionResult};
