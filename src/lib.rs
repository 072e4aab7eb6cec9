//! AgroYield - Crop yield prediction
//!
//! Trains and serves regression models that estimate crop yield from
//! agronomic features, with rule-based fertilizer/pesticide guidance.
//!
//! # Modules
//!
//! - [`schema`] - The shared feature declaration validated at both the
//!   training and inference boundaries
//! - [`dataset`] - CSV loading and row cleaning
//! - [`preprocessing`] - One-hot encoding + standardization pipeline
//! - [`training`] - Candidate models, cross-validated grid search, and
//!   model selection
//! - [`artifact`] - Persisted model artifact (atomic save, validated load)
//! - [`inference`] - Single-record prediction engine
//! - [`recommend`] - Data-driven agronomy recommendations
//! - [`server`] - HTTP prediction service

pub mod artifact;
pub mod dataset;
pub mod error;
pub mod inference;
pub mod preprocessing;
pub mod recommend;
pub mod schema;
pub mod server;
pub mod training;

pub use error::{AgroError, Result};
