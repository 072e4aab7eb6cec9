//! Application state shared across handlers

use crate::inference::InferenceEngine;

/// Holds the engine built once at startup; handlers only read it.
pub struct AppState {
    pub engine: InferenceEngine,
}

impl AppState {
    pub fn new(engine: InferenceEngine) -> Self {
        Self { engine }
    }
}
