//! Request handlers

use super::error::Result;
use super::state::AppState;
use crate::inference::PredictionResult;
use crate::schema::FeatureRecord;
use axum::extract::State;
use axum::Json;
use serde_json::{json, Value};
use std::sync::Arc;

pub async fn home() -> Json<Value> {
    Json(json!({
        "message": "Crop yield prediction API is running",
    }))
}

pub async fn health(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "model_family": state.engine.model_family().to_string(),
        "cv_score": state.engine.cv_score(),
    }))
}

pub async fn predict(
    State(state): State<Arc<AppState>>,
    Json(record): Json<FeatureRecord>,
) -> Result<Json<PredictionResult>> {
    let result = state.engine.predict_with_recommendations(&record)?;
    tracing::debug!(
        crop = %record.crop_type,
        predicted_yield = result.predicted_yield,
        "served prediction"
    );
    Ok(Json(result))
}
