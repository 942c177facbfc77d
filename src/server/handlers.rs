//! HTTP request handlers.

use std::sync::Arc;

use axum::{
    extract::State,
    response::Html,
    Form, Json,
};
use serde::Deserialize;
use tracing::info;

use crate::pipeline::{PredictPipeline, StudentRecord, TrainPipeline};

use super::error::{Result, ServerError};
use super::state::AppState;

/// Serve the prediction form.
pub async fn serve_index() -> Html<&'static str> {
    Html(include_str!("../../templates/index.html"))
}

/// Form body for a prediction request, one field per raw attribute.
#[derive(Debug, Deserialize)]
pub struct PredictForm {
    gender: String,
    race_ethnicity: String,
    parental_level_of_education: String,
    lunch: String,
    test_preparation_course: String,
    reading_score: f64,
    writing_score: f64,
}

impl From<PredictForm> for StudentRecord {
    fn from(form: PredictForm) -> Self {
        Self {
            gender: form.gender,
            race_ethnicity: form.race_ethnicity,
            parental_level_of_education: form.parental_level_of_education,
            lunch: form.lunch,
            test_preparation_course: form.test_preparation_course,
            reading_score: form.reading_score,
            writing_score: form.writing_score,
        }
    }
}

/// Predict the math score for one submitted record.
pub async fn predict(
    State(state): State<Arc<AppState>>,
    Form(form): Form<PredictForm>,
) -> Result<Json<serde_json::Value>> {
    let record = StudentRecord::from(form);
    let pipeline = PredictPipeline::new(state.pipeline.clone());
    let prediction = pipeline.predict(&record)?;

    let score = (prediction * 100.0).round() / 100.0;
    info!(score, "prediction served");

    Ok(Json(serde_json::json!({
        "success": true,
        "predicted_math_score": score,
        "message": format!("Predicted Math Score: {score:.2}"),
    })))
}

/// Re-run the train pipeline and report the winning score.
pub async fn train(State(state): State<Arc<AppState>>) -> Result<Json<serde_json::Value>> {
    let config = state.pipeline.clone();
    let report = tokio::task::spawn_blocking(move || TrainPipeline::new(config).run())
        .await
        .map_err(|e| ServerError::Internal(format!("training task failed: {e}")))??;

    let r2 = (report.r2 * 10_000.0).round() / 10_000.0;
    info!(model = %report.best_model, r2, "retraining finished");

    Ok(Json(serde_json::json!({
        "success": true,
        "r2_score": r2,
        "model": report.best_model,
        "message": format!("Model trained successfully! R² Score: {r2:.4}"),
    })))
}

/// Liveness plus artifact presence.
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "artifacts_ready": state.pipeline.artifacts_ready(),
        "uptime_secs": state.uptime_secs(),
        "memory_usage_percent": state.memory_usage_percent(),
    }))
}
