//! HTTP error mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::error::PipelineError;

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("invalid request: {0}")]
    BadRequest(String),

    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    #[error("internal error: {0}")]
    Internal(String),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ServerError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ServerError::Pipeline(e) => match e {
                // "Train first" is a service state, not a caller mistake.
                PipelineError::ArtifactMissing { .. } => {
                    (StatusCode::SERVICE_UNAVAILABLE, e.to_string())
                }
                PipelineError::Transform(_) | PipelineError::ColumnNotFound(_) => {
                    (StatusCode::BAD_REQUEST, e.to_string())
                }
                _ => {
                    tracing::error!(error = %e, "pipeline error");
                    (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
                }
            },
            ServerError::Internal(msg) => {
                tracing::error!(detail = %msg, "internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "an internal error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "success": false,
            "error": message,
        }));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, ServerError>;
