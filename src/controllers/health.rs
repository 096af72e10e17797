use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use std::sync::Arc;

use crate::infrastructure::repositories::ArtifactRepository;

/// Shared state of the readiness probe
#[derive(Clone)]
pub struct HealthState {
    pub artifact_repo: Arc<dyn ArtifactRepository>,
    pub tts_provider: &'static str,
}

pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

pub async fn health_ready(State(state): State<HealthState>) -> impl IntoResponse {
    match state.artifact_repo.check_health().await {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({
                "status": "ready",
                "storage": "writable",
                "tts": state.tts_provider
            })),
        ),
        Err(e) => {
            tracing::error!(error = %e, "Artifact storage is not writable");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "not_ready",
                    "storage": "unwritable",
                    "tts": state.tts_provider
                })),
            )
        }
    }
}
