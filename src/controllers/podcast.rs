use axum::{
    body::Body,
    extract::{rejection::JsonRejection, Path, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    Json,
};
use std::sync::Arc;

use crate::{
    domain::podcast::{
        CreatePodcastRequest, PodcastMetadataResponse, PodcastService, PodcastServiceApi,
        PodcastSummary,
    },
    error::{AppError, AppResult},
};

/// Largest document accepted for dialogue generation
const MAX_TEXT_LENGTH: usize = 100_000;
/// Largest caller-supplied script
const MAX_SCRIPT_LINES: usize = 500;

pub struct PodcastController {
    podcast_service: Arc<PodcastService>,
}

impl PodcastController {
    pub fn new(podcast_service: Arc<PodcastService>) -> Self {
        Self { podcast_service }
    }

    /// POST /api/podcasts - Produce a podcast from a script or from document text
    pub async fn create(
        State(controller): State<Arc<PodcastController>>,
        payload: Result<Json<CreatePodcastRequest>, JsonRejection>,
    ) -> AppResult<(StatusCode, Json<PodcastSummary>)> {
        let Json(request) = payload?;
        let summary = match (request.script, request.text) {
            (Some(script), None) => {
                if script.dialogue.len() > MAX_SCRIPT_LINES {
                    return Err(AppError::PayloadTooLarge(format!(
                        "Script must have {} lines or fewer",
                        MAX_SCRIPT_LINES
                    )));
                }
                controller.podcast_service.create_from_script(script).await?
            }
            (None, Some(text)) => {
                if text.trim().is_empty() {
                    return Err(AppError::BadRequest("Text cannot be empty".to_string()));
                }
                if text.chars().count() > MAX_TEXT_LENGTH {
                    return Err(AppError::PayloadTooLarge(format!(
                        "Text must be {} characters or less",
                        MAX_TEXT_LENGTH
                    )));
                }
                controller.podcast_service.create_from_text(text).await?
            }
            _ => {
                return Err(AppError::BadRequest(
                    "Provide exactly one of `script` or `text`".to_string(),
                ))
            }
        };

        Ok((StatusCode::CREATED, Json(summary)))
    }

    /// GET /api/podcasts/:id - Artifact metadata
    pub async fn get_metadata(
        State(controller): State<Arc<PodcastController>>,
        Path(id): Path<String>,
    ) -> AppResult<Json<PodcastMetadataResponse>> {
        let metadata = controller.podcast_service.get_metadata(&id).await?;
        Ok(Json(metadata.into()))
    }

    /// GET /api/podcasts/:id/audio - The MP3 stream
    pub async fn get_audio(
        State(controller): State<Arc<PodcastController>>,
        Path(id): Path<String>,
    ) -> AppResult<(StatusCode, HeaderMap, Body)> {
        let artifact = controller.podcast_service.get_artifact(&id).await?;

        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            header_value(&artifact.metadata.content_type)?,
        );
        headers.insert(
            header::CONTENT_DISPOSITION,
            header_value(&format!(
                "inline; filename=\"podcast-{}.mp3\"",
                artifact.metadata.id
            ))?,
        );
        headers.insert(
            "X-Expires-At",
            header_value(&artifact.metadata.expires_at.to_rfc3339())?,
        );

        Ok((StatusCode::OK, headers, Body::from(artifact.audio)))
    }

    /// GET /api/podcasts/:id/transcript - Plain-text transcript
    pub async fn get_transcript(
        State(controller): State<Arc<PodcastController>>,
        Path(id): Path<String>,
    ) -> AppResult<(StatusCode, HeaderMap, String)> {
        let artifact = controller.podcast_service.get_artifact(&id).await?;

        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("text/plain; charset=utf-8"),
        );

        Ok((StatusCode::OK, headers, artifact.transcript))
    }
}

fn header_value(value: &str) -> AppResult<HeaderValue> {
    HeaderValue::from_str(value).map_err(|e| AppError::Internal(e.to_string()))
}
