pub mod error;
pub mod service;

pub use error::PodcastServiceError;
pub use service::{PodcastService, PodcastServiceApi, PodcastSettings};

use crate::domain::artifact::{ArtifactId, ArtifactMetadata};
use crate::domain::dialogue::RawDialogueScript;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Request for POST /api/podcasts. Exactly one of the fields is expected.
#[derive(Debug, Serialize, Deserialize)]
pub struct CreatePodcastRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub script: Option<RawDialogueScript>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

/// What a caller learns about a freshly produced podcast
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PodcastSummary {
    pub id: ArtifactId,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub line_count: usize,
    pub audio_size_bytes: usize,
    pub transcript: String,
}

/// Response for GET /api/podcasts/:id
#[derive(Debug, Serialize, Deserialize)]
pub struct PodcastMetadataResponse {
    pub id: ArtifactId,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub audio_size_bytes: usize,
    pub content_type: String,
    pub audio_url: String,
    pub transcript_url: String,
}

impl From<ArtifactMetadata> for PodcastMetadataResponse {
    fn from(metadata: ArtifactMetadata) -> Self {
        Self {
            audio_url: format!("/api/podcasts/{}/audio", metadata.id),
            transcript_url: format!("/api/podcasts/{}/transcript", metadata.id),
            id: metadata.id,
            created_at: metadata.created_at,
            expires_at: metadata.expires_at,
            audio_size_bytes: metadata.audio_size_bytes,
            content_type: metadata.content_type,
        }
    }
}
