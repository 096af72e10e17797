use super::error::PodcastServiceError;
use super::PodcastSummary;
use crate::domain::artifact::{Artifact, ArtifactId, ArtifactMetadata};
use crate::domain::dialogue::{generate_validated_script, DialogueScript, DialogueValidator, RawDialogueScript};
use crate::domain::synthesis::{assemble, SynthesisCoordinator};
use crate::infrastructure::repositories::{ArtifactRepository, DialogueRepository, SpeechRepository};
use async_trait::async_trait;
use chrono::Duration;
use std::sync::Arc;

/// Tunables of the podcast pipeline
#[derive(Debug, Clone)]
pub struct PodcastSettings {
    /// `None` synthesizes every line at once
    pub concurrency_limit: Option<usize>,
    pub retention_window: Duration,
    pub dialogue_max_attempts: u32,
    /// Sweep expired artifacts before storing a new one
    pub reclaim_before_put: bool,
}

impl Default for PodcastSettings {
    fn default() -> Self {
        Self {
            concurrency_limit: None,
            retention_window: Duration::hours(24),
            dialogue_max_attempts: 3,
            reclaim_before_put: true,
        }
    }
}

pub struct PodcastService {
    validator: DialogueValidator,
    coordinator: SynthesisCoordinator,
    dialogue_repo: Arc<dyn DialogueRepository>,
    artifact_repo: Arc<dyn ArtifactRepository>,
    settings: PodcastSettings,
}

impl PodcastService {
    pub fn new(
        validator: DialogueValidator,
        speech_repo: Arc<dyn SpeechRepository>,
        dialogue_repo: Arc<dyn DialogueRepository>,
        artifact_repo: Arc<dyn ArtifactRepository>,
        settings: PodcastSettings,
    ) -> Self {
        Self {
            validator,
            coordinator: SynthesisCoordinator::new(speech_repo),
            dialogue_repo,
            artifact_repo,
            settings,
        }
    }
}

#[async_trait]
pub trait PodcastServiceApi: Send + Sync {
    /// Produce a podcast from a caller-supplied dialogue script
    ///
    /// This operation:
    /// - Validates the script before any synthesis call
    /// - Synthesizes every line concurrently
    /// - Assembles audio and transcript in script order
    /// - Stores the artifact
    ///
    /// Nothing is stored unless every line was synthesized.
    async fn create_from_script(
        &self,
        raw: RawDialogueScript,
    ) -> Result<PodcastSummary, PodcastServiceError>;

    /// Produce a podcast from document text, generating the script first
    async fn create_from_text(&self, text: String) -> Result<PodcastSummary, PodcastServiceError>;

    async fn get_artifact(&self, id: &str) -> Result<Artifact, PodcastServiceError>;

    async fn get_metadata(&self, id: &str) -> Result<ArtifactMetadata, PodcastServiceError>;
}

#[async_trait]
impl PodcastServiceApi for PodcastService {
    async fn create_from_script(
        &self,
        raw: RawDialogueScript,
    ) -> Result<PodcastSummary, PodcastServiceError> {
        tracing::info!(line_count = raw.dialogue.len(), "Podcast request from script");

        let script = self.validator.validate(raw).map_err(|e| {
            tracing::warn!(error = %e, "Dialogue script rejected");
            e
        })?;

        self.produce(script).await
    }

    async fn create_from_text(&self, text: String) -> Result<PodcastSummary, PodcastServiceError> {
        tracing::info!(text_length = text.len(), "Podcast request from text");

        let script = generate_validated_script(
            self.dialogue_repo.as_ref(),
            &self.validator,
            &text,
            self.settings.dialogue_max_attempts,
        )
        .await?;

        self.produce(script).await
    }

    async fn get_artifact(&self, id: &str) -> Result<Artifact, PodcastServiceError> {
        let artifact_id = parse_id(id)?;
        self.artifact_repo
            .get(&artifact_id)
            .await?
            .ok_or_else(|| PodcastServiceError::NotFound(id.to_string()))
    }

    async fn get_metadata(&self, id: &str) -> Result<ArtifactMetadata, PodcastServiceError> {
        let artifact_id = parse_id(id)?;
        self.artifact_repo
            .metadata(&artifact_id)
            .await?
            .ok_or_else(|| PodcastServiceError::NotFound(id.to_string()))
    }
}

impl PodcastService {
    /// Synthesize, assemble and store a validated script
    async fn produce(&self, script: DialogueScript) -> Result<PodcastSummary, PodcastServiceError> {
        if let Some(scratchpad) = script.scratchpad() {
            tracing::debug!(scratchpad = scratchpad, "Dialogue planning notes");
        }

        let results = self
            .coordinator
            .synthesize(&script, self.settings.concurrency_limit)
            .await?;

        let podcast = assemble(&script, &results, self.validator.roster())?;
        drop(results);

        if self.settings.reclaim_before_put {
            let report = self.artifact_repo.reclaim(self.settings.retention_window).await;
            tracing::debug!(removed = report.removed, failed = report.failed, "Opportunistic reclaim");
        }

        let transcript = podcast.transcript.clone();
        let metadata = self.artifact_repo.put(podcast.audio, podcast.transcript).await?;

        tracing::info!(
            artifact_id = %metadata.id,
            line_count = script.len(),
            char_count = script.char_count(),
            audio_size_bytes = metadata.audio_size_bytes,
            "Podcast produced"
        );

        Ok(PodcastSummary {
            id: metadata.id,
            created_at: metadata.created_at,
            expires_at: metadata.expires_at,
            line_count: script.len(),
            audio_size_bytes: metadata.audio_size_bytes,
            transcript,
        })
    }
}

fn parse_id(id: &str) -> Result<ArtifactId, PodcastServiceError> {
    id.parse()
        .map_err(|_| PodcastServiceError::NotFound(id.to_string()))
}
