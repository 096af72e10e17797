use super::artifact_repository::ArtifactRepository;
use crate::domain::artifact::{
    Artifact, ArtifactId, ArtifactMetadata, ReclaimReport, RetentionPolicy, StorageError,
};
use crate::domain::shared::Clock;
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;

const AUDIO_FILE: &str = "audio.mp3";
const TRANSCRIPT_FILE: &str = "transcript.txt";
const METADATA_FILE: &str = "artifact.json";
const STAGING_PREFIX: &str = ".staging-";
const HEALTH_PROBE: &str = ".health-probe";
const AUDIO_CONTENT_TYPE: &str = "audio/mpeg";

/// Artifact store on the local filesystem, one directory per artifact:
///
/// ```text
/// <root>/<uuid>/audio.mp3
/// <root>/<uuid>/transcript.txt
/// <root>/<uuid>/artifact.json
/// ```
///
/// Artifacts are assembled in a staging directory and renamed into place, so
/// a directory named after a UUID is always complete.
pub struct FsArtifactRepository {
    root: PathBuf,
    retention: RetentionPolicy,
    clock: Arc<dyn Clock>,
}

impl FsArtifactRepository {
    pub async fn new(
        root: impl Into<PathBuf>,
        retention: RetentionPolicy,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, StorageError> {
        let root = root.into();
        fs::create_dir_all(&root).await?;

        tracing::info!(
            root = %root.display(),
            retention_hours = retention.window().num_hours(),
            "Artifact store ready"
        );

        Ok(Self {
            root,
            retention,
            clock,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn artifact_dir(&self, id: &ArtifactId) -> PathBuf {
        self.root.join(id.to_string())
    }

    async fn write_staged(
        &self,
        staging: &Path,
        audio: &[u8],
        transcript: &str,
        metadata: &ArtifactMetadata,
    ) -> Result<(), StorageError> {
        fs::create_dir(staging).await?;
        fs::write(staging.join(AUDIO_FILE), audio).await?;
        fs::write(staging.join(TRANSCRIPT_FILE), transcript).await?;
        fs::write(staging.join(METADATA_FILE), serde_json::to_vec_pretty(metadata)?).await?;
        Ok(())
    }

    /// Metadata of a live (non-expired) artifact
    async fn live_metadata(&self, id: &ArtifactId) -> Result<Option<ArtifactMetadata>, StorageError> {
        let Some(metadata) = read_metadata(&self.artifact_dir(id)).await? else {
            return Ok(None);
        };

        if !self.retention.is_retrievable(metadata.created_at, self.clock.now()) {
            tracing::debug!(artifact_id = %id, "Artifact past retention window");
            return Ok(None);
        }

        Ok(Some(metadata))
    }

    /// Age check for a leftover staging directory, based on its mtime
    async fn is_stale_staging(&self, path: &Path, window: Duration) -> Result<bool, std::io::Error> {
        let modified: DateTime<Utc> = fs::metadata(path).await?.modified()?.into();
        Ok(self.clock.now() - modified > window)
    }
}

async fn read_metadata(dir: &Path) -> Result<Option<ArtifactMetadata>, StorageError> {
    match fs::read(dir.join(METADATA_FILE)).await {
        Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

#[async_trait]
impl ArtifactRepository for FsArtifactRepository {
    async fn put(&self, audio: Vec<u8>, transcript: String) -> Result<ArtifactMetadata, StorageError> {
        let id = ArtifactId::new();
        let created_at = self.clock.now();
        let metadata = ArtifactMetadata {
            id,
            created_at,
            expires_at: self.retention.expires_at(created_at),
            audio_size_bytes: audio.len(),
            transcript_length: transcript.len(),
            content_type: AUDIO_CONTENT_TYPE.to_string(),
        };

        let staging = self.root.join(format!("{}{}", STAGING_PREFIX, id));
        let written = match self.write_staged(&staging, &audio, &transcript, &metadata).await {
            Ok(()) => fs::rename(&staging, self.artifact_dir(&id))
                .await
                .map_err(StorageError::from),
            Err(e) => Err(e),
        };

        if let Err(e) = written {
            tracing::error!(artifact_id = %id, error = %e, "Failed to persist artifact");
            if let Err(cleanup) = fs::remove_dir_all(&staging).await {
                if cleanup.kind() != ErrorKind::NotFound {
                    tracing::warn!(path = %staging.display(), error = %cleanup, "Failed to clean staging directory");
                }
            }
            return Err(e);
        }

        tracing::info!(
            artifact_id = %id,
            audio_size_bytes = metadata.audio_size_bytes,
            transcript_length = metadata.transcript_length,
            "Artifact stored"
        );

        Ok(metadata)
    }

    async fn get(&self, id: &ArtifactId) -> Result<Option<Artifact>, StorageError> {
        let Some(metadata) = self.live_metadata(id).await? else {
            return Ok(None);
        };

        let dir = self.artifact_dir(id);
        let audio = match fs::read(dir.join(AUDIO_FILE)).await {
            Ok(audio) => audio,
            // Reclaimed between reading metadata and audio
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let transcript = match fs::read_to_string(dir.join(TRANSCRIPT_FILE)).await {
            Ok(transcript) => transcript,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        Ok(Some(Artifact {
            metadata,
            audio,
            transcript,
        }))
    }

    async fn metadata(&self, id: &ArtifactId) -> Result<Option<ArtifactMetadata>, StorageError> {
        self.live_metadata(id).await
    }

    async fn reclaim(&self, window: Duration) -> ReclaimReport {
        let policy = RetentionPolicy::new(window);
        let now = self.clock.now();
        let mut report = ReclaimReport::default();

        let mut entries = match fs::read_dir(&self.root).await {
            Ok(entries) => entries,
            Err(e) => {
                tracing::error!(root = %self.root.display(), error = %e, "Cannot scan artifact store");
                return report;
            }
        };

        loop {
            let entry = match entries.next_entry().await {
                Ok(Some(entry)) => entry,
                Ok(None) => break,
                Err(e) => {
                    tracing::warn!(error = %e, "Artifact store scan aborted");
                    report.failed += 1;
                    break;
                }
            };

            let path = entry.path();
            let name = entry.file_name().to_string_lossy().into_owned();

            if name.starts_with(STAGING_PREFIX) {
                match self.is_stale_staging(&path, window).await {
                    Ok(true) => {
                        if let Err(e) = fs::remove_dir_all(&path).await {
                            tracing::warn!(path = %path.display(), error = %e, "Failed to remove stale staging directory");
                            report.failed += 1;
                        }
                    }
                    Ok(false) => {}
                    Err(e) => {
                        tracing::warn!(path = %path.display(), error = %e, "Cannot inspect staging directory");
                        report.failed += 1;
                    }
                }
                continue;
            }

            if name.parse::<ArtifactId>().is_err() {
                continue;
            }
            report.scanned += 1;

            let metadata = match read_metadata(&path).await {
                Ok(Some(metadata)) => metadata,
                Ok(None) => {
                    tracing::warn!(path = %path.display(), "Artifact directory without metadata, skipping");
                    report.failed += 1;
                    continue;
                }
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "Unreadable artifact metadata, skipping");
                    report.failed += 1;
                    continue;
                }
            };

            if !policy.is_reclaimable(metadata.created_at, now) {
                continue;
            }

            match fs::remove_dir_all(&path).await {
                Ok(()) => {
                    tracing::info!(
                        artifact_id = %metadata.id,
                        created_at = %metadata.created_at,
                        "Reclaimed expired artifact"
                    );
                    report.removed += 1;
                }
                Err(e) if e.kind() == ErrorKind::NotFound => {}
                Err(e) => {
                    tracing::warn!(artifact_id = %metadata.id, error = %e, "Failed to reclaim artifact");
                    report.failed += 1;
                }
            }
        }

        tracing::info!(
            scanned = report.scanned,
            removed = report.removed,
            failed = report.failed,
            "Artifact reclaim finished"
        );

        report
    }

    async fn count(&self) -> Result<usize, StorageError> {
        let mut entries = fs::read_dir(&self.root).await?;
        let mut count = 0;

        while let Some(entry) = entries.next_entry().await? {
            if entry.file_name().to_string_lossy().parse::<ArtifactId>().is_ok() {
                count += 1;
            }
        }

        Ok(count)
    }

    async fn check_health(&self) -> Result<(), StorageError> {
        let probe = self.root.join(HEALTH_PROBE);
        fs::write(&probe, b"ok").await?;
        fs::remove_file(&probe).await?;
        Ok(())
    }
}
