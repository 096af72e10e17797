use crate::domain::artifact::{Artifact, ArtifactId, ArtifactMetadata, ReclaimReport, StorageError};
use async_trait::async_trait;
use chrono::Duration;

/// Repository owning finished podcast artifacts.
///
/// Entries are written once and only ever deleted whole, so concurrent
/// `put`, `get` and `reclaim` calls need no locking beyond what the backing
/// medium provides.
#[async_trait]
pub trait ArtifactRepository: Send + Sync {
    /// Persist a new artifact under a fresh id
    async fn put(&self, audio: Vec<u8>, transcript: String) -> Result<ArtifactMetadata, StorageError>;

    /// Fetch an artifact. Expired or unknown ids yield `None`.
    async fn get(&self, id: &ArtifactId) -> Result<Option<Artifact>, StorageError>;

    /// Like `get` without loading the audio
    async fn metadata(&self, id: &ArtifactId) -> Result<Option<ArtifactMetadata>, StorageError>;

    /// Delete every artifact older than `window`. Problems with single
    /// entries are logged and counted, never returned.
    async fn reclaim(&self, window: Duration) -> ReclaimReport;

    /// Number of stored artifacts, expired ones included
    async fn count(&self) -> Result<usize, StorageError>;

    /// Verify the backing medium accepts writes
    async fn check_health(&self) -> Result<(), StorageError>;
}
