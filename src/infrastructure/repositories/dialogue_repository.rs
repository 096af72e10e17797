use crate::domain::dialogue::RawDialogueScript;
use async_trait::async_trait;

#[derive(Debug, thiserror::Error)]
pub enum DialogueRepositoryError {
    /// The generator could not be reached or refused the request
    #[error("dialogue generator unavailable: {0}")]
    Unavailable(String),
    /// The generator answered with something that is not a script
    #[error("malformed dialogue response: {0}")]
    Malformed(String),
}

/// Repository for turning source text into a dialogue script candidate.
///
/// Candidates are unvalidated; callers run them through `DialogueValidator`.
#[async_trait]
pub trait DialogueRepository: Send + Sync {
    async fn generate(&self, source_text: &str) -> Result<RawDialogueScript, DialogueRepositoryError>;
}
