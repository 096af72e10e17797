use crate::domain::artifact::StorageError;
use crate::domain::dialogue::{GenerationError, ValidationError};
use crate::domain::synthesis::{AssemblyError, SynthesisError};
use crate::error::AppError;

#[derive(Debug, thiserror::Error)]
pub enum PodcastServiceError {
    #[error("invalid dialogue script: {0}")]
    Invalid(#[from] ValidationError),
    #[error(transparent)]
    Generation(#[from] GenerationError),
    #[error(transparent)]
    Synthesis(#[from] SynthesisError),
    #[error("assembly failed: {0}")]
    Assembly(#[from] AssemblyError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("podcast not found: {0}")]
    NotFound(String),
}

impl From<PodcastServiceError> for AppError {
    fn from(err: PodcastServiceError) -> Self {
        match err {
            PodcastServiceError::Invalid(e) => AppError::UnprocessableEntity(e.to_string()),
            PodcastServiceError::Generation(GenerationError::EmptySource) => {
                AppError::BadRequest(GenerationError::EmptySource.to_string())
            }
            PodcastServiceError::Generation(e) => AppError::ExternalService(e.to_string()),
            PodcastServiceError::Synthesis(e) => AppError::ExternalService(e.to_string()),
            PodcastServiceError::Assembly(e) => AppError::Internal(e.to_string()),
            PodcastServiceError::Storage(e) => AppError::Storage(e.to_string()),
            PodcastServiceError::NotFound(id) => AppError::NotFound(format!("podcast {}", id)),
        }
    }
}
