pub mod error;
pub mod model;
pub mod retention;

pub use error::StorageError;
pub use model::{Artifact, ArtifactId, ArtifactMetadata, ReclaimReport};
pub use retention::RetentionPolicy;
