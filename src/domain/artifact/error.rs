#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("artifact storage I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("artifact metadata is unreadable: {0}")]
    Serialization(#[from] serde_json::Error),
}
