/// Structural problems with a dialogue script candidate
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("dialogue script has no lines")]
    EmptyScript,
    #[error("line {position} has empty text")]
    EmptyText { position: usize },
    #[error("line {position} uses unknown speaker '{speaker}'")]
    UnknownSpeaker { position: usize, speaker: String },
    #[error("line at index {index} has no position while other lines do")]
    MissingPosition { index: usize },
    #[error("position {position} is out of range for a script of {len} lines")]
    PositionOutOfRange { position: usize, len: usize },
    #[error("position {position} appears more than once")]
    DuplicatePosition { position: usize },
}

/// Failure to obtain a valid script from the dialogue generator
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("source text is empty after cleaning")]
    EmptySource,
    #[error("dialogue generator failed: {0}")]
    Generator(String),
    #[error("no valid dialogue after {attempts} attempts: {last_error}")]
    AttemptsExhausted { attempts: u32, last_error: String },
}
