use crate::infrastructure::repositories::SpeechError;

/// Terminal failure of a synthesis job. Reports the lowest failing position.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("synthesis failed at line {position}: {cause} ({failed_lines} of {total_lines} lines failed)")]
pub struct SynthesisError {
    pub position: usize,
    pub cause: SpeechError,
    pub failed_lines: usize,
    pub total_lines: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AssemblyError {
    #[error("no audio segment for line {position}")]
    MissingSegment { position: usize },
    #[error("audio segment for line {position} is a failure")]
    FailedSegment { position: usize },
    #[error("unexpected audio segment for line {position}")]
    UnexpectedSegment { position: usize },
}
