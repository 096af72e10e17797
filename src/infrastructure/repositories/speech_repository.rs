use async_trait::async_trait;

/// Failure of a single speech synthesis call
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SpeechError {
    #[error("rate limited by speech provider: {0}")]
    RateLimited(String),
    #[error("speech provider rejected input: {0}")]
    InvalidInput(String),
    #[error("network error talking to speech provider: {0}")]
    Transport(String),
    #[error("speech provider error: {0}")]
    Provider(String),
    #[error("synthesis task aborted before completing")]
    TaskAborted,
}

impl SpeechError {
    /// Whether repeating the same request may succeed
    pub fn is_transient(&self) -> bool {
        matches!(self, SpeechError::RateLimited(_) | SpeechError::Transport(_))
    }
}

/// Repository for speech synthesis of a single utterance.
/// Abstracts the underlying TTS provider (ElevenLabs, OpenAI, AWS Polly).
///
/// Implementations make exactly one provider call per invocation and never
/// retry on their own; see `RetryingSpeechRepository` for that.
#[async_trait]
pub trait SpeechRepository: Send + Sync {
    /// Synthesize `text` with the provider voice `voice_id`
    ///
    /// Returns constant-bitrate MP3 bytes
    async fn synthesize(&self, text: &str, voice_id: &str) -> Result<Vec<u8>, SpeechError>;

    /// Short provider name for logs
    fn provider(&self) -> &'static str;
}
