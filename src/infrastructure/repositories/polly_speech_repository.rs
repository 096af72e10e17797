use super::speech_repository::{SpeechError, SpeechRepository};
use async_trait::async_trait;
use aws_sdk_polly::{
    error::{ProvideErrorMetadata, SdkError},
    types::{Engine, OutputFormat, VoiceId},
    Client as PollyClient,
};
use std::sync::Arc;

/// AWS Polly has a limit of 3000 characters per request
const MAX_INPUT_LENGTH: usize = 3000;

/// AWS Polly implementation of the speech repository
pub struct PollySpeechRepository {
    polly_client: Arc<PollyClient>,
}

impl PollySpeechRepository {
    pub fn new(polly_client: Arc<PollyClient>) -> Self {
        Self { polly_client }
    }
}

fn map_polly_error<E, R>(err: SdkError<E, R>) -> SpeechError
where
    E: ProvideErrorMetadata + std::fmt::Debug,
    R: std::fmt::Debug,
{
    if matches!(err, SdkError::TimeoutError(_) | SdkError::DispatchFailure(_)) {
        return SpeechError::Transport(format!("{:?}", err));
    }

    match err.code() {
        Some("ThrottlingException") => SpeechError::RateLimited(format!("{:?}", err)),
        Some("TextLengthExceededException")
        | Some("InvalidSsmlException")
        | Some("LanguageNotSupportedException") => SpeechError::InvalidInput(format!("{:?}", err)),
        _ => SpeechError::Provider(format!("{:?}", err)),
    }
}

#[async_trait]
impl SpeechRepository for PollySpeechRepository {
    async fn synthesize(&self, text: &str, voice_id: &str) -> Result<Vec<u8>, SpeechError> {
        let char_count = text.chars().count();
        if char_count > MAX_INPUT_LENGTH {
            return Err(SpeechError::InvalidInput(format!(
                "line is {} characters, Polly accepts at most {}",
                char_count,
                MAX_INPUT_LENGTH
            )));
        }

        let start_time = std::time::Instant::now();

        tracing::debug!(
            voice = voice_id,
            engine = "neural",
            output_format = "Mp3",
            text_length = text.len(),
            "Calling AWS Polly synthesize_speech"
        );

        let result = self
            .polly_client
            .synthesize_speech()
            .text(text)
            .voice_id(VoiceId::from(voice_id))
            .output_format(OutputFormat::Mp3)
            .engine(Engine::Neural)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(
                    error = %e,
                    voice = voice_id,
                    text_length = text.len(),
                    "AWS Polly synthesize_speech failed"
                );
                map_polly_error(e)
            })?;

        let audio_stream = result.audio_stream.collect().await.map_err(|e| {
            tracing::error!(error = %e, "Failed to collect audio stream from Polly response");
            SpeechError::Transport(format!("failed to read audio stream: {}", e))
        })?;

        let audio_bytes = audio_stream.into_bytes().to_vec();
        tracing::debug!(
            provider = "polly",
            voice = voice_id,
            latency_ms = start_time.elapsed().as_millis(),
            audio_size_bytes = audio_bytes.len(),
            "AWS Polly audio received"
        );

        Ok(audio_bytes)
    }

    fn provider(&self) -> &'static str {
        "polly"
    }
}
