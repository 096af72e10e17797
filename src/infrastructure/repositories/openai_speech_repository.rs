use super::speech_repository::{SpeechError, SpeechRepository};
use async_openai::{
    config::OpenAIConfig,
    error::OpenAIError,
    types::{CreateSpeechRequest, SpeechModel, Voice},
    Client,
};
use async_trait::async_trait;
use std::sync::Arc;

/// OpenAI has a limit of 4096 characters per request
const MAX_INPUT_LENGTH: usize = 4096;

/// OpenAI TTS implementation of the speech repository
pub struct OpenAiSpeechRepository {
    client: Arc<Client<OpenAIConfig>>,
    model: String,
}

impl OpenAiSpeechRepository {
    pub fn new(client: Arc<Client<OpenAIConfig>>, model: String) -> Self {
        Self { client, model }
    }

    fn speech_model(&self) -> SpeechModel {
        match self.model.as_str() {
            "tts-1" => SpeechModel::Tts1,
            "tts-1-hd" => SpeechModel::Tts1Hd,
            other => SpeechModel::Other(other.to_string()),
        }
    }
}

fn parse_voice(voice_id: &str) -> Result<Voice, SpeechError> {
    match voice_id.to_lowercase().as_str() {
        "alloy" => Ok(Voice::Alloy),
        "echo" => Ok(Voice::Echo),
        "fable" => Ok(Voice::Fable),
        "onyx" => Ok(Voice::Onyx),
        "nova" => Ok(Voice::Nova),
        "shimmer" => Ok(Voice::Shimmer),
        other => Err(SpeechError::InvalidInput(format!(
            "unknown OpenAI voice '{}'",
            other
        ))),
    }
}

fn map_openai_error(err: OpenAIError) -> SpeechError {
    match err {
        OpenAIError::Reqwest(e) => SpeechError::Transport(e.to_string()),
        OpenAIError::ApiError(api) if api.message.to_lowercase().contains("rate limit") => {
            SpeechError::RateLimited(api.message)
        }
        OpenAIError::InvalidArgument(msg) => SpeechError::InvalidInput(msg),
        other => SpeechError::Provider(other.to_string()),
    }
}

#[async_trait]
impl SpeechRepository for OpenAiSpeechRepository {
    async fn synthesize(&self, text: &str, voice_id: &str) -> Result<Vec<u8>, SpeechError> {
        let char_count = text.chars().count();
        if char_count > MAX_INPUT_LENGTH {
            return Err(SpeechError::InvalidInput(format!(
                "line is {} characters, OpenAI accepts at most {}",
                char_count,
                MAX_INPUT_LENGTH
            )));
        }

        let start_time = std::time::Instant::now();
        let voice = parse_voice(voice_id)?;

        tracing::debug!(
            model = %self.model,
            voice = voice_id,
            text_length = text.len(),
            "Calling OpenAI TTS API"
        );

        let request = CreateSpeechRequest {
            model: self.speech_model(),
            input: text.to_string(),
            voice,
            response_format: None, // Defaults to MP3
            speed: None,
        };

        let response = self.client.audio().speech(request).await.map_err(|e| {
            tracing::error!(
                error = %e,
                model = %self.model,
                voice = voice_id,
                text_length = text.len(),
                "OpenAI TTS API call failed"
            );
            map_openai_error(e)
        })?;

        let audio_bytes = response.bytes.to_vec();
        tracing::debug!(
            provider = "openai",
            voice = voice_id,
            latency_ms = start_time.elapsed().as_millis(),
            audio_size_bytes = audio_bytes.len(),
            "OpenAI TTS audio received"
        );

        Ok(audio_bytes)
    }

    fn provider(&self) -> &'static str {
        "openai"
    }
}
