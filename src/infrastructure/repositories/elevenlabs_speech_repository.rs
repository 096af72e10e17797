use super::speech_repository::{SpeechError, SpeechRepository};
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Serialize;
use std::time::Duration;

const ELEVENLABS_API_BASE: &str = "https://api.elevenlabs.io";
const OUTPUT_FORMAT: &str = "mp3_44100_128";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, Serialize)]
struct TextToSpeechRequest<'a> {
    text: &'a str,
    model_id: &'a str,
}

/// ElevenLabs text-to-speech over plain HTTPS
pub struct ElevenLabsSpeechRepository {
    http: reqwest::Client,
    api_key: String,
    model_id: String,
    base_url: String,
}

impl ElevenLabsSpeechRepository {
    pub fn new(api_key: String, model_id: String) -> Result<Self, reqwest::Error> {
        Self::with_base_url(api_key, model_id, ELEVENLABS_API_BASE.to_string())
    }

    pub fn with_base_url(
        api_key: String,
        model_id: String,
        base_url: String,
    ) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;

        Ok(Self {
            http,
            api_key,
            model_id,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self, voice_id: &str) -> String {
        format!(
            "{}/v1/text-to-speech/{}?output_format={}",
            self.base_url, voice_id, OUTPUT_FORMAT
        )
    }
}

/// Map a non-success ElevenLabs status onto the speech error taxonomy
fn error_for_status(status: StatusCode, body: String) -> SpeechError {
    let detail = format!("status {}: {}", status.as_u16(), body);
    match status {
        StatusCode::TOO_MANY_REQUESTS => SpeechError::RateLimited(detail),
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
            SpeechError::InvalidInput(detail)
        }
        StatusCode::BAD_GATEWAY | StatusCode::SERVICE_UNAVAILABLE | StatusCode::GATEWAY_TIMEOUT => {
            SpeechError::Transport(detail)
        }
        _ => SpeechError::Provider(detail),
    }
}

#[async_trait]
impl SpeechRepository for ElevenLabsSpeechRepository {
    async fn synthesize(&self, text: &str, voice_id: &str) -> Result<Vec<u8>, SpeechError> {
        let start_time = std::time::Instant::now();

        tracing::debug!(
            model = %self.model_id,
            voice = voice_id,
            text_length = text.len(),
            "Calling ElevenLabs text-to-speech"
        );

        let response = self
            .http
            .post(self.endpoint(voice_id))
            .header("xi-api-key", &self.api_key)
            .header(reqwest::header::ACCEPT, "audio/mpeg")
            .json(&TextToSpeechRequest {
                text,
                model_id: &self.model_id,
            })
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, voice = voice_id, "ElevenLabs request failed");
                SpeechError::Transport(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(
                status = status.as_u16(),
                voice = voice_id,
                text_length = text.len(),
                "ElevenLabs returned an error status"
            );
            return Err(error_for_status(status, body));
        }

        let audio_bytes = response
            .bytes()
            .await
            .map_err(|e| SpeechError::Transport(format!("failed to read audio stream: {}", e)))?
            .to_vec();

        tracing::debug!(
            provider = "elevenlabs",
            voice = voice_id,
            latency_ms = start_time.elapsed().as_millis(),
            audio_size_bytes = audio_bytes.len(),
            "ElevenLabs audio received"
        );

        Ok(audio_bytes)
    }

    fn provider(&self) -> &'static str {
        "elevenlabs"
    }
}
