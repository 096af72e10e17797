use crate::domain::dialogue::{default_voice_ids, VoiceProfile, VoiceRoster};
use serde::Deserialize;
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub environment: Environment,
    pub log_format: LogFormat,
    // Speech synthesis
    pub tts_provider: TtsProvider,
    pub elevenlabs_api_key: Option<String>,
    pub elevenlabs_model: String,
    pub openai_tts_model: String,
    pub aws_region: String,
    pub synthesis_concurrency: Option<usize>,
    pub synthesis_max_retries: u32,
    pub tts_cache_enabled: bool,
    // Voices
    pub host_voice_id: String,
    pub guest_voice_id: String,
    pub host_label: String,
    pub guest_label: String,
    // Dialogue generation
    pub dialogue_model: String,
    pub dialogue_max_attempts: u32,
    // Artifact store
    pub artifact_dir: PathBuf,
    pub artifact_retention_hours: i64,
    pub reclaim_interval_secs: u64,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    Production,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum TtsProvider {
    ElevenLabs,
    OpenAi,
    Polly,
}

impl TtsProvider {
    pub fn as_str(&self) -> &'static str {
        match self {
            TtsProvider::ElevenLabs => "elevenlabs",
            TtsProvider::OpenAi => "openai",
            TtsProvider::Polly => "polly",
        }
    }
}

impl std::str::FromStr for TtsProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "elevenlabs" => Ok(TtsProvider::ElevenLabs),
            "openai" => Ok(TtsProvider::OpenAi),
            "polly" => Ok(TtsProvider::Polly),
            other => Err(format!("unknown TTS_PROVIDER '{}'", other)),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        dotenvy::dotenv().ok();

        let tts_provider: TtsProvider = env::var("TTS_PROVIDER")
            .unwrap_or_else(|_| "elevenlabs".to_string())
            .parse()?;
        let (default_host_voice, default_guest_voice) = default_voice_ids(tts_provider.as_str());

        let config = Config {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()?,
            environment: env::var("ENVIRONMENT")
                .unwrap_or_else(|_| "development".to_string())
                .parse::<String>()
                .map(|s| match s.as_str() {
                    "production" => Environment::Production,
                    _ => Environment::Development,
                })?,
            log_format: env::var("LOG_FORMAT")
                .unwrap_or_else(|_| "pretty".to_string())
                .parse::<String>()
                .map(|s| match s.as_str() {
                    "json" => LogFormat::Json,
                    _ => LogFormat::Pretty,
                })?,
            tts_provider,
            elevenlabs_api_key: env::var("ELEVENLABS_API_KEY").ok(),
            elevenlabs_model: env::var("ELEVENLABS_MODEL")
                .unwrap_or_else(|_| "eleven_monolingual_v1".to_string()),
            openai_tts_model: env::var("OPENAI_TTS_MODEL").unwrap_or_else(|_| "tts-1".to_string()),
            aws_region: env::var("AWS_REGION").unwrap_or_else(|_| "eu-west-1".to_string()),
            synthesis_concurrency: match env::var("SYNTHESIS_CONCURRENCY") {
                Ok(value) if !value.trim().is_empty() => Some(value.trim().parse()?),
                _ => None,
            },
            synthesis_max_retries: env::var("SYNTHESIS_MAX_RETRIES")
                .unwrap_or_else(|_| "2".to_string())
                .parse()?,
            tts_cache_enabled: env::var("TTS_CACHE_ENABLED")
                .unwrap_or_else(|_| "false".to_string())
                .parse::<String>()
                .map(|s| s.to_lowercase() == "true")
                .unwrap_or(false),
            host_voice_id: env::var("HOST_VOICE_ID")
                .unwrap_or_else(|_| default_host_voice.to_string()),
            guest_voice_id: env::var("GUEST_VOICE_ID")
                .unwrap_or_else(|_| default_guest_voice.to_string()),
            host_label: env::var("HOST_LABEL").unwrap_or_else(|_| "Host".to_string()),
            guest_label: env::var("GUEST_LABEL").unwrap_or_else(|_| "Guest".to_string()),
            dialogue_model: env::var("DIALOGUE_MODEL").unwrap_or_else(|_| "gpt-4o-mini".to_string()),
            dialogue_max_attempts: env::var("DIALOGUE_MAX_ATTEMPTS")
                .unwrap_or_else(|_| "3".to_string())
                .parse()?,
            artifact_dir: env::var("ARTIFACT_DIR")
                .unwrap_or_else(|_| "./artifacts".to_string())
                .into(),
            artifact_retention_hours: env::var("ARTIFACT_RETENTION_HOURS")
                .unwrap_or_else(|_| "24".to_string())
                .parse()?,
            reclaim_interval_secs: env::var("RECLAIM_INTERVAL_SECS")
                .unwrap_or_else(|_| "900".to_string())
                .parse()?,
        };

        if config.tts_provider == TtsProvider::ElevenLabs && config.elevenlabs_api_key.is_none() {
            return Err("ELEVENLABS_API_KEY is required when TTS_PROVIDER=elevenlabs".into());
        }

        Ok(config)
    }

    pub fn is_development(&self) -> bool {
        self.environment == Environment::Development
    }

    pub fn voice_roster(&self) -> VoiceRoster {
        VoiceRoster::new(
            VoiceProfile::new(&self.host_label, &self.host_voice_id),
            VoiceProfile::new(&self.guest_label, &self.guest_voice_id),
        )
    }

    pub fn retention_window(&self) -> chrono::Duration {
        chrono::Duration::hours(self.artifact_retention_hours)
    }
}
