use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use podcast_backend::controllers::{health::HealthState, podcast::PodcastController};
use podcast_backend::domain::artifact::RetentionPolicy;
use podcast_backend::domain::dialogue::DialogueValidator;
use podcast_backend::domain::podcast::{PodcastService, PodcastSettings};
use podcast_backend::domain::shared::SystemClock;
use podcast_backend::infrastructure::config::{Config, LogFormat, TtsProvider};
use podcast_backend::infrastructure::http::{build_router, start_http_server};
use podcast_backend::infrastructure::reclaim::spawn_reclaim_task;
use podcast_backend::infrastructure::repositories::{
    ArtifactRepository, CachingSpeechRepository, ElevenLabsSpeechRepository,
    FsArtifactRepository, OpenAiDialogueRepository, OpenAiSpeechRepository,
    PollySpeechRepository, RetryingSpeechRepository, SpeechRepository,
};

/// Backoff before the first retry of a transient synthesis failure
const SYNTHESIS_RETRY_BASE_DELAY: Duration = Duration::from_millis(500);
const SPEECH_CACHE_CAPACITY: u64 = 1000;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    init_logging(&config);

    tracing::info!(
        "Starting Podcast Backend on {}:{}",
        config.host,
        config.port
    );

    // Shared OpenAI client (reads OPENAI_API_KEY)
    let openai_client = Arc::new(async_openai::Client::new());

    // === DEPENDENCY INJECTION SETUP ===
    // 1. Speech provider, wrapped with retry and optional cache
    let provider: Arc<dyn SpeechRepository> = match config.tts_provider {
        TtsProvider::ElevenLabs => Arc::new(ElevenLabsSpeechRepository::new(
            config.elevenlabs_api_key.clone().unwrap_or_default(),
            config.elevenlabs_model.clone(),
        )?),
        TtsProvider::OpenAi => Arc::new(OpenAiSpeechRepository::new(
            openai_client.clone(),
            config.openai_tts_model.clone(),
        )),
        TtsProvider::Polly => {
            tracing::info!("Initializing AWS Polly client with region: {}", config.aws_region);
            let aws_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
                .region(aws_config::Region::new(config.aws_region.clone()))
                .load()
                .await;
            Arc::new(PollySpeechRepository::new(Arc::new(aws_sdk_polly::Client::new(
                &aws_config,
            ))))
        }
    };
    tracing::info!(provider = provider.provider(), "Speech provider initialized");

    let mut speech_repo: Arc<dyn SpeechRepository> = Arc::new(RetryingSpeechRepository::new(
        provider,
        config.synthesis_max_retries,
        SYNTHESIS_RETRY_BASE_DELAY,
    ));
    if config.tts_cache_enabled {
        tracing::info!("Speech cache enabled");
        speech_repo = Arc::new(CachingSpeechRepository::new(speech_repo, SPEECH_CACHE_CAPACITY));
    }

    // 2. Dialogue generator and artifact store
    let dialogue_repo = Arc::new(OpenAiDialogueRepository::new(
        openai_client,
        config.dialogue_model.clone(),
    ));
    let artifact_repo: Arc<dyn ArtifactRepository> = Arc::new(
        FsArtifactRepository::new(
            config.artifact_dir.clone(),
            RetentionPolicy::new(config.retention_window()),
            Arc::new(SystemClock),
        )
        .await?,
    );

    // 3. Services
    let podcast_service = Arc::new(PodcastService::new(
        DialogueValidator::new(Arc::new(config.voice_roster())),
        speech_repo,
        dialogue_repo,
        artifact_repo.clone(),
        PodcastSettings {
            concurrency_limit: config.synthesis_concurrency,
            retention_window: config.retention_window(),
            dialogue_max_attempts: config.dialogue_max_attempts,
            reclaim_before_put: true,
        },
    ));

    // 4. Controllers
    let podcast_controller = Arc::new(PodcastController::new(podcast_service));
    let health_state = HealthState {
        artifact_repo: artifact_repo.clone(),
        tts_provider: config.tts_provider.as_str(),
    };

    // Background retention sweep
    let _reclaim_task = spawn_reclaim_task(
        artifact_repo,
        config.retention_window(),
        Duration::from_secs(config.reclaim_interval_secs),
    );

    let config = Arc::new(config);
    start_http_server(config, build_router(health_state, podcast_controller)).await?;

    Ok(())
}

fn init_logging(config: &Config) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "podcast_backend=debug,tower_http=debug".into());

    if config.log_format == LogFormat::Json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}
