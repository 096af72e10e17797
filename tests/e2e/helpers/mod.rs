use chrono::Utc;
use podcast_backend::controllers::{health::HealthState, podcast::PodcastController};
use podcast_backend::domain::artifact::RetentionPolicy;
use podcast_backend::domain::dialogue::{DialogueValidator, VoiceProfile, VoiceRoster};
use podcast_backend::domain::podcast::{PodcastService, PodcastSettings};
use podcast_backend::domain::shared::ManualClock;
use podcast_backend::infrastructure::http::build_router;
use podcast_backend::infrastructure::repositories::{ArtifactRepository, FsArtifactRepository};
use std::sync::Arc;
use tempfile::TempDir;
use test_context::AsyncTestContext;
use tokio::net::TcpListener;

pub mod api_client;
pub mod assertions;
pub mod fakes;

use api_client::TestClient;
use fakes::{FakeDialogueRepository, FakeSpeechRepository};

pub const HOST_LABEL: &str = "Host";
pub const GUEST_LABEL: &str = "Guest";

pub struct TestContext {
    pub client: TestClient,
    pub clock: Arc<ManualClock>,
    pub speech: Arc<FakeSpeechRepository>,
    pub artifact_repo: Arc<dyn ArtifactRepository>,
    _artifact_dir: TempDir,
}

impl AsyncTestContext for TestContext {
    fn setup() -> impl std::future::Future<Output = Self> + Send {
        async {
            let artifact_dir = TempDir::new().expect("Failed to create artifact dir");
            let clock = Arc::new(ManualClock::new(Utc::now()));
            let speech = Arc::new(FakeSpeechRepository::default());
            let settings = PodcastSettings::default();

            let artifact_repo: Arc<dyn ArtifactRepository> = Arc::new(
                FsArtifactRepository::new(
                    artifact_dir.path().to_path_buf(),
                    RetentionPolicy::new(settings.retention_window),
                    clock.clone(),
                )
                .await
                .expect("Failed to open artifact store"),
            );

            let roster = VoiceRoster::new(
                VoiceProfile::new(HOST_LABEL, "voice-host"),
                VoiceProfile::new(GUEST_LABEL, "voice-guest"),
            );
            let podcast_service = Arc::new(PodcastService::new(
                DialogueValidator::new(Arc::new(roster)),
                speech.clone(),
                Arc::new(FakeDialogueRepository),
                artifact_repo.clone(),
                settings,
            ));

            let app = build_router(
                HealthState {
                    artifact_repo: artifact_repo.clone(),
                    tts_provider: "fake",
                },
                Arc::new(PodcastController::new(podcast_service)),
            );

            // Start server
            let listener = TcpListener::bind("127.0.0.1:0")
                .await
                .expect("Failed to bind listener");
            let addr = listener.local_addr().expect("Failed to get local addr");
            let base_url = format!("http://{}", addr);

            tokio::spawn(async move {
                axum::serve(listener, app).await.unwrap();
            });

            // Wait for server to be ready
            tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;

            Self {
                client: TestClient::new(&base_url),
                clock,
                speech,
                artifact_repo,
                _artifact_dir: artifact_dir,
            }
        }
    }

    fn teardown(self) -> impl std::future::Future<Output = ()> + Send {
        async {
            // Artifact directory is removed when the TempDir drops
        }
    }
}
