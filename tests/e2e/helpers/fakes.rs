use async_trait::async_trait;
use podcast_backend::domain::dialogue::{RawDialogueLine, RawDialogueScript};
use podcast_backend::infrastructure::repositories::{
    DialogueRepository, DialogueRepositoryError, SpeechError, SpeechRepository,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Marker that makes the fake provider fail a line
pub const FAIL_MARKER: &str = "FAIL";

/// Speech provider whose earlier calls finish last.
///
/// Audio for a line is `<text>` so ordering is visible in the bytes.
#[derive(Default)]
pub struct FakeSpeechRepository {
    calls: AtomicUsize,
}

impl FakeSpeechRepository {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SpeechRepository for FakeSpeechRepository {
    async fn synthesize(&self, text: &str, _voice_id: &str) -> Result<Vec<u8>, SpeechError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        let delay = 60u64.saturating_sub(call as u64 * 10);
        tokio::time::sleep(Duration::from_millis(delay)).await;

        if text.contains(FAIL_MARKER) {
            return Err(SpeechError::Provider(format!("rejected line: {}", text)));
        }
        Ok(format!("<{}>", text).into_bytes())
    }

    fn provider(&self) -> &'static str {
        "fake"
    }
}

/// Dialogue generator that always writes the same two-line exchange
pub struct FakeDialogueRepository;

#[async_trait]
impl DialogueRepository for FakeDialogueRepository {
    async fn generate(
        &self,
        source_text: &str,
    ) -> Result<RawDialogueScript, DialogueRepositoryError> {
        Ok(RawDialogueScript {
            scratchpad: Some(format!("outline for {} chars", source_text.len())),
            dialogue: vec![
                RawDialogueLine {
                    position: Some(0),
                    speaker: "host".to_string(),
                    text: "Welcome to the show".to_string(),
                },
                RawDialogueLine {
                    position: Some(1),
                    speaker: "guest".to_string(),
                    text: "Glad to be here".to_string(),
                },
            ],
        })
    }
}
