use super::speech_repository::{SpeechError, SpeechRepository};
use async_trait::async_trait;
use moka::future::Cache;
use std::sync::Arc;
use std::time::Duration;

/// Memoizes successful syntheses keyed by voice and text
pub struct CachingSpeechRepository {
    inner: Arc<dyn SpeechRepository>,
    cache: Cache<(String, String), Arc<Vec<u8>>>,
}

impl CachingSpeechRepository {
    pub fn new(inner: Arc<dyn SpeechRepository>, max_capacity: u64) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_capacity)
            .time_to_idle(Duration::from_secs(30 * 60)) // 30 minutes, refreshes on access
            .build();

        Self { inner, cache }
    }
}

#[async_trait]
impl SpeechRepository for CachingSpeechRepository {
    async fn synthesize(&self, text: &str, voice_id: &str) -> Result<Vec<u8>, SpeechError> {
        let key = (voice_id.to_string(), text.to_string());

        if let Some(cached) = self.cache.get(&key).await {
            tracing::debug!(
                voice = voice_id,
                audio_size_bytes = cached.len(),
                "Speech cache hit"
            );
            return Ok(cached.as_ref().clone());
        }

        let audio = self.inner.synthesize(text, voice_id).await?;
        self.cache.insert(key, Arc::new(audio.clone())).await;

        Ok(audio)
    }

    fn provider(&self) -> &'static str {
        self.inner.provider()
    }
}
