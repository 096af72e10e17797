use super::speech_repository::{SpeechError, SpeechRepository};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

/// Bounded retry with exponential backoff around another speech repository.
///
/// Only transient failures (rate limits, network faults) are retried. The
/// delay before retry `n` (zero-based) is `base_delay * 2^n`.
pub struct RetryingSpeechRepository {
    inner: Arc<dyn SpeechRepository>,
    max_retries: u32,
    base_delay: Duration,
}

impl RetryingSpeechRepository {
    pub fn new(inner: Arc<dyn SpeechRepository>, max_retries: u32, base_delay: Duration) -> Self {
        Self {
            inner,
            max_retries,
            base_delay,
        }
    }
}

#[async_trait]
impl SpeechRepository for RetryingSpeechRepository {
    async fn synthesize(&self, text: &str, voice_id: &str) -> Result<Vec<u8>, SpeechError> {
        let mut retries = 0;

        loop {
            match self.inner.synthesize(text, voice_id).await {
                Ok(audio) => return Ok(audio),
                Err(e) if e.is_transient() && retries < self.max_retries => {
                    let delay = self.base_delay * 2u32.saturating_pow(retries);
                    tracing::warn!(
                        provider = self.inner.provider(),
                        error = %e,
                        retry = retries + 1,
                        max_retries = self.max_retries,
                        delay_ms = delay.as_millis(),
                        "Transient speech synthesis failure, backing off"
                    );
                    tokio::time::sleep(delay).await;
                    retries += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }

    fn provider(&self) -> &'static str {
        self.inner.provider()
    }
}
