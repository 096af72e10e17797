use super::error::SynthesisError;
use crate::domain::dialogue::DialogueScript;
use crate::infrastructure::repositories::{SpeechError, SpeechRepository};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

/// Outcome of synthesizing the line at `position`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthesisResult {
    pub position: usize,
    pub outcome: Result<Vec<u8>, SpeechError>,
}

/// Fans one speech request per dialogue line out to the speech repository
/// and joins the results back in script order.
///
/// Completion order is irrelevant: results are slotted by position and read
/// back `0..n`. The job fails as a whole if any line fails, but only after
/// every in-flight request has settled.
pub struct SynthesisCoordinator {
    speech: Arc<dyn SpeechRepository>,
}

impl SynthesisCoordinator {
    pub fn new(speech: Arc<dyn SpeechRepository>) -> Self {
        Self { speech }
    }

    /// Synthesize every line of `script`.
    ///
    /// `concurrency_limit` caps in-flight requests; `None` lets every line
    /// run at once. On success the results are in position order.
    pub async fn synthesize(
        &self,
        script: &DialogueScript,
        concurrency_limit: Option<usize>,
    ) -> Result<Vec<SynthesisResult>, SynthesisError> {
        let start_time = std::time::Instant::now();
        let total_lines = script.len();
        let permits = concurrency_limit
            .unwrap_or(total_lines)
            .clamp(1, total_lines.max(1));

        tracing::info!(
            provider = self.speech.provider(),
            line_count = total_lines,
            concurrency = permits,
            "Starting dialogue synthesis"
        );

        let semaphore = Arc::new(Semaphore::new(permits));
        let mut tasks = JoinSet::new();

        for line in script.lines() {
            let speech = self.speech.clone();
            let semaphore = semaphore.clone();
            let position = line.position;
            let text = line.text.clone();
            let voice_id = line.voice_id.clone();

            tasks.spawn(async move {
                let outcome = match semaphore.acquire_owned().await {
                    Ok(_permit) => speech.synthesize(&text, &voice_id).await,
                    Err(_) => Err(SpeechError::TaskAborted),
                };
                SynthesisResult { position, outcome }
            });
        }

        let mut slots: Vec<Option<SynthesisResult>> = (0..total_lines).map(|_| None).collect();
        let mut completed = 0usize;

        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(result) => {
                    tracing::debug!(
                        position = result.position,
                        completion_index = completed,
                        succeeded = result.outcome.is_ok(),
                        "Line synthesis settled"
                    );
                    completed += 1;
                    let position = result.position;
                    if let Some(slot) = slots.get_mut(position) {
                        *slot = Some(result);
                    }
                }
                Err(e) => {
                    tracing::error!(error = %e, "Synthesis task did not complete");
                }
            }
        }

        // A task that panicked leaves its slot empty
        let results: Vec<SynthesisResult> = slots
            .into_iter()
            .enumerate()
            .map(|(position, slot)| {
                slot.unwrap_or(SynthesisResult {
                    position,
                    outcome: Err(SpeechError::TaskAborted),
                })
            })
            .collect();

        let failed_lines = results.iter().filter(|r| r.outcome.is_err()).count();
        if let Some(first_failure) = results.iter().find(|r| r.outcome.is_err()) {
            let cause = match &first_failure.outcome {
                Err(cause) => cause.clone(),
                Ok(_) => SpeechError::TaskAborted,
            };

            tracing::error!(
                position = first_failure.position,
                error = %cause,
                failed_lines = failed_lines,
                line_count = total_lines,
                "Dialogue synthesis failed"
            );

            return Err(SynthesisError {
                position: first_failure.position,
                cause,
                failed_lines,
                total_lines,
            });
        }

        let audio_size: usize = results
            .iter()
            .filter_map(|r| r.outcome.as_ref().ok())
            .map(Vec::len)
            .sum();
        tracing::info!(
            provider = self.speech.provider(),
            line_count = total_lines,
            latency_ms = start_time.elapsed().as_millis(),
            audio_size_bytes = audio_size,
            "Dialogue synthesis completed"
        );

        Ok(results)
    }
}
