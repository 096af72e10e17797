use super::error::GenerationError;
use super::model::DialogueScript;
use super::source_text::clean_source_text;
use super::validator::DialogueValidator;
use crate::infrastructure::repositories::{DialogueRepository, DialogueRepositoryError};

/// Ask the generator for a script until a candidate passes validation.
///
/// Generation is non-deterministic, so schema violations and malformed
/// responses are retried up to `max_attempts`. An unreachable generator is
/// not retried here.
pub async fn generate_validated_script(
    repo: &dyn DialogueRepository,
    validator: &DialogueValidator,
    source_text: &str,
    max_attempts: u32,
) -> Result<DialogueScript, GenerationError> {
    let cleaned = clean_source_text(source_text);
    if cleaned.is_empty() {
        return Err(GenerationError::EmptySource);
    }

    let max_attempts = max_attempts.max(1);
    let mut last_error = String::new();

    for attempt in 1..=max_attempts {
        tracing::info!(
            attempt = attempt,
            max_attempts = max_attempts,
            source_length = cleaned.len(),
            "Requesting dialogue script"
        );

        let candidate = match repo.generate(&cleaned).await {
            Ok(candidate) => candidate,
            Err(DialogueRepositoryError::Malformed(reason)) => {
                tracing::warn!(attempt = attempt, reason = %reason, "Dialogue generator returned malformed output");
                last_error = reason;
                continue;
            }
            Err(DialogueRepositoryError::Unavailable(reason)) => {
                return Err(GenerationError::Generator(reason));
            }
        };

        match validator.validate(candidate) {
            Ok(script) => {
                tracing::info!(
                    attempt = attempt,
                    line_count = script.len(),
                    "Dialogue script validated"
                );
                return Ok(script);
            }
            Err(e) => {
                tracing::warn!(attempt = attempt, error = %e, "Dialogue script failed validation");
                last_error = e.to_string();
            }
        }
    }

    Err(GenerationError::AttemptsExhausted {
        attempts: max_attempts,
        last_error,
    })
}
