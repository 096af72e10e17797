use super::dialogue_repository::{DialogueRepository, DialogueRepositoryError};
use crate::domain::dialogue::RawDialogueScript;
use async_openai::{
    config::OpenAIConfig,
    error::OpenAIError,
    types::{
        ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequestArgs, ResponseFormat,
    },
    Client,
};
use async_trait::async_trait;
use std::sync::Arc;

const SYSTEM_PROMPT: &str = r#"You turn documents into engaging two-person podcast conversations.
The host introduces the topic and asks questions; the guest is the expert who explains the material.
Use a scratchpad to plan the episode before writing it.
Answer with a single JSON object of the form:
{"scratchpad": "<your planning notes>", "dialogue": [{"speaker": "host", "text": "..."}, {"speaker": "guest", "text": "..."}]}
"speaker" must be either "host" or "guest". Every "text" must be non-empty spoken prose without stage directions."#;

/// Dialogue generation through an OpenAI chat model in JSON mode
pub struct OpenAiDialogueRepository {
    client: Arc<Client<OpenAIConfig>>,
    model: String,
}

impl OpenAiDialogueRepository {
    pub fn new(client: Arc<Client<OpenAIConfig>>, model: String) -> Self {
        Self { client, model }
    }
}

fn map_openai_error(err: OpenAIError) -> DialogueRepositoryError {
    match err {
        OpenAIError::JSONDeserialize(e) => DialogueRepositoryError::Malformed(e.to_string()),
        other => DialogueRepositoryError::Unavailable(other.to_string()),
    }
}

/// Parse the model's message content into a script candidate
fn parse_script(content: &str) -> Result<RawDialogueScript, DialogueRepositoryError> {
    serde_json::from_str(content).map_err(|e| DialogueRepositoryError::Malformed(e.to_string()))
}

#[async_trait]
impl DialogueRepository for OpenAiDialogueRepository {
    async fn generate(&self, source_text: &str) -> Result<RawDialogueScript, DialogueRepositoryError> {
        let start_time = std::time::Instant::now();

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .response_format(ResponseFormat::JsonObject)
            .messages([
                ChatCompletionRequestSystemMessageArgs::default()
                    .content(SYSTEM_PROMPT)
                    .build()
                    .map_err(map_openai_error)?
                    .into(),
                ChatCompletionRequestUserMessageArgs::default()
                    .content(source_text)
                    .build()
                    .map_err(map_openai_error)?
                    .into(),
            ])
            .build()
            .map_err(map_openai_error)?;

        let response = self.client.chat().create(request).await.map_err(|e| {
            tracing::error!(error = %e, model = %self.model, "Dialogue generation call failed");
            map_openai_error(e)
        })?;

        let content = response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| DialogueRepositoryError::Malformed("empty completion".to_string()))?;

        tracing::info!(
            model = %self.model,
            latency_ms = start_time.elapsed().as_millis(),
            response_length = content.len(),
            "Dialogue candidate received"
        );

        parse_script(&content)
    }
}
