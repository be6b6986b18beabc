use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};

use crate::core::assistant::{AiConfig, AiError, AiMessage, CompletionProvider};

const COMPLETIONS_URL: &str = "https://api.groq.com/openai/v1/chat/completions";

/// Shown when the provider returns a success status but no message content.
const EMPTY_REPLY_FALLBACK: &str = "The model returned an empty reply.";

/// Chat-completion client for Groq's OpenAI-compatible API.
pub struct GroqClient {
    client: Client,
}

impl GroqClient {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }
}

impl Default for GroqClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Groq error bodies follow the OpenAI shape: `{"error": {"message": "..."}}`.
fn embedded_error_message(body: &str) -> Option<String> {
    serde_json::from_str::<Value>(body)
        .ok()?
        .pointer("/error/message")?
        .as_str()
        .map(|s| s.to_string())
}

#[async_trait]
impl CompletionProvider for GroqClient {
    async fn chat_complete(
        &self,
        messages: &[AiMessage],
        config: &AiConfig,
        api_key: &str,
    ) -> Result<String, AiError> {
        let payload = json!({
            "model": config.model,
            "messages": messages,
            "temperature": config.temperature,
            "max_tokens": config.max_tokens,
            "stream": false,
        });

        let response = self
            .client
            .post(COMPLETIONS_URL)
            .bearer_auth(api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| AiError::Remote(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            let message = embedded_error_message(&body)
                .unwrap_or_else(|| format!("completion request failed with status {}", status));
            return Err(AiError::Remote(message));
        }

        let response_json: Value = response
            .json()
            .await
            .map_err(|e| AiError::Remote(e.to_string()))?;

        let content = response_json["choices"][0]["message"]["content"]
            .as_str()
            .unwrap_or(EMPTY_REPLY_FALLBACK)
            .to_string();

        Ok(content)
    }
}
