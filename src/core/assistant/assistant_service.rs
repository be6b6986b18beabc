use async_trait::async_trait;
use thiserror::Error;

use super::extract::extract_json;
use super::models::{AiConfig, AiMessage, AnalysisReport};
use super::prompt::{build_prompt, PromptInput};
use crate::core::sheets::range::used_range;
use crate::core::sheets::tabular::to_delimited_text;
use crate::core::sheets::SheetData;

#[derive(Debug, Error)]
pub enum AiError {
    /// Non-success response from the completion endpoint, carrying the
    /// provider's embedded error message when the body supplied one.
    #[error("{0}")]
    Remote(String),
}

/// Chat-completion port. The API key is passed per call because the user
/// owns it and can replace it at any time from the popup.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    async fn chat_complete(
        &self,
        messages: &[AiMessage],
        config: &AiConfig,
        api_key: &str,
    ) -> Result<String, AiError>;
}

/// Runs the serialize -> prompt -> complete -> extract pipeline for one
/// sheet and one user request.
pub struct AssistantService<P: CompletionProvider> {
    provider: P,
    config: AiConfig,
    system_prompt: String,
}

impl<P: CompletionProvider> AssistantService<P> {
    pub fn new(provider: P, config: AiConfig, system_prompt: String) -> Self {
        Self {
            provider,
            config,
            system_prompt,
        }
    }

    pub async fn analyze(
        &self,
        sheet: &SheetData,
        user_request: &str,
        api_key: &str,
    ) -> Result<AnalysisReport, AiError> {
        let range = used_range(&sheet.title, &sheet.values);
        let table = to_delimited_text(&sheet.values);
        let prompt = build_prompt(&PromptInput {
            sheet_title: &sheet.title,
            used_range: &range,
            user_request,
            table: &table,
        });

        let messages = [
            AiMessage::system(self.system_prompt.clone()),
            AiMessage::user(prompt),
        ];

        let reply = self
            .provider
            .chat_complete(&messages, &self.config, api_key)
            .await?;

        // Extraction failure is not an error: the raw reply is still useful.
        let plan = extract_json(&reply);
        if plan.is_none() {
            tracing::debug!("model reply did not contain parseable JSON");
        }

        Ok(AnalysisReport { reply, plan })
    }
}
