use std::sync::Arc;

use async_trait::async_trait;

use crate::application::ports::{CompletionClient, JsonCompletionRequest};
use crate::domain::{Document, ExtractionResult, ExtractionSource, NormalizedContent};

use super::prompts;
use super::strategy::{questions_from_response, ExtractionStrategy, StrategyError};

/// Content is capped before prompting to stay inside service token limits.
const MAX_PROMPT_CHARS: usize = 24_000;

/// Model-based extraction over textual content, with the same primary and
/// fallback model chain as the vision path.
pub struct TextStrategy {
    client: Arc<dyn CompletionClient>,
    primary_model: String,
    fallback_model: String,
    temperature: f32,
}

impl TextStrategy {
    pub fn new(
        client: Arc<dyn CompletionClient>,
        primary_model: String,
        fallback_model: String,
        temperature: f32,
    ) -> Self {
        Self {
            client,
            primary_model,
            fallback_model,
            temperature,
        }
    }

    async fn try_model(&self, model: &str, text: &str) -> Option<Vec<serde_json::Value>> {
        let user = format!(
            "Parse the following form content and return all the form fields in JSON format. \
             Extract every field EXACTLY as written:\n\n{}",
            truncate_chars(text, MAX_PROMPT_CHARS)
        );
        let mut request = JsonCompletionRequest::new(model, prompts::TEXT_SYSTEM, user);
        request.temperature = self.temperature;

        match self.client.complete_json(request).await {
            Ok(response) => questions_from_response(&response),
            Err(e) => {
                tracing::warn!(model, error = %e, "text extraction attempt failed");
                None
            }
        }
    }
}

#[async_trait]
impl ExtractionStrategy for TextStrategy {
    fn name(&self) -> &'static str {
        "text"
    }

    #[tracing::instrument(skip(self, content), fields(filename = %document.filename))]
    async fn attempt(
        &self,
        content: &NormalizedContent,
        document: &Document,
    ) -> Result<Option<ExtractionResult>, StrategyError> {
        let Some(text) = content.as_text() else {
            return Ok(None);
        };
        if text.trim().is_empty() {
            return Ok(None);
        }

        if let Some(questions) = self.try_model(&self.primary_model, &text).await {
            if !questions.is_empty() {
                return Ok(Some(ExtractionResult::new(
                    questions,
                    ExtractionSource::PrimaryModel,
                )));
            }
        }

        if let Some(questions) = self.try_model(&self.fallback_model, &text).await {
            if !questions.is_empty() {
                return Ok(Some(ExtractionResult::new(
                    questions,
                    ExtractionSource::FallbackModel,
                )));
            }
        }

        Ok(None)
    }
}

fn truncate_chars(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}
