use std::sync::Arc;

use async_trait::async_trait;

use crate::application::ports::{CompletionClient, JsonCompletionRequest};
use crate::domain::{Document, ExtractionResult, ExtractionSource, NormalizedContent};

use super::prompts;
use super::strategy::{questions_from_response, ExtractionStrategy, StrategyError};

/// Next-to-last tier: when content-based extraction has produced nothing,
/// ask the model for a best-guess field list from the filename alone. Still
/// returns the standard JSON shape.
pub struct FilenameStrategy {
    client: Arc<dyn CompletionClient>,
    model: String,
}

impl FilenameStrategy {
    pub fn new(client: Arc<dyn CompletionClient>, model: String) -> Self {
        Self { client, model }
    }
}

#[async_trait]
impl ExtractionStrategy for FilenameStrategy {
    fn name(&self) -> &'static str {
        "filename-guess"
    }

    async fn attempt(
        &self,
        _content: &NormalizedContent,
        document: &Document,
    ) -> Result<Option<ExtractionResult>, StrategyError> {
        let user = format!(
            "The form file is named \"{}\". Infer the fields this form most likely contains \
             and return them as the JSON object.",
            document.filename
        );
        let request = JsonCompletionRequest::new(&self.model, prompts::FILENAME_SYSTEM, user);

        match self.client.complete_json(request).await {
            Ok(response) => {
                let Some(questions) = questions_from_response(&response) else {
                    return Ok(None);
                };
                if questions.is_empty() {
                    return Ok(None);
                }
                tracing::warn!(
                    filename = %document.filename,
                    field_count = questions.len(),
                    "using filename-only best-guess extraction"
                );
                Ok(Some(ExtractionResult::new(
                    questions,
                    ExtractionSource::FilenameGuess,
                )))
            }
            Err(e) => {
                tracing::warn!(filename = %document.filename, error = %e, "filename-guess extraction failed");
                Ok(None)
            }
        }
    }
}
