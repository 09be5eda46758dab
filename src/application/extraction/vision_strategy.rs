use std::sync::Arc;

use async_trait::async_trait;

use crate::application::ports::{CompletionClient, ImagePayload, JsonCompletionRequest};
use crate::domain::{Document, ExtractionResult, ExtractionSource, NormalizedContent};

use super::prompts;
use super::strategy::{questions_from_response, ExtractionStrategy, StrategyError};

/// Model-based extraction for image content: primary multimodal model first,
/// then one retry on an alternate model with a reworded prompt. Low sampling
/// temperature on both attempts. A primary pass that yields suspiciously few
/// fields is retried rather than trusted.
pub struct VisionStrategy {
    client: Arc<dyn CompletionClient>,
    primary_model: String,
    fallback_model: String,
    temperature: f32,
    min_primary_fields: usize,
}

impl VisionStrategy {
    pub fn new(
        client: Arc<dyn CompletionClient>,
        primary_model: String,
        fallback_model: String,
        temperature: f32,
        min_primary_fields: usize,
    ) -> Self {
        Self {
            client,
            primary_model,
            fallback_model,
            temperature,
            min_primary_fields,
        }
    }

    async fn try_model(
        &self,
        model: &str,
        system: &str,
        user: &str,
        image: ImagePayload,
    ) -> Option<Vec<serde_json::Value>> {
        let mut request = JsonCompletionRequest::new(model, system, user).with_image(image);
        request.temperature = self.temperature;

        match self.client.complete_json(request).await {
            Ok(response) => questions_from_response(&response),
            Err(e) => {
                tracing::warn!(model, error = %e, "vision extraction attempt failed");
                None
            }
        }
    }
}

#[async_trait]
impl ExtractionStrategy for VisionStrategy {
    fn name(&self) -> &'static str {
        "vision"
    }

    #[tracing::instrument(skip(self, content), fields(filename = %document.filename))]
    async fn attempt(
        &self,
        content: &NormalizedContent,
        document: &Document,
    ) -> Result<Option<ExtractionResult>, StrategyError> {
        let NormalizedContent::Image { data, mime } = content else {
            return Ok(None);
        };

        let payload = ImagePayload {
            data: data.clone(),
            mime: mime.clone(),
        };

        if let Some(questions) = self
            .try_model(
                &self.primary_model,
                prompts::VISION_SYSTEM,
                prompts::VISION_USER,
                payload.clone(),
            )
            .await
        {
            if questions.len() >= self.min_primary_fields {
                tracing::info!(
                    model = %self.primary_model,
                    field_count = questions.len(),
                    "primary vision extraction succeeded"
                );
                return Ok(Some(ExtractionResult::new(
                    questions,
                    ExtractionSource::PrimaryModel,
                )));
            }
            tracing::warn!(
                model = %self.primary_model,
                field_count = questions.len(),
                "primary vision extraction returned too few fields, retrying on fallback model"
            );
        }

        if let Some(questions) = self
            .try_model(
                &self.fallback_model,
                prompts::FALLBACK_SYSTEM,
                prompts::FALLBACK_USER,
                payload,
            )
            .await
        {
            if !questions.is_empty() {
                tracing::info!(
                    model = %self.fallback_model,
                    field_count = questions.len(),
                    "fallback vision extraction succeeded"
                );
                return Ok(Some(ExtractionResult::new(
                    questions,
                    ExtractionSource::FallbackModel,
                )));
            }
        }

        Ok(None)
    }
}
