use async_trait::async_trait;

use crate::domain::{Document, ExtractionResult, ExtractionSource, NormalizedContent};

use super::strategy::{ExtractionStrategy, StrategyError};

/// Terminal tier of the chain: a hard-coded two-field structure so the
/// pipeline never returns nothing. Infallible by construction.
pub struct MinimalStrategy;

impl MinimalStrategy {
    pub fn new() -> Self {
        Self
    }
}

impl Default for MinimalStrategy {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ExtractionStrategy for MinimalStrategy {
    fn name(&self) -> &'static str {
        "minimal"
    }

    async fn attempt(
        &self,
        _content: &NormalizedContent,
        document: &Document,
    ) -> Result<Option<ExtractionResult>, StrategyError> {
        tracing::warn!(
            filename = %document.filename,
            "all extraction tiers exhausted, substituting minimal structure"
        );
        let candidates = vec![
            serde_json::json!({
                "id": "form_name",
                "question_text": "Form Name",
                "field_type": "text",
                "required": true,
            }),
            serde_json::json!({
                "id": "form_description",
                "question_text": "Form Description",
                "field_type": "textarea",
                "required": true,
            }),
        ];
        Ok(Some(ExtractionResult::new(
            candidates,
            ExtractionSource::Minimal,
        )))
    }
}
