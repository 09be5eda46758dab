use async_trait::async_trait;

use crate::domain::{Document, ExtractionResult, NormalizedContent};

/// One tier of the extraction fallback chain. Tiers are tried in order;
/// `Ok(None)` means "nothing usable here, try the next tier" — an explicit
/// sentinel rather than control flow by exception. Only genuinely broken
/// inputs return an error, and the chain absorbs those too.
#[async_trait]
pub trait ExtractionStrategy: Send + Sync {
    fn name(&self) -> &'static str;

    async fn attempt(
        &self,
        content: &NormalizedContent,
        document: &Document,
    ) -> Result<Option<ExtractionResult>, StrategyError>;
}

#[derive(Debug, thiserror::Error)]
pub enum StrategyError {
    #[error("extraction service failed: {0}")]
    Service(#[from] crate::application::ports::CompletionError),
    #[error("extraction output malformed: {0}")]
    MalformedOutput(String),
}

/// Pull the `questions` array out of a model response, tolerating the
/// alternate `fields` key some responses use. Returns `None` when neither
/// key holds an array — the caller treats that as a failed tier.
pub(crate) fn questions_from_response(value: &serde_json::Value) -> Option<Vec<serde_json::Value>> {
    let object = value.as_object()?;
    let array = object
        .get("questions")
        .or_else(|| object.get("fields"))?
        .as_array()?;
    Some(array.clone())
}
