use async_trait::async_trait;

/// Image attachment for multimodal requests, transported as a base64 data URI.
#[derive(Debug, Clone)]
pub struct ImagePayload {
    pub data: Vec<u8>,
    pub mime: String,
}

/// A schema-constrained completion request. The service is instructed to
/// return a single JSON object; `temperature` stays low to minimize
/// extraction non-determinism.
#[derive(Debug, Clone)]
pub struct JsonCompletionRequest {
    pub model: String,
    pub system: String,
    pub user: String,
    pub image: Option<ImagePayload>,
    pub temperature: f32,
}

impl JsonCompletionRequest {
    pub fn new(model: impl Into<String>, system: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            system: system.into(),
            user: user.into(),
            image: None,
            temperature: 0.2,
        }
    }

    pub fn with_image(mut self, image: ImagePayload) -> Self {
        self.image = Some(image);
        self
    }
}

#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Submit a request in strict JSON mode and parse the response body as a
    /// JSON object.
    async fn complete_json(
        &self,
        request: JsonCompletionRequest,
    ) -> Result<serde_json::Value, CompletionError>;

    /// Free-text completion, used by the policy assistant's answer generator.
    async fn complete(&self, system: &str, user: &str) -> Result<String, CompletionError>;
}

#[derive(Debug, thiserror::Error)]
pub enum CompletionError {
    #[error("api request failed: {0}")]
    ApiRequestFailed(String),
    #[error("rate limited")]
    RateLimited,
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}
