use std::time::Duration;

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{Value, json};

use crate::application::ports::{CompletionClient, CompletionError, JsonCompletionRequest};

const CHAT_COMPLETIONS_URL: &str = "https://api.openai.com/v1/chat/completions";

pub struct OpenAiClient {
    client: Client,
    api_key: String,
    default_model: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Deserialize)]
struct ChatMessage {
    content: Option<String>,
}

impl OpenAiClient {
    pub fn new(api_key: String, default_model: String, timeout: Duration) -> Self {
        Self {
            client: Client::builder()
                .timeout(timeout)
                .build()
                .unwrap_or_default(),
            api_key,
            default_model,
        }
    }

    async fn send(&self, body: Value) -> Result<String, CompletionError> {
        let response = self
            .client
            .post(CHAT_COMPLETIONS_URL)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&body)
            .send()
            .await
            .map_err(|e| CompletionError::ApiRequestFailed(e.to_string()))?;

        if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(CompletionError::RateLimited);
        }

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(CompletionError::ApiRequestFailed(format!(
                "HTTP {}: {}",
                status, body
            )));
        }

        let chat: ChatResponse = response
            .json()
            .await
            .map_err(|e| CompletionError::InvalidResponse(e.to_string()))?;

        chat.choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| CompletionError::InvalidResponse("no completion choice".to_string()))
    }

    fn user_content(request: &JsonCompletionRequest) -> Value {
        match &request.image {
            Some(image) => {
                let data_uri = format!("data:{};base64,{}", image.mime, BASE64.encode(&image.data));
                json!([
                    { "type": "text", "text": request.user },
                    { "type": "image_url", "image_url": { "url": data_uri } },
                ])
            }
            None => json!(request.user),
        }
    }
}

/// Some deployments wrap JSON answers in Markdown code fences despite
/// strict JSON mode being requested.
fn strip_code_fences(content: &str) -> &str {
    let trimmed = content.trim();
    let Some(inner) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let inner = inner.strip_prefix("json").unwrap_or(inner);
    inner.strip_suffix("```").unwrap_or(inner).trim()
}

#[async_trait]
impl CompletionClient for OpenAiClient {
    #[tracing::instrument(skip(self, request), fields(model = %request.model))]
    async fn complete_json(
        &self,
        request: JsonCompletionRequest,
    ) -> Result<Value, CompletionError> {
        let body = json!({
            "model": request.model,
            "temperature": request.temperature,
            "response_format": { "type": "json_object" },
            "messages": [
                { "role": "system", "content": request.system },
                { "role": "user", "content": Self::user_content(&request) },
            ],
        });

        let content = self.send(body).await?;

        serde_json::from_str(strip_code_fences(&content))
            .map_err(|e| CompletionError::InvalidResponse(format!("not valid JSON: {e}")))
    }

    async fn complete(&self, system: &str, user: &str) -> Result<String, CompletionError> {
        let body = json!({
            "model": self.default_model,
            "messages": [
                { "role": "system", "content": system },
                { "role": "user", "content": user },
            ],
        });

        self.send(body).await
    }
}
