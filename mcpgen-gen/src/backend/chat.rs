use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::backend::http::{HttpClient, HttpRequestParts, DEFAULT_MAX_RESPONSE_BYTES};
use crate::backend::{check_status, parse_endpoint, BackendError, GenerationBackend};
use crate::credentials::CredentialSource;

pub const DEFAULT_CHAT_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";
pub const DEFAULT_CHAT_MODEL: &str = "gpt-4-1106-preview";
pub const DEFAULT_MAX_TOKENS: u32 = 2048;

#[derive(Debug, Clone)]
pub struct ChatCompletionConfig {
    pub endpoint: String,
    pub model: String,
    pub max_tokens: u32,
    /// Per-request transport timeout. `None` leaves it to the HTTP client.
    pub request_timeout: Option<Duration>,
}

impl Default for ChatCompletionConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_CHAT_ENDPOINT.to_string(),
            model: DEFAULT_CHAT_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            request_timeout: None,
        }
    }
}

/// Talks to a chat-completions style model API with a bearer credential.
pub struct ChatCompletionBackend {
    config: ChatCompletionConfig,
    http: Arc<dyn HttpClient>,
    credentials: Arc<dyn CredentialSource>,
}

impl ChatCompletionBackend {
    pub fn new(
        config: ChatCompletionConfig,
        http: Arc<dyn HttpClient>,
        credentials: Arc<dyn CredentialSource>,
    ) -> Self {
        Self {
            config,
            http,
            credentials,
        }
    }

    pub fn config(&self) -> &ChatCompletionConfig {
        &self.config
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 1],
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[async_trait]
impl GenerationBackend for ChatCompletionBackend {
    async fn generate_code(&self, prompt: &str) -> Result<String, BackendError> {
        let endpoint = parse_endpoint(&self.config.endpoint)?;
        let credential = self.credentials.credential().await?;

        let body = serde_json::to_vec(&ChatRequest {
            model: &self.config.model,
            messages: [ChatMessage {
                role: "user",
                content: prompt,
            }],
            max_tokens: self.config.max_tokens,
        })
        .map_err(|e| BackendError::InvalidResponse(format!("failed to encode request: {e}")))?;

        let req = HttpRequestParts::post_json(endpoint, body)
            .with_header("Authorization", format!("Bearer {}", credential.expose()));
        drop(credential);

        let resp = self
            .http
            .send(req, self.config.request_timeout, DEFAULT_MAX_RESPONSE_BYTES)
            .await?;
        check_status(&resp)?;

        let parsed: ChatResponse = serde_json::from_slice(&resp.body)
            .map_err(|e| BackendError::InvalidResponse(e.to_string()))?;
        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or(BackendError::EmptyResponse)?;
        if content.trim().is_empty() {
            return Err(BackendError::EmptyResponse);
        }
        tracing::debug!(model = %self.config.model, bytes = content.len(), "chat backend answered");
        Ok(content)
    }
}
