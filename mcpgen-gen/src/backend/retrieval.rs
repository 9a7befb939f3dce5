use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::backend::http::{HttpClient, HttpRequestParts, DEFAULT_MAX_RESPONSE_BYTES};
use crate::backend::{check_status, parse_endpoint, BackendError, GenerationBackend};

pub const DEFAULT_RETRIEVAL_ENDPOINT: &str = "http://localhost:8000/generate";

#[derive(Debug, Clone)]
pub struct RetrievalConfig {
    pub endpoint: String,
    pub request_timeout: Option<Duration>,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_RETRIEVAL_ENDPOINT.to_string(),
            request_timeout: None,
        }
    }
}

/// Delegates to a retrieval-augmented generation service that answers `{"code": ...}`.
pub struct RetrievalBackend {
    config: RetrievalConfig,
    http: Arc<dyn HttpClient>,
}

impl RetrievalBackend {
    pub fn new(config: RetrievalConfig, http: Arc<dyn HttpClient>) -> Self {
        Self { config, http }
    }
}

#[derive(Serialize)]
struct RetrievalRequest<'a> {
    prompt: &'a str,
}

#[derive(Deserialize)]
struct RetrievalResponse {
    #[serde(default)]
    code: Option<String>,
}

#[async_trait]
impl GenerationBackend for RetrievalBackend {
    async fn generate_code(&self, prompt: &str) -> Result<String, BackendError> {
        let body = serde_json::to_vec(&RetrievalRequest { prompt })
            .map_err(|e| BackendError::InvalidResponse(format!("failed to encode request: {e}")))?;
        let req = HttpRequestParts::post_json(parse_endpoint(&self.config.endpoint)?, body);

        let resp = self
            .http
            .send(req, self.config.request_timeout, DEFAULT_MAX_RESPONSE_BYTES)
            .await?;
        check_status(&resp)?;

        let parsed: RetrievalResponse = serde_json::from_slice(&resp.body)
            .map_err(|e| BackendError::InvalidResponse(e.to_string()))?;
        match parsed.code {
            Some(code) if !code.trim().is_empty() => Ok(code),
            _ => Err(BackendError::EmptyResponse),
        }
    }
}
