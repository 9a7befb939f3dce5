use std::sync::Arc;
use std::time::Duration;

use crate::backend::http::HttpClient;
use crate::backend::{
    ChatCompletionBackend, ChatCompletionConfig, GenerationBackend, RetrievalBackend,
    RetrievalConfig, TemplateBackend,
};
use crate::credentials::CredentialSource;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BackendKind {
    #[default]
    Template,
    Chat,
    Retrieval,
}

impl std::str::FromStr for BackendKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "template" => Ok(Self::Template),
            "chat" | "openai" => Ok(Self::Chat),
            "rag" | "retrieval" => Ok(Self::Retrieval),
            other => Err(format!("unknown backend '{other}' (expected template, chat or rag)")),
        }
    }
}

/// Everything needed to pick and build one backend.
#[derive(Clone, Default)]
pub struct BackendConfig {
    pub kind: BackendKind,
    pub endpoint: Option<url::Url>,
    pub model: Option<String>,
    pub max_tokens: Option<u32>,
    pub request_timeout: Option<Duration>,
    /// Target language; only the template backend looks at it.
    pub language: Option<String>,
    pub credentials: Option<Arc<dyn CredentialSource>>,
}

/// Builds the configured backend. A chat backend without a credential source still builds; it
/// fails with `BackendError::Credential` on first use.
pub fn build_backend(config: BackendConfig, http: Arc<dyn HttpClient>) -> Box<dyn GenerationBackend> {
    match config.kind {
        BackendKind::Template => Box::new(
            config
                .language
                .as_deref()
                .map(TemplateBackend::for_language)
                .unwrap_or_default(),
        ),
        BackendKind::Chat => {
            let mut chat = ChatCompletionConfig {
                request_timeout: config.request_timeout,
                ..ChatCompletionConfig::default()
            };
            if let Some(endpoint) = config.endpoint {
                chat.endpoint = endpoint.to_string();
            }
            if let Some(model) = config.model {
                chat.model = model;
            }
            if let Some(max_tokens) = config.max_tokens {
                chat.max_tokens = max_tokens;
            }
            let credentials = config
                .credentials
                .unwrap_or_else(|| Arc::new(crate::credentials::StaticCredentialSource::missing()));
            Box::new(ChatCompletionBackend::new(chat, http, credentials))
        }
        BackendKind::Retrieval => {
            let mut rag = RetrievalConfig {
                request_timeout: config.request_timeout,
                ..RetrievalConfig::default()
            };
            if let Some(endpoint) = config.endpoint {
                rag.endpoint = endpoint.to_string();
            }
            Box::new(RetrievalBackend::new(rag, http))
        }
    }
}
