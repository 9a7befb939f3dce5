//! Interchangeable code-generation backends.
//!
//! A backend turns one prompt into one block of source text. Selection happens once, from
//! [`BackendConfig`]; after that callers only see `dyn GenerationBackend`.

mod chat;
mod config;
mod error;
pub mod http;
mod retrieval;
mod template;

use async_trait::async_trait;

pub use chat::{ChatCompletionBackend, ChatCompletionConfig};
pub use config::{build_backend, BackendConfig, BackendKind};
pub use error::BackendError;
pub use retrieval::{RetrievalBackend, RetrievalConfig};
pub use template::TemplateBackend;

#[async_trait]
pub trait GenerationBackend: Send + Sync {
    async fn generate_code(&self, prompt: &str) -> Result<String, BackendError>;
}

/// Reads a non-2xx response into [`BackendError::Status`], keeping the upstream body verbatim.
pub(crate) fn check_status(resp: &http::HttpResponseParts) -> Result<(), BackendError> {
    if resp.is_success() {
        Ok(())
    } else {
        Err(BackendError::Status {
            status: resp.status,
            body: resp.body_text(),
        })
    }
}

pub(crate) fn parse_endpoint(endpoint: &str) -> Result<url::Url, BackendError> {
    url::Url::parse(endpoint)
        .map_err(|e| http::HttpError::Other(format!("invalid backend endpoint '{endpoint}': {e}")).into())
}
