use std::time::Duration;

use crate::backend::http::HttpError;
use crate::credentials::CredentialError;

/// Why a backend produced no code. The generator never retries any of these.
#[derive(Debug, Clone, thiserror::Error)]
pub enum BackendError {
    #[error("credential unavailable: {0}")]
    Credential(#[from] CredentialError),
    #[error("transport failure: {0}")]
    Transport(#[from] HttpError),
    #[error("backend returned status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("backend returned no generated code")]
    EmptyResponse,
    #[error("backend response is not in the expected shape: {0}")]
    InvalidResponse(String),
    #[error("backend did not answer within {0:?}")]
    Timeout(Duration),
}
