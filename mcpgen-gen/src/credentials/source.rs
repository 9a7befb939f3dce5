use std::path::PathBuf;

use async_trait::async_trait;
use zeroize::Zeroizing;

use crate::credentials::{Credential, CredentialError};

#[async_trait]
pub trait CredentialSource: Send + Sync {
    async fn credential(&self) -> Result<Credential, CredentialError>;
}

/// Reads the credential from an environment variable.
#[derive(Debug, Clone)]
pub struct EnvCredentialSource {
    pub var: String,
}

impl EnvCredentialSource {
    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }
}

#[async_trait]
impl CredentialSource for EnvCredentialSource {
    async fn credential(&self) -> Result<Credential, CredentialError> {
        let name = format!("env:{}", self.var);
        match std::env::var(&self.var) {
            Ok(v) => Credential::new(&name, &Zeroizing::new(v)),
            Err(std::env::VarError::NotPresent) => Err(CredentialError::NotFound(name)),
            Err(e) => Err(CredentialError::unreadable(name, e.to_string())),
        }
    }
}

/// Reads the credential from a file, e.g. a mounted secret.
#[derive(Debug, Clone)]
pub struct FileCredentialSource {
    pub path: PathBuf,
}

impl FileCredentialSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl CredentialSource for FileCredentialSource {
    async fn credential(&self) -> Result<Credential, CredentialError> {
        let name = format!("file:{}", self.path.display());
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(b) => Zeroizing::new(b),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(CredentialError::NotFound(name));
            }
            Err(e) => return Err(CredentialError::unreadable(name, e.to_string())),
        };
        let text = std::str::from_utf8(&bytes)
            .map_err(|_| CredentialError::unreadable(&name, "not valid UTF-8"))?;
        Credential::new(&name, text)
    }
}

/// A fixed credential supplied by the caller, mostly for tests and embedding.
#[derive(Clone, Default)]
pub struct StaticCredentialSource {
    value: Option<Zeroizing<String>>,
}

impl StaticCredentialSource {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: Some(Zeroizing::new(value.into())),
        }
    }

    /// A source that never has a credential.
    pub fn missing() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CredentialSource for StaticCredentialSource {
    async fn credential(&self) -> Result<Credential, CredentialError> {
        match &self.value {
            Some(v) => Credential::new("static", v),
            None => Err(CredentialError::NotFound("static".to_string())),
        }
    }
}
