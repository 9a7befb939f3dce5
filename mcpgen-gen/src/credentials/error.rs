#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CredentialError {
    #[error("credential not found: {0}")]
    NotFound(String),
    #[error("credential from {0} is empty")]
    Empty(String),
    #[error("credential source {source_name} is unreadable: {message}")]
    Unreadable {
        source_name: String,
        message: String,
    },
}

impl CredentialError {
    pub fn unreadable(source_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Unreadable {
            source_name: source_name.into(),
            message: message.into(),
        }
    }
}
