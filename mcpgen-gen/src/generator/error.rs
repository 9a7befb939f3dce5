use std::path::PathBuf;

use mcpgen_core::HookError;

use crate::backend::BackendError;

#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    #[error("hook wiring rejected: {0}")]
    Hook(#[from] HookError),
    #[error("failed to serialize compiled flow: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error(transparent)]
    Backend(#[from] BackendError),
    #[error("failed to write {}: {source}", location.display())]
    Persistence {
        location: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("another generation is already writing {}", .0.display())]
    LocationBusy(PathBuf),
    #[error("generation task did not complete: {0}")]
    Task(String),
}
