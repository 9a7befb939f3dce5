//! Turns compiled flows into source artifacts through a [`GenerationBackend`].

mod error;
mod locks;
mod persist;
mod prompt;

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use mcpgen_core::{CompiledFlow, HookRegistry};
use tokio::task::JoinSet;

use crate::backend::{BackendError, GenerationBackend};

pub use error::GenerateError;
pub use locks::{LocationGuard, LocationLocks};
pub use prompt::build_prompt;

pub const DEFAULT_LANGUAGE: &str = "Go";

#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Target language named in the prompt.
    pub language: String,
    /// Upper bound on one backend call. `None` waits indefinitely.
    pub backend_timeout: Option<Duration>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            language: DEFAULT_LANGUAGE.to_string(),
            backend_timeout: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedArtifact {
    pub workflow_id: String,
    pub location: PathBuf,
    pub code: String,
}

/// One unit of work for [`CodeGenerator::generate_all`].
#[derive(Debug, Clone)]
pub struct GenerationJob {
    pub flow: CompiledFlow,
    pub registry: HookRegistry,
    pub location: PathBuf,
}

#[derive(Debug, Clone, Default)]
pub struct CodeGenerator {
    config: GeneratorConfig,
    locks: Arc<LocationLocks>,
}

impl CodeGenerator {
    pub fn new(config: GeneratorConfig) -> Self {
        Self {
            config,
            locks: Arc::new(LocationLocks::new()),
        }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn locks(&self) -> &Arc<LocationLocks> {
        &self.locks
    }

    /// Generates code for `flow` and writes it to `location`.
    ///
    /// The backend is called exactly once. On success the location has been replaced atomically;
    /// on any error nothing was written there.
    pub async fn generate(
        &self,
        flow: &CompiledFlow,
        registry: &HookRegistry,
        backend: &dyn GenerationBackend,
        location: &Path,
    ) -> Result<GeneratedArtifact, GenerateError> {
        let workflow_id = flow.workflow_id();
        let _guard = self
            .locks
            .try_acquire(location)
            .ok_or_else(|| GenerateError::LocationBusy(location.to_path_buf()))?;

        let wiring = registry.wiring_for(flow)?;
        let prompt = build_prompt(&self.config.language, flow, &wiring)?;
        tracing::debug!(workflow_id, prompt_bytes = prompt.len(), "requesting generation");

        let code = match self.config.backend_timeout {
            Some(limit) => tokio::time::timeout(limit, backend.generate_code(&prompt))
                .await
                .unwrap_or(Err(BackendError::Timeout(limit))),
            None => backend.generate_code(&prompt).await,
        }
        .inspect_err(|e| tracing::warn!(workflow_id, error = %e, "generation backend failed"))?;

        persist::write_atomic(location, code.as_bytes())
            .await
            .map_err(|source| GenerateError::Persistence {
                location: location.to_path_buf(),
                source,
            })?;
        tracing::info!(workflow_id, location = %location.display(), bytes = code.len(), "wrote artifact");

        Ok(GeneratedArtifact {
            workflow_id: workflow_id.to_string(),
            location: location.to_path_buf(),
            code,
        })
    }

    /// Runs every job concurrently. Results come back in job order; a failed job does not
    /// cancel the others.
    pub async fn generate_all(
        &self,
        jobs: Vec<GenerationJob>,
        backend: Arc<dyn GenerationBackend>,
    ) -> Vec<Result<GeneratedArtifact, GenerateError>> {
        let mut results: Vec<Option<Result<GeneratedArtifact, GenerateError>>> =
            std::iter::repeat_with(|| None).take(jobs.len()).collect();

        let mut set = JoinSet::new();
        for (idx, job) in jobs.into_iter().enumerate() {
            let generator = self.clone();
            let backend = Arc::clone(&backend);
            set.spawn(async move {
                let result = generator
                    .generate(&job.flow, &job.registry, backend.as_ref(), &job.location)
                    .await;
                (idx, result)
            });
        }

        while let Some(joined) = set.join_next().await {
            match joined {
                Ok((idx, result)) => results[idx] = Some(result),
                Err(e) => tracing::error!(error = %e, "generation task aborted"),
            }
        }

        results
            .into_iter()
            .map(|r| r.unwrap_or_else(|| Err(GenerateError::Task("task panicked or was cancelled".to_string()))))
            .collect()
    }
}
