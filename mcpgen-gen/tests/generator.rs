use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use mcpgen_core::{
    compile, CompiledFlow, Endpoint, EndpointCatalog, HookError, HookHandler, HookRegistry, Step,
    Workflow, WorkflowSet,
};
use mcpgen_gen::backend::http::HttpError;
use mcpgen_gen::{
    BackendError, CodeGenerator, GenerateError, GenerationBackend, GenerationJob, GeneratorConfig,
};

fn sync_flow(workflow_id: &str) -> CompiledFlow {
    let catalog = EndpointCatalog::new(vec![
        Endpoint::new("getUser", "/user", "GET"),
        Endpoint::new("syncData", "/sync", "POST"),
    ])
    .unwrap();
    let set = WorkflowSet::new(vec![Workflow::new(
        workflow_id,
        vec![
            Step::new("fetchUser", "getUser").with_hooks(Some("authCheck"), None),
            Step::new("pushData", "syncData").with_hooks(None, Some("auditLog")),
        ],
    )]);
    let outcome = compile(&catalog, &set);
    assert!(outcome.is_clean());
    outcome.flows.into_iter().next().unwrap()
}

/// Echoes the prompt back and counts calls.
#[derive(Default)]
struct EchoBackend {
    calls: AtomicUsize,
}

#[async_trait]
impl GenerationBackend for EchoBackend {
    async fn generate_code(&self, prompt: &str) -> Result<String, BackendError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(format!("// generated\n{prompt}"))
    }
}

struct FailingBackend;

#[async_trait]
impl GenerationBackend for FailingBackend {
    async fn generate_code(&self, _prompt: &str) -> Result<String, BackendError> {
        Err(BackendError::Transport(HttpError::Network("connection refused".to_string())))
    }
}

/// Fails for prompts mentioning `needle`, echoes otherwise.
struct SelectiveBackend {
    needle: &'static str,
}

#[async_trait]
impl GenerationBackend for SelectiveBackend {
    async fn generate_code(&self, prompt: &str) -> Result<String, BackendError> {
        if prompt.contains(self.needle) {
            Err(BackendError::EmptyResponse)
        } else {
            Ok(prompt.to_string())
        }
    }
}

struct SlowBackend {
    delay: Duration,
}

#[async_trait]
impl GenerationBackend for SlowBackend {
    async fn generate_code(&self, _prompt: &str) -> Result<String, BackendError> {
        tokio::time::sleep(self.delay).await;
        Ok("late".to_string())
    }
}

/// Signals once it has been called, then never answers.
struct HangingBackend {
    entered: Arc<tokio::sync::Notify>,
}

#[async_trait]
impl GenerationBackend for HangingBackend {
    async fn generate_code(&self, _prompt: &str) -> Result<String, BackendError> {
        self.entered.notify_one();
        std::future::pending().await
    }
}

fn dir_entries(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[tokio::test]
async fn writes_backend_output_containing_the_flow() {
    let dir = tempfile::tempdir().unwrap();
    let location = dir.path().join("server.go");
    let flow = sync_flow("sync-user-data");
    let backend = EchoBackend::default();

    let artifact = CodeGenerator::default()
        .generate(&flow, &HookRegistry::new(), &backend, &location)
        .await
        .unwrap();

    assert_eq!(backend.calls.load(Ordering::SeqCst), 1);
    assert_eq!(artifact.workflow_id, "sync-user-data");
    assert_eq!(artifact.location, location);
    let written = std::fs::read_to_string(&location).unwrap();
    assert_eq!(written, artifact.code);
    assert!(written.contains(&flow.canonical_json().unwrap()));
    assert!(written.contains("Generate idiomatic Go server code"));
    assert_eq!(dir_entries(dir.path()), vec!["server.go".to_string()]);
}

#[tokio::test]
async fn prompt_carries_language_and_hook_wiring() {
    let dir = tempfile::tempdir().unwrap();
    let location = dir.path().join("server.rs");
    let flow = sync_flow("sync-user-data");
    let mut registry = HookRegistry::from_flow(&flow);
    registry.inject_middleware(HookHandler::new("requestLogger"));

    let generator = CodeGenerator::new(GeneratorConfig {
        language: "Rust".to_string(),
        ..GeneratorConfig::default()
    });
    let artifact = generator
        .generate(&flow, &registry, &EchoBackend::default(), &location)
        .await
        .unwrap();

    assert!(artifact.code.contains("Generate idiomatic Rust server code"));
    assert!(artifact.code.contains("## Hook wiring"));
    assert!(artifact.code.contains("- middleware `requestLogger`"));
    assert!(artifact.code.contains("- before step `fetchUser`: call `authCheck`"));
    assert!(artifact.code.contains("- after step `pushData`: call `auditLog`"));
}

#[tokio::test]
async fn backend_failure_leaves_location_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let location = dir.path().join("server.go");
    std::fs::write(&location, "previous").unwrap();

    let err = CodeGenerator::default()
        .generate(&sync_flow("w"), &HookRegistry::new(), &FailingBackend, &location)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        GenerateError::Backend(BackendError::Transport(HttpError::Network(_)))
    ));
    assert_eq!(std::fs::read_to_string(&location).unwrap(), "previous");
    assert_eq!(dir_entries(dir.path()), vec!["server.go".to_string()]);
}

#[tokio::test]
async fn unknown_hook_step_fails_before_calling_backend() {
    let dir = tempfile::tempdir().unwrap();
    let location = dir.path().join("server.go");
    let mut registry = HookRegistry::new();
    registry.register_post_hook("noSuchStep", HookHandler::new("audit"));
    let backend = EchoBackend::default();

    let err = CodeGenerator::default()
        .generate(&sync_flow("w"), &registry, &backend, &location)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        GenerateError::Hook(HookError::UnknownStep { ref step_id, .. }) if step_id == "noSuchStep"
    ));
    assert_eq!(backend.calls.load(Ordering::SeqCst), 0);
    assert!(!location.exists());
}

#[tokio::test]
async fn missing_output_directory_is_a_persistence_error() {
    let dir = tempfile::tempdir().unwrap();
    let location = dir.path().join("missing").join("server.go");

    let err = CodeGenerator::default()
        .generate(&sync_flow("w"), &HookRegistry::new(), &EchoBackend::default(), &location)
        .await
        .unwrap_err();

    match err {
        GenerateError::Persistence { location: l, .. } => assert_eq!(l, location),
        other => panic!("expected persistence error, got {other:?}"),
    }
}

#[tokio::test(start_paused = true)]
async fn backend_timeout_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let location = dir.path().join("server.go");
    let generator = CodeGenerator::new(GeneratorConfig {
        backend_timeout: Some(Duration::from_secs(5)),
        ..GeneratorConfig::default()
    });
    let backend = SlowBackend {
        delay: Duration::from_secs(60),
    };

    let err = generator
        .generate(&sync_flow("w"), &HookRegistry::new(), &backend, &location)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        GenerateError::Backend(BackendError::Timeout(d)) if d == Duration::from_secs(5)
    ));
    assert!(!location.exists());
}

#[tokio::test]
async fn concurrent_generation_for_same_location_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let location = dir.path().join("server.go");
    let generator = CodeGenerator::default();

    let _held = generator.locks().try_acquire(&location).unwrap();
    let backend = EchoBackend::default();
    let err = generator
        .generate(&sync_flow("w"), &HookRegistry::new(), &backend, &location)
        .await
        .unwrap_err();

    assert!(matches!(err, GenerateError::LocationBusy(ref p) if p == &location));
    assert_eq!(backend.calls.load(Ordering::SeqCst), 0);
    assert!(!location.exists());
}

#[tokio::test]
async fn generate_all_keeps_going_after_a_failure() {
    let dir = tempfile::tempdir().unwrap();
    let jobs: Vec<GenerationJob> = ["alpha", "broken", "gamma"]
        .into_iter()
        .map(|id| GenerationJob {
            flow: sync_flow(id),
            registry: HookRegistry::new(),
            location: dir.path().join(format!("{id}.go")),
        })
        .collect();
    let backend: Arc<dyn GenerationBackend> = Arc::new(SelectiveBackend {
        needle: "\"broken\"",
    });

    let results = CodeGenerator::default().generate_all(jobs, backend).await;

    assert_eq!(results.len(), 3);
    assert_eq!(results[0].as_ref().unwrap().workflow_id, "alpha");
    assert!(matches!(
        results[1],
        Err(GenerateError::Backend(BackendError::EmptyResponse))
    ));
    assert_eq!(results[2].as_ref().unwrap().workflow_id, "gamma");
    assert_eq!(
        dir_entries(dir.path()),
        vec!["alpha.go".to_string(), "gamma.go".to_string()]
    );
}

#[tokio::test]
async fn dropping_generation_midway_leaves_nothing_behind() {
    let dir = tempfile::tempdir().unwrap();
    let location = dir.path().join("server.go");
    let generator = CodeGenerator::default();
    let entered = Arc::new(tokio::sync::Notify::new());
    let backend = HangingBackend {
        entered: Arc::clone(&entered),
    };
    let flow = sync_flow("w");
    let registry = HookRegistry::new();

    tokio::select! {
        _ = generator.generate(&flow, &registry, &backend, &location) => {
            panic!("generation should still be waiting on the backend")
        }
        _ = entered.notified() => {}
    }

    assert!(!generator.locks().is_held(&location));
    assert!(dir_entries(dir.path()).is_empty());

    // The location is free again for the next writer.
    let artifact = generator
        .generate(&flow, &registry, &EchoBackend::default(), &location)
        .await
        .unwrap();
    assert_eq!(std::fs::read_to_string(&location).unwrap(), artifact.code);
}
