use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use mcpgen_core::{compile, HookRegistry, Validate};
use mcpgen_gen::backend::http::ReqwestHttpClient;
use mcpgen_gen::{
    build_backend, BackendConfig, BackendKind, CodeGenerator, CredentialSource,
    EnvCredentialSource, GenerateError, GenerationBackend, GenerationJob, GeneratorConfig,
};
use serde::Serialize;

use crate::cmd::inputs::{load_spec, load_workflows, select_workflow};
use crate::exit_codes;
use crate::output::{print_error, print_result, OutputFormat};
use crate::utils::{extension_for_language, redact_url_password};
use crate::{BackendArgs, GenerateArgs, OutputArgs};

const DEFAULT_CREDENTIAL_VAR: &str = "OPENAI_API_KEY";

#[derive(Serialize)]
struct ArtifactInfo {
    workflow_id: String,
    location: String,
    bytes: usize,
}

#[derive(Serialize)]
struct FailureInfo {
    workflow_id: String,
    error: String,
}

#[derive(Serialize)]
struct GenerateResult {
    backend: String,
    artifacts: Vec<ArtifactInfo>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    failures: Vec<FailureInfo>,
}

pub async fn generate_cmd(
    spec_path: &Path,
    workflows_path: &Path,
    generate: GenerateArgs,
    backend: BackendArgs,
    output: OutputArgs,
) -> i32 {
    let spec = match load_spec(spec_path, &output) {
        Ok(s) => s,
        Err(code) => return code,
    };
    let mut parsed = match load_workflows(workflows_path, &output) {
        Ok(p) => p,
        Err(code) => return code,
    };
    if let Err(code) = select_workflow(&mut parsed, generate.workflow.as_deref(), &output) {
        return code;
    }

    // Workflow ids become file names under --out, so they must pass the id rules first.
    if let Err(err) = parsed.workflows.validate() {
        for v in &err.violations {
            print_error(output.format, output.quiet, &format!("{}: {}", v.path, v.message));
        }
        return exit_codes::VALIDATION_FAILED;
    }

    let outcome = compile(&spec.catalog, &parsed.workflows);
    if !outcome.is_clean() {
        for err in &outcome.errors {
            print_error(output.format, output.quiet, &err.to_string());
        }
        return exit_codes::VALIDATION_FAILED;
    }

    if let Err(e) = tokio::fs::create_dir_all(&generate.out).await {
        print_error(
            output.format,
            output.quiet,
            &format!("failed to create {}: {e}", generate.out.display()),
        );
        return exit_codes::RUNTIME_ERROR;
    }

    let kind = BackendKind::from(backend.backend);
    if let Some(endpoint) = &backend.endpoint {
        tracing::info!(backend = ?kind, endpoint = %redact_url_password(endpoint), "using backend endpoint");
    }
    let credentials: Option<Arc<dyn CredentialSource>> = match (kind, backend.credential) {
        (_, Some(reference)) => Some(reference.into_source()),
        (BackendKind::Chat, None) => Some(Arc::new(EnvCredentialSource::new(DEFAULT_CREDENTIAL_VAR))),
        _ => None,
    };
    let backend_impl: Arc<dyn GenerationBackend> = Arc::from(build_backend(
        BackendConfig {
            kind,
            endpoint: backend.endpoint,
            model: backend.model,
            max_tokens: backend.max_tokens,
            request_timeout: None,
            language: Some(generate.language.clone()),
            credentials,
        },
        Arc::new(ReqwestHttpClient::default()),
    ));

    let extension = extension_for_language(&generate.language);
    let jobs: Vec<GenerationJob> = outcome
        .flows
        .into_iter()
        .map(|flow| {
            let location = generate
                .out
                .join(format!("{}.{extension}", flow.workflow_id()));
            GenerationJob {
                registry: HookRegistry::from_flow(&flow),
                flow,
                location,
            }
        })
        .collect();
    let workflow_ids: Vec<String> = jobs.iter().map(|j| j.flow.workflow_id().to_string()).collect();

    let generator = CodeGenerator::new(GeneratorConfig {
        language: generate.language,
        backend_timeout: generate.timeout.map(Duration::from_secs),
    });
    let results = generator.generate_all(jobs, backend_impl).await;

    let mut result = GenerateResult {
        backend: format!("{kind:?}").to_lowercase(),
        artifacts: Vec::new(),
        failures: Vec::new(),
    };
    let mut only_io_failures = true;
    for (workflow_id, r) in workflow_ids.into_iter().zip(results) {
        match r {
            Ok(artifact) => result.artifacts.push(ArtifactInfo {
                workflow_id,
                location: artifact.location.display().to_string(),
                bytes: artifact.code.len(),
            }),
            Err(e) => {
                if !matches!(e, GenerateError::Persistence { .. }) {
                    only_io_failures = false;
                }
                result.failures.push(FailureInfo {
                    workflow_id,
                    error: e.to_string(),
                });
            }
        }
    }

    for f in &result.failures {
        print_error(
            output.format,
            output.quiet,
            &format!("{}: {}", f.workflow_id, f.error),
        );
    }
    if output.format == OutputFormat::Text && !output.quiet {
        for a in &result.artifacts {
            println!("wrote {} ({} bytes) for {}", a.location, a.bytes, a.workflow_id);
        }
    } else {
        print_result(output.format, output.quiet, &result);
    }

    match (result.failures.is_empty(), only_io_failures) {
        (true, _) => exit_codes::SUCCESS,
        (false, true) => exit_codes::RUNTIME_ERROR,
        (false, false) => exit_codes::GENERATION_FAILED,
    }
}

