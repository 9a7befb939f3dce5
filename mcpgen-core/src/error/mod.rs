use std::path::PathBuf;

use thiserror::Error;

use crate::hooks::HookSlot;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("failed to parse as JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to parse as YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("unable to auto-detect document format (neither valid JSON nor valid YAML)")]
    UnknownFormat,
}

#[derive(Debug, Error)]
#[error("workflow document failed validation ({violations_len} violations)")]
pub struct ValidationError {
    pub violations: Vec<Violation>,
    violations_len: usize,
}

impl ValidationError {
    pub fn new(violations: Vec<Violation>) -> Self {
        let violations_len = violations.len();
        Self {
            violations,
            violations_len,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub path: String,
    pub message: String,
}

impl Violation {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Referential problems found while linking workflows against the catalog.
///
/// Reported once per occurrence; none of them stops the remaining workflows from compiling.
#[derive(Debug, Clone, PartialEq, Eq, Error, serde::Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CompileError {
    #[error("workflow '{workflow_id}': step '{step_id}' calls unknown endpoint '{endpoint_id}'")]
    UnresolvedEndpointReference {
        workflow_id: String,
        step_id: String,
        endpoint_id: String,
    },
    #[error("duplicate workflow id '{workflow_id}' (occurrence at index {index} was not compiled)")]
    DuplicateWorkflowId { workflow_id: String, index: usize },
    #[error("workflow '{workflow_id}': step id '{step_id}' is declared more than once")]
    DuplicateStepId { workflow_id: String, step_id: String },
}

impl CompileError {
    pub fn workflow_id(&self) -> &str {
        match self {
            Self::UnresolvedEndpointReference { workflow_id, .. }
            | Self::DuplicateWorkflowId { workflow_id, .. }
            | Self::DuplicateStepId { workflow_id, .. } => workflow_id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("duplicate endpoint id '{0}'")]
    DuplicateEndpointId(String),
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse API description as JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to parse API description as YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("spec type not supported: {0}")]
    UnsupportedSpec(String),
    #[error("malformed API description at {path}: {message}")]
    Malformed { path: String, message: String },
    #[error("{context}: {source}")]
    Ref {
        context: String,
        #[source]
        source: RefError,
    },
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

impl LoadError {
    pub(crate) fn malformed(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Malformed {
            path: path.into(),
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RefError {
    #[error("unsupported external $ref: {0}")]
    ExternalRef(String),
    #[error("unresolvable $ref: {0}")]
    NotFound(String),
    #[error("cyclic $ref: {0}")]
    Cycle(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HookError {
    #[error("{slot} hook registered for step '{step_id}', which workflow '{workflow_id}' does not define")]
    UnknownStep {
        workflow_id: String,
        step_id: String,
        slot: HookSlot,
    },
}
