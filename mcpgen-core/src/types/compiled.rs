use std::sync::Arc;

use crate::types::Endpoint;

/// A workflow whose step calls have all been resolved against a catalog.
///
/// Only the compiler constructs these; there is no public way to mutate one afterwards.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct CompiledFlow {
    #[serde(rename = "workflowId")]
    workflow_id: String,
    steps: Vec<CompiledStep>,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct CompiledStep {
    #[serde(rename = "stepId")]
    step_id: String,
    endpoint: Arc<Endpoint>,
    #[serde(rename = "preHook", skip_serializing_if = "Option::is_none")]
    pre_hook: Option<String>,
    #[serde(rename = "postHook", skip_serializing_if = "Option::is_none")]
    post_hook: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    next: Vec<String>,
}

impl CompiledFlow {
    pub(crate) fn new(workflow_id: String, steps: Vec<CompiledStep>) -> Self {
        Self { workflow_id, steps }
    }

    pub fn workflow_id(&self) -> &str {
        &self.workflow_id
    }

    pub fn steps(&self) -> &[CompiledStep] {
        &self.steps
    }

    pub fn step(&self, step_id: &str) -> Option<&CompiledStep> {
        self.steps.iter().find(|s| s.step_id == step_id)
    }

    /// Stable pretty-printed JSON. Identical flows always produce identical bytes:
    /// struct fields serialize in declaration order and every map in the model is ordered.
    pub fn canonical_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl CompiledStep {
    pub(crate) fn new(
        step_id: String,
        endpoint: Arc<Endpoint>,
        pre_hook: Option<String>,
        post_hook: Option<String>,
        next: Vec<String>,
    ) -> Self {
        Self {
            step_id,
            endpoint,
            pre_hook,
            post_hook,
            next,
        }
    }

    pub fn step_id(&self) -> &str {
        &self.step_id
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    /// The catalog's own handle to the endpoint, shared rather than copied.
    pub fn endpoint_handle(&self) -> &Arc<Endpoint> {
        &self.endpoint
    }

    pub fn pre_hook(&self) -> Option<&str> {
        self.pre_hook.as_deref()
    }

    pub fn post_hook(&self) -> Option<&str> {
        self.post_hook.as_deref()
    }

    pub fn next(&self) -> &[String] {
        &self.next
    }
}
