use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use crate::error::CompileError;
use crate::types::{CompiledFlow, CompiledStep, Endpoint, EndpointCatalog, Workflow, WorkflowSet};

/// Everything one compilation produced: the flows that linked cleanly and every problem found.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize)]
pub struct CompileOutcome {
    pub flows: Vec<CompiledFlow>,
    pub errors: Vec<CompileError>,
}

impl CompileOutcome {
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn flow(&self, workflow_id: &str) -> Option<&CompiledFlow> {
        self.flows.iter().find(|f| f.workflow_id() == workflow_id)
    }
}

type EndpointIndex<'a> = HashMap<&'a str, &'a Arc<Endpoint>>;

/// Links every workflow in `workflows` against `catalog`.
///
/// Errors are collected rather than short-circuiting. A workflow with any error yields no flow;
/// its siblings are unaffected. Output order follows the set's order, step order is preserved.
pub fn compile(catalog: &EndpointCatalog, workflows: &WorkflowSet) -> CompileOutcome {
    let index: EndpointIndex<'_> = catalog.iter().map(|e| (e.id.as_str(), e)).collect();

    let mut outcome = CompileOutcome::default();
    let mut seen_workflows = HashSet::<&str>::new();

    for (idx, workflow) in workflows.iter().enumerate() {
        if !seen_workflows.insert(workflow.workflow_id.as_str()) {
            outcome.errors.push(CompileError::DuplicateWorkflowId {
                workflow_id: workflow.workflow_id.clone(),
                index: idx,
            });
            continue;
        }

        match compile_workflow(&index, workflow) {
            Ok(flow) => outcome.flows.push(flow),
            Err(mut errors) => outcome.errors.append(&mut errors),
        }
    }

    outcome
}

fn compile_workflow(
    index: &EndpointIndex<'_>,
    workflow: &Workflow,
) -> Result<CompiledFlow, Vec<CompileError>> {
    let mut errors = Vec::new();
    let mut steps = Vec::with_capacity(workflow.steps.len());
    let mut seen_steps = HashSet::<&str>::new();

    for step in &workflow.steps {
        if !seen_steps.insert(step.step_id.as_str()) {
            errors.push(CompileError::DuplicateStepId {
                workflow_id: workflow.workflow_id.clone(),
                step_id: step.step_id.clone(),
            });
            continue;
        }

        let Some(endpoint) = index.get(step.call.as_str()) else {
            errors.push(CompileError::UnresolvedEndpointReference {
                workflow_id: workflow.workflow_id.clone(),
                step_id: step.step_id.clone(),
                endpoint_id: step.call.clone(),
            });
            continue;
        };

        steps.push(CompiledStep::new(
            step.step_id.clone(),
            Arc::clone(endpoint),
            step.pre_hook.clone(),
            step.post_hook.clone(),
            step.next.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(CompiledFlow::new(workflow.workflow_id.clone(), steps))
    } else {
        Err(errors)
    }
}
