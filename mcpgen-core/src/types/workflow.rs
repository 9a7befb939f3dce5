use crate::types::Step;

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Workflow {
    #[serde(rename = "workflowId")]
    pub workflow_id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    #[serde(default)]
    pub steps: Vec<Step>,
}

impl Workflow {
    pub fn new(workflow_id: impl Into<String>, steps: Vec<Step>) -> Self {
        Self {
            workflow_id: workflow_id.into(),
            summary: None,
            steps,
        }
    }
}

/// Workflows in document order. Duplicate ids are representable here; the compiler reports them.
#[derive(Debug, Clone, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub struct WorkflowSet {
    pub workflows: Vec<Workflow>,
}

impl WorkflowSet {
    pub fn new(workflows: Vec<Workflow>) -> Self {
        Self { workflows }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Workflow> {
        self.workflows.iter()
    }

    pub fn len(&self) -> usize {
        self.workflows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.workflows.is_empty()
    }

    /// Narrows the set to the workflows carrying `workflow_id` (all occurrences are kept).
    pub fn retain_id(&mut self, workflow_id: &str) {
        self.workflows.retain(|w| w.workflow_id == workflow_id);
    }
}
