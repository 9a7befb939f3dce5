mod rules;
mod validator;

use crate::error::ValidationError;
use crate::types::WorkflowSet;
use validator::Validator;

pub trait Validate {
    fn validate(&self) -> Result<(), ValidationError>;
}

impl Validate for WorkflowSet {
    fn validate(&self) -> Result<(), ValidationError> {
        validate_workflow_set(self)
    }
}

/// Structural checks on a workflow document: id syntax, step id uniqueness, non-empty calls
/// and `next` targets that name a step of the same workflow.
///
/// Endpoint references are not checked here; that is the compiler's job.
pub fn validate_workflow_set(set: &WorkflowSet) -> Result<(), ValidationError> {
    let mut v = Validator::new();
    v.validate_workflow_set(set);
    v.finish()
}
