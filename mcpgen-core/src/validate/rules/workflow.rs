use std::collections::HashSet;

use crate::types::WorkflowSet;
use crate::validate::rules::step;
use crate::validate::validator::Validator;

pub(crate) fn validate_workflows(v: &mut Validator, set: &WorkflowSet) {
    let mut workflow_ids = HashSet::<&str>::new();

    for (idx, wf) in set.iter().enumerate() {
        let path = format!("workflows[{idx}]");
        v.validate_id(&format!("{path}.workflowId"), &wf.workflow_id);
        if !workflow_ids.insert(wf.workflow_id.as_str()) {
            v.push(
                format!("{path}.workflowId"),
                "must be unique within the document",
            );
        }

        let declared: HashSet<&str> = wf.steps.iter().map(|s| s.step_id.as_str()).collect();
        let mut step_ids = HashSet::<&str>::new();
        for (sidx, s) in wf.steps.iter().enumerate() {
            let spath = format!("{path}.steps[{sidx}]");
            v.validate_id(&format!("{spath}.stepId"), &s.step_id);
            if !step_ids.insert(s.step_id.as_str()) {
                v.push(
                    format!("{spath}.stepId"),
                    "must be unique within the workflow",
                );
            }
            step::validate_step(v, s, &spath, &declared);
        }
    }
}
