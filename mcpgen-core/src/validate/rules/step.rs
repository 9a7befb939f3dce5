use std::collections::HashSet;

use crate::types::Step;
use crate::validate::validator::Validator;

pub(crate) fn validate_step(v: &mut Validator, step: &Step, path: &str, declared: &HashSet<&str>) {
    if step.call.trim().is_empty() {
        v.push(format!("{path}.call"), "must name an endpoint");
    }

    for (field, hook) in [("preHook", &step.pre_hook), ("postHook", &step.post_hook)] {
        if matches!(hook, Some(h) if h.trim().is_empty()) {
            v.push(format!("{path}.{field}"), "must not be empty when present");
        }
    }

    // Cycles (including self edges) are allowed; dangling targets are not.
    for (idx, target) in step.next.iter().enumerate() {
        if !declared.contains(target.as_str()) {
            v.push(
                format!("{path}.next[{idx}]"),
                format!("references unknown step '{target}'"),
            );
        }
    }
}
