use std::path::Path;

use mcpgen_core::compile;

use crate::cmd::inputs::{load_spec, load_workflows, select_workflow};
use crate::exit_codes;
use crate::output::{print_error, print_result, OutputFormat};
use crate::OutputArgs;

pub async fn compile_cmd(
    spec_path: &Path,
    workflows_path: &Path,
    workflow_id: Option<&str>,
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
    if let Err(code) = select_workflow(&mut parsed, workflow_id, &output) {
        return code;
    }

    let outcome = compile(&spec.catalog, &parsed.workflows);
    tracing::debug!(
        flows = outcome.flows.len(),
        errors = outcome.errors.len(),
        "compiled workflows"
    );

    if output.format == OutputFormat::Text && !output.quiet {
        for flow in &outcome.flows {
            println!("Flow: {}", flow.workflow_id());
            for step in flow.steps() {
                let ep = step.endpoint();
                print!("  - {} -> {} {} ({})", step.step_id(), ep.method, ep.path, ep.id);
                if let Some(pre) = step.pre_hook() {
                    print!(" pre={pre}");
                }
                if let Some(post) = step.post_hook() {
                    print!(" post={post}");
                }
                println!();
            }
        }
    } else {
        print_result(output.format, output.quiet, &outcome);
    }

    for err in &outcome.errors {
        print_error(output.format, output.quiet, &err.to_string());
    }

    if outcome.is_clean() {
        exit_codes::SUCCESS
    } else {
        exit_codes::VALIDATION_FAILED
    }
}
