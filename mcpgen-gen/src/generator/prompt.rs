use std::fmt::Write as _;

use mcpgen_core::{CompiledFlow, FlowWiring};

use crate::generator::GenerateError;

/// Builds the generation request for one flow. Same flow, wiring and language give the same bytes.
pub fn build_prompt(
    language: &str,
    flow: &CompiledFlow,
    wiring: &FlowWiring,
) -> Result<String, GenerateError> {
    let flow_json = flow.canonical_json()?;

    let mut out = String::with_capacity(flow_json.len() + 512);
    let _ = writeln!(
        out,
        "Generate idiomatic {language} server code for the following workflow. \
         Include endpoint handlers, orchestration, hooks, and error handling."
    );
    let _ = writeln!(
        out,
        "Call the steps in the order listed. Each step invokes exactly the endpoint shown with it."
    );
    out.push('\n');
    out.push_str("## Compiled flow\n\n```json\n");
    out.push_str(&flow_json);
    out.push_str("\n```\n");

    if wiring.has_hooks() {
        out.push_str("\n## Hook wiring\n\n");
        for mw in &wiring.middleware {
            let _ = writeln!(out, "- middleware `{}`{}", mw.name, describe(mw.description.as_deref()));
        }
        for step in &wiring.steps {
            if let Some(pre) = &step.pre {
                let _ = writeln!(
                    out,
                    "- before step `{}`: call `{}`{}",
                    step.step_id,
                    pre.name,
                    describe(pre.description.as_deref())
                );
            }
            if let Some(post) = &step.post {
                let _ = writeln!(
                    out,
                    "- after step `{}`: call `{}`{}",
                    step.step_id,
                    post.name,
                    describe(post.description.as_deref())
                );
            }
        }
    }

    Ok(out)
}

fn describe(description: Option<&str>) -> String {
    description.map(|d| format!(" ({d})")).unwrap_or_default()
}
