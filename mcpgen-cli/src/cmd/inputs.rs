use std::path::Path;

use mcpgen_core::{
    format_for_path, load_catalog_file, parse_workflow_str, LoadError, LoadedSpec, ParseError,
    ParsedWorkflows,
};

use crate::exit_codes;
use crate::output::print_error;
use crate::OutputArgs;

/// Loads the API description, printing the failure and returning an exit code on error.
pub fn load_spec(path: &Path, output: &OutputArgs) -> Result<LoadedSpec, i32> {
    load_catalog_file(path).map_err(|e| {
        print_error(output.format, output.quiet, &e.to_string());
        match e {
            LoadError::Io { .. } => exit_codes::RUNTIME_ERROR,
            _ => exit_codes::VALIDATION_FAILED,
        }
    })
}

pub fn load_workflows(path: &Path, output: &OutputArgs) -> Result<ParsedWorkflows, i32> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        print_error(
            output.format,
            output.quiet,
            &format!("failed to read {}: {e}", path.display()),
        );
        exit_codes::RUNTIME_ERROR
    })?;

    parse_workflow_str(&content, format_for_path(path)).map_err(|e| {
        let message = match e {
            ParseError::Json(e) => format!("JSON parse failed: {e}"),
            ParseError::Yaml(e) => format!("YAML parse failed: {e}"),
            ParseError::UnknownFormat => "input is neither valid JSON nor valid YAML".to_string(),
        };
        print_error(output.format, output.quiet, &message);
        exit_codes::VALIDATION_FAILED
    })
}

/// Narrows `parsed` to `workflow_id` when one was requested.
pub fn select_workflow(
    parsed: &mut ParsedWorkflows,
    workflow_id: Option<&str>,
    output: &OutputArgs,
) -> Result<(), i32> {
    let Some(id) = workflow_id else {
        return Ok(());
    };
    parsed.workflows.retain_id(id);
    if parsed.workflows.is_empty() {
        print_error(
            output.format,
            output.quiet,
            &format!("workflow not found: {id}"),
        );
        return Err(exit_codes::VALIDATION_FAILED);
    }
    Ok(())
}
