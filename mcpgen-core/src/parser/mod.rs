use std::path::Path;

use crate::error::ParseError;
use crate::types::WorkflowSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Yaml,
    Auto,
}

#[derive(Debug, Clone)]
pub struct ParsedWorkflows {
    pub workflows: WorkflowSet,
    pub format: DocumentFormat,
}

/// Parses an Arazzo-style workflow document.
///
/// Only the `workflows` array is read; `arazzo`, `info`, `sourceDescriptions` and other
/// top-level keys are accepted and ignored.
pub fn parse_workflow_str(input: &str, format: DocumentFormat) -> Result<ParsedWorkflows, ParseError> {
    match format {
        DocumentFormat::Json => Ok(ParsedWorkflows {
            workflows: serde_json::from_str::<WorkflowSet>(input)?,
            format,
        }),
        DocumentFormat::Yaml => Ok(ParsedWorkflows {
            workflows: serde_yaml::from_str::<WorkflowSet>(input)?,
            format,
        }),
        DocumentFormat::Auto => parse_workflow_auto(input),
    }
}

pub fn format_for_path(path: &Path) -> DocumentFormat {
    match path.extension().and_then(|e| e.to_str()) {
        Some("json") => DocumentFormat::Json,
        Some("yaml") | Some("yml") => DocumentFormat::Yaml,
        _ => DocumentFormat::Auto,
    }
}

fn parse_workflow_auto(input: &str) -> Result<ParsedWorkflows, ParseError> {
    if input.trim().is_empty() {
        return Err(ParseError::UnknownFormat);
    }

    // JSON always starts with `{` or `[` after trimming.
    let trimmed = input.trim_start();
    if trimmed.starts_with('{') || trimmed.starts_with('[') {
        return match serde_json::from_str::<WorkflowSet>(input) {
            Ok(workflows) => Ok(ParsedWorkflows {
                workflows,
                format: DocumentFormat::Json,
            }),
            // YAML is a superset of JSON's flow syntax, so give it a second chance.
            Err(e) => match serde_yaml::from_str::<WorkflowSet>(input) {
                Ok(workflows) => Ok(ParsedWorkflows {
                    workflows,
                    format: DocumentFormat::Yaml,
                }),
                Err(_) => Err(ParseError::Json(e)),
            },
        };
    }

    match serde_yaml::from_str::<WorkflowSet>(input) {
        Ok(workflows) => Ok(ParsedWorkflows {
            workflows,
            format: DocumentFormat::Yaml,
        }),
        Err(e) => {
            if let Ok(workflows) = serde_json::from_str::<WorkflowSet>(input) {
                return Ok(ParsedWorkflows {
                    workflows,
                    format: DocumentFormat::Json,
                });
            }
            Err(ParseError::Yaml(e))
        }
    }
}
