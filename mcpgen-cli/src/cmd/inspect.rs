use std::path::Path;

use mcpgen_core::{Endpoint, SpecInfo};
use serde::Serialize;

use crate::cmd::inputs::load_spec;
use crate::exit_codes;
use crate::output::{print_result, OutputFormat};
use crate::OutputArgs;

#[derive(Serialize)]
struct InspectResult<'a> {
    #[serde(flatten)]
    info: &'a SpecInfo,
    endpoints: Vec<&'a Endpoint>,
}

pub async fn inspect_cmd(spec_path: &Path, output: OutputArgs) -> i32 {
    let spec = match load_spec(spec_path, &output) {
        Ok(s) => s,
        Err(code) => return code,
    };

    let result = InspectResult {
        info: &spec.info,
        endpoints: spec.catalog.iter().map(|e| e.as_ref()).collect(),
    };

    if output.format == OutputFormat::Text && !output.quiet {
        let info = result.info;
        println!(
            "Title: {} ({})",
            info.title.as_deref().unwrap_or("untitled"),
            info.api_version.as_deref().unwrap_or("unversioned")
        );
        println!("Spec: {:?} {}", info.flavor, info.spec_version);
        println!("Paths: {}", info.path_count);
        println!("Schemas: {}", info.schema_count);
        println!("\nEndpoints:");
        for ep in &result.endpoints {
            let required = ep.required_parameters().count();
            println!(
                "  - {} {} ({}, {} params, {} required)",
                ep.method,
                ep.path,
                ep.id,
                ep.parameters.len(),
                required
            );
        }
    } else {
        print_result(output.format, output.quiet, &result);
    }

    exit_codes::SUCCESS
}
