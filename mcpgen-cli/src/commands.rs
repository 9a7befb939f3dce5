use std::path::PathBuf;

use clap::Subcommand;

use crate::args::*;

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Link workflows against an API description and print the compiled flows
    Compile {
        /// OpenAPI 3 or Swagger 2 description (JSON or YAML)
        spec: PathBuf,
        /// Workflow document (JSON or YAML)
        workflows: PathBuf,
        #[arg(long)]
        workflow: Option<String>,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Compile, then generate one source file per workflow
    Generate {
        spec: PathBuf,
        workflows: PathBuf,
        #[command(flatten)]
        generate: GenerateArgs,
        #[command(flatten)]
        backend: BackendArgs,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Summarize an API description and list its endpoints
    Inspect {
        spec: PathBuf,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Check a workflow document's structure
    Validate {
        path: PathBuf,
        #[command(flatten)]
        output: OutputArgs,
    },
}
