use clap::Parser;
use tracing_subscriber::EnvFilter;

mod args;
mod cmd;
mod commands;
mod exit_codes;
mod output;
mod utils;

pub use args::*;
use commands::Command;

#[derive(Debug, Parser)]
#[command(name = "mcpgen", version, about = "Compile API workflows and generate server code")]
struct Cli {
    /// Debug logging (overrides RUST_LOG)
    #[arg(long, short, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("error: failed to create tokio runtime: {e}");
            std::process::exit(exit_codes::RUNTIME_ERROR);
        }
    };

    let exit_code = rt.block_on(run_command(cli.command));
    std::process::exit(exit_code);
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    // stdout carries command results; logs go to stderr.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

async fn run_command(command: Command) -> i32 {
    match command {
        Command::Compile {
            spec,
            workflows,
            workflow,
            output,
        } => cmd::compile::compile_cmd(&spec, &workflows, workflow.as_deref(), output).await,
        Command::Generate {
            spec,
            workflows,
            generate,
            backend,
            output,
        } => cmd::generate::generate_cmd(&spec, &workflows, generate, backend, output).await,
        Command::Inspect { spec, output } => cmd::inspect::inspect_cmd(&spec, output).await,
        Command::Validate { path, output } => cmd::validate::validate_cmd(&path, output).await,
    }
}
