use std::path::PathBuf;

use clap::Args;
use mcpgen_gen::{BackendKind, CredentialRef};

use crate::output::OutputFormat;

#[derive(Debug, Args, Clone)]
pub struct OutputArgs {
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    pub format: OutputFormat,
    #[arg(long, short, global = true)]
    pub quiet: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum BackendChoice {
    /// Offline scaffold, no network
    Template,
    /// Chat-completions model API
    Chat,
    /// Retrieval-augmented generation service
    Rag,
}

impl From<BackendChoice> for BackendKind {
    fn from(choice: BackendChoice) -> Self {
        match choice {
            BackendChoice::Template => BackendKind::Template,
            BackendChoice::Chat => BackendKind::Chat,
            BackendChoice::Rag => BackendKind::Retrieval,
        }
    }
}

#[derive(Debug, Args, Clone)]
pub struct BackendArgs {
    #[arg(long, value_enum, default_value_t = BackendChoice::Template)]
    pub backend: BackendChoice,
    #[arg(long, env = "MCPGEN_MODEL")]
    pub model: Option<String>,
    /// Overrides the backend's default URL
    #[arg(long, env = "MCPGEN_BACKEND_URL")]
    pub endpoint: Option<url::Url>,
    /// Where the chat backend reads its API key (default env:OPENAI_API_KEY)
    #[arg(long, env = "MCPGEN_CREDENTIAL", value_name = "env:NAME|file:PATH")]
    pub credential: Option<CredentialRef>,
    #[arg(long)]
    pub max_tokens: Option<u32>,
}

#[derive(Debug, Args, Clone)]
pub struct GenerateArgs {
    /// Directory receiving one file per workflow
    #[arg(long)]
    pub out: PathBuf,
    #[arg(long, default_value = "Go")]
    pub language: String,
    /// Give up on a backend call after this many seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,
    #[arg(long)]
    pub workflow: Option<String>,
}
