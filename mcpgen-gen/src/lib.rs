#![forbid(unsafe_code)]

//! Code generation for compiled flows: credential sources, pluggable backends and the
//! generator that writes artifacts atomically.

pub mod backend;
pub mod credentials;
pub mod generator;

pub use crate::backend::{
    build_backend, BackendConfig, BackendError, BackendKind, ChatCompletionBackend,
    ChatCompletionConfig, GenerationBackend, RetrievalBackend, RetrievalConfig, TemplateBackend,
};
pub use crate::credentials::{
    Credential, CredentialError, CredentialRef, CredentialSource, EnvCredentialSource,
    FileCredentialSource, StaticCredentialSource,
};
pub use crate::generator::{
    build_prompt, CodeGenerator, GenerateError, GeneratedArtifact, GenerationJob, GeneratorConfig,
    LocationLocks,
};
