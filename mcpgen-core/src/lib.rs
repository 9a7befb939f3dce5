#![forbid(unsafe_code)]

//! Endpoint catalog, workflow model and the flow compiler that links the two.
//!
//! Compilation is synchronous and performs no I/O; loaders for OpenAPI descriptions and
//! workflow documents live alongside it but are never called by the compiler.

pub mod compiler;
pub mod error;
pub mod hooks;
pub mod openapi;
pub mod parser;
pub mod types;
pub mod validate;

pub use crate::compiler::{compile, CompileOutcome};
pub use crate::error::{
    CatalogError, CompileError, HookError, LoadError, ParseError, RefError, ValidationError,
    Violation,
};
pub use crate::hooks::{FlowWiring, HookHandler, HookRegistry, HookSlot, StepWiring};
pub use crate::openapi::{load_catalog_file, load_catalog_str, LoadedSpec, SpecFlavor, SpecInfo};
pub use crate::parser::{format_for_path, parse_workflow_str, DocumentFormat, ParsedWorkflows};
pub use crate::types::{
    CompiledFlow, CompiledStep, Endpoint, EndpointCatalog, Parameter, ParameterLocation, Response,
    Step, Workflow, WorkflowSet,
};
pub use crate::validate::{validate_workflow_set, Validate};
