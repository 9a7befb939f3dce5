mod catalog;
mod compiled;
mod endpoint;
mod parameter;
mod step;
mod workflow;

pub use catalog::EndpointCatalog;
pub use compiled::{CompiledFlow, CompiledStep};
pub use endpoint::{Endpoint, Response};
pub use parameter::{Parameter, ParameterLocation};
pub use step::Step;
pub use workflow::{Workflow, WorkflowSet};

/// Opaque schema value carried through from the API description without interpretation.
pub type Schema = serde_json::Value;
