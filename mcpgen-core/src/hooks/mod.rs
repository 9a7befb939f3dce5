//! Per-step hook and middleware registrations.
//!
//! The registry only records wiring; the code generator reads it when building the
//! orchestration part of a prompt. Nothing here invokes a handler.
//!
//! Registering a second handler for the same step and slot replaces the first
//! (last write wins). The register calls hand back the replaced handler so a caller can
//! detect the overwrite instead of ending up with two silently stacked hooks.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use crate::error::HookError;
use crate::types::CompiledFlow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HookSlot {
    Pre,
    Post,
}

impl fmt::Display for HookSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pre => f.write_str("pre"),
            Self::Post => f.write_str("post"),
        }
    }
}

/// A named extension point, e.g. a source file or symbol the generated code should call.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct HookHandler {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl HookHandler {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct HookRegistry {
    pre: BTreeMap<String, HookHandler>,
    post: BTreeMap<String, HookHandler>,
    middleware: Vec<HookHandler>,
}

impl HookRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a registry with the hook ids the workflow author put on each step.
    pub fn from_flow(flow: &CompiledFlow) -> Self {
        let mut registry = Self::new();
        for step in flow.steps() {
            if let Some(pre) = step.pre_hook() {
                registry.register_pre_hook(step.step_id(), HookHandler::new(pre));
            }
            if let Some(post) = step.post_hook() {
                registry.register_post_hook(step.step_id(), HookHandler::new(post));
            }
        }
        registry
    }

    /// Returns the handler this call replaced, if any.
    pub fn register_pre_hook(
        &mut self,
        step_id: impl Into<String>,
        handler: HookHandler,
    ) -> Option<HookHandler> {
        self.pre.insert(step_id.into(), handler)
    }

    /// Returns the handler this call replaced, if any.
    pub fn register_post_hook(
        &mut self,
        step_id: impl Into<String>,
        handler: HookHandler,
    ) -> Option<HookHandler> {
        self.post.insert(step_id.into(), handler)
    }

    /// Middleware applies to every step, in registration order.
    pub fn inject_middleware(&mut self, handler: HookHandler) {
        self.middleware.push(handler);
    }

    pub fn pre_hook(&self, step_id: &str) -> Option<&HookHandler> {
        self.pre.get(step_id)
    }

    pub fn post_hook(&self, step_id: &str) -> Option<&HookHandler> {
        self.post.get(step_id)
    }

    pub fn middleware(&self) -> &[HookHandler] {
        &self.middleware
    }

    /// Resolves the effective hooks of every step in `flow`.
    ///
    /// A registry entry overrides the hook id carried on the step. Registrations for step ids
    /// the flow does not contain are an error, reported in (slot, step id) order.
    pub fn wiring_for(&self, flow: &CompiledFlow) -> Result<FlowWiring, HookError> {
        let known: BTreeSet<&str> = flow.steps().iter().map(|s| s.step_id()).collect();
        for (slot, map) in [(HookSlot::Pre, &self.pre), (HookSlot::Post, &self.post)] {
            if let Some(step_id) = map.keys().find(|k| !known.contains(k.as_str())) {
                return Err(HookError::UnknownStep {
                    workflow_id: flow.workflow_id().to_string(),
                    step_id: step_id.clone(),
                    slot,
                });
            }
        }

        let steps = flow
            .steps()
            .iter()
            .map(|s| StepWiring {
                step_id: s.step_id().to_string(),
                pre: self
                    .pre
                    .get(s.step_id())
                    .cloned()
                    .or_else(|| s.pre_hook().map(HookHandler::new)),
                post: self
                    .post
                    .get(s.step_id())
                    .cloned()
                    .or_else(|| s.post_hook().map(HookHandler::new)),
            })
            .collect();

        Ok(FlowWiring {
            workflow_id: flow.workflow_id().to_string(),
            middleware: self.middleware.clone(),
            steps,
        })
    }
}

/// Hook wiring resolved for one flow, in step order.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct FlowWiring {
    #[serde(rename = "workflowId")]
    pub workflow_id: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub middleware: Vec<HookHandler>,
    pub steps: Vec<StepWiring>,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct StepWiring {
    #[serde(rename = "stepId")]
    pub step_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pre: Option<HookHandler>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post: Option<HookHandler>,
}

impl FlowWiring {
    pub fn has_hooks(&self) -> bool {
        !self.middleware.is_empty() || self.steps.iter().any(|s| s.pre.is_some() || s.post.is_some())
    }
}
