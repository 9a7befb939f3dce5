use std::collections::BTreeMap;

use crate::types::{Parameter, Schema};

/// A single callable API operation.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Endpoint {
    pub id: String,
    pub path: String,
    /// Upper-cased HTTP method (`GET`, `POST`, ...).
    pub method: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    #[serde(default)]
    pub parameters: Vec<Parameter>,

    /// Keyed by response code string (`"200"`, `"default"`, ...).
    #[serde(default)]
    pub responses: BTreeMap<String, Response>,
}

impl Endpoint {
    pub fn new(id: impl Into<String>, path: impl Into<String>, method: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            path: path.into(),
            method: method.into().to_uppercase(),
            summary: None,
            parameters: Vec::new(),
            responses: BTreeMap::new(),
        }
    }

    pub fn required_parameters(&self) -> impl Iterator<Item = &Parameter> {
        self.parameters.iter().filter(|p| p.required)
    }
}

#[derive(Debug, Clone, PartialEq, Default, serde::Serialize, serde::Deserialize)]
pub struct Response {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<Schema>,
}
