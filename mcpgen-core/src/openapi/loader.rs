use std::path::Path;

use crate::error::LoadError;
use crate::openapi::info::{detect_flavor, spec_info, SpecInfo};
use crate::openapi::operations::collect_endpoints;
use crate::types::EndpointCatalog;

#[derive(Debug, Clone)]
pub struct LoadedSpec {
    pub catalog: EndpointCatalog,
    pub info: SpecInfo,
}

pub fn load_catalog_file(path: &Path) -> Result<LoadedSpec, LoadError> {
    let body = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    load_catalog_str(&body)
}

pub fn load_catalog_str(body: &str) -> Result<LoadedSpec, LoadError> {
    let raw = parse_openapi_str(body)?;
    let (flavor, spec_version) = detect_flavor(&raw)?;
    let endpoints = collect_endpoints(&raw, flavor)?;
    Ok(LoadedSpec {
        catalog: EndpointCatalog::new(endpoints)?,
        info: spec_info(&raw, flavor, spec_version),
    })
}

/// Parses JSON or YAML into a JSON value (YAML is converted).
pub fn parse_openapi_str(body: &str) -> Result<serde_json::Value, LoadError> {
    let trimmed = body.trim_start();
    if trimmed.starts_with('{') {
        Ok(serde_json::from_str::<serde_json::Value>(body)?)
    } else {
        let y = serde_yaml::from_str::<serde_yaml::Value>(body)?;
        Ok(serde_json::to_value(y)?)
    }
}
